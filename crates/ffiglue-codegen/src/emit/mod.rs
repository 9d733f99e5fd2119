//! Glue module emission.
//!
//! Output layout, in order: banner, loader import, referenced helpers,
//! library resolution, native symbol table, type declarations, wrappers.
//! Declarations and wrappers follow the module's normalized name order.

mod config;
mod emitter;
mod formatter;
mod helpers;
mod render;

#[cfg(test)]
mod formatter_tests;

use ffiglue_core::BindingModule;
use tracing::warn;

pub use config::{Config, DEFAULT_BANNER, DEFAULT_LOADER_URL};
pub use emitter::Emitter;
pub use formatter::{CommandFormatter, FormatError, Formatter};
pub use helpers::Helpers;

use crate::Result;

/// Generate the glue module for `module`, consuming it.
///
/// A formatter failure is not fatal: the unformatted text is returned.
pub fn generate(
    module: BindingModule,
    config: &Config,
    formatter: Option<&dyn Formatter>,
) -> Result<String> {
    let text = Emitter::new(&module, config).emit()?;

    let Some(formatter) = formatter else {
        return Ok(text);
    };

    match formatter.format(&text) {
        Ok(formatted) => Ok(formatted),
        Err(e) => {
            warn!(error = %e, "formatter failed, keeping unformatted output");
            Ok(text)
        }
    }
}
