mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

use ffiglue_codegen::CommandFormatter;

pub use commands::build_cli;
pub use dispatch::{EmitParams, GenerateParams, LocateParams};

/// External formatter selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatterChoice {
    #[default]
    Deno,
    Dprint,
    None,
}

impl FormatterChoice {
    pub fn formatter(self) -> Option<CommandFormatter> {
        match self {
            FormatterChoice::Deno => Some(CommandFormatter::deno()),
            FormatterChoice::Dprint => Some(CommandFormatter::dprint()),
            FormatterChoice::None => None,
        }
    }
}
