//! One generation pass over the metadata artifact.

use ffiglue_core::{LibraryLocation, MetadataArtifact, Profile};
use tracing::{debug, info};

use crate::Result;
use crate::emit::{Config, Formatter, generate};

/// Outcome of a generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generation {
    /// No metadata was waiting; nothing was produced.
    Unchanged,
    Emitted(String),
}

impl Generation {
    pub fn text(&self) -> Option<&str> {
        match self {
            Generation::Unchanged => None,
            Generation::Emitted(text) => Some(text),
        }
    }
}

/// Generate glue from the artifact, then delete it.
///
/// The artifact is only deleted once the text exists. Any error leaves it
/// on disk, so a later pass sees the same input.
pub fn generate_from_artifact(
    artifact: &mut MetadataArtifact,
    profile: Profile,
    location: LibraryLocation,
    config: &Config,
    formatter: Option<&dyn Formatter>,
) -> Result<Generation> {
    let Some(raw) = artifact.read()? else {
        debug!(path = %artifact.path().display(), "no metadata, skipping generation");
        return Ok(Generation::Unchanged);
    };

    let module = raw.into_module(profile, location)?;
    let name = module.name().to_string();
    let text = generate(module, config, formatter)?;

    artifact.consume()?;
    let host_library = config
        .locator
        .host_file_name(&name)
        .unwrap_or_else(|| "unknown".to_string());
    info!(module = %name, bytes = text.len(), %host_library, "glue generated");
    Ok(Generation::Emitted(text))
}
