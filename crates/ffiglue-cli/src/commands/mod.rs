pub mod build_step;
pub mod emit;
pub mod generate;
pub mod locate;

#[cfg(test)]
mod generate_tests;

use std::io;
use std::path::PathBuf;

/// Failures that end a command with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Generate(#[from] ffiglue_codegen::Error),

    #[error(transparent)]
    Metadata(#[from] ffiglue_core::Error),

    #[error("no metadata at `{}`", .0.display())]
    MissingMetadata(PathBuf),

    #[error("failed to run `{program}`: {source}")]
    Build { program: String, source: io::Error },

    #[error("failed to write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot determine the working directory: {0}")]
    WorkingDir(io::Error),
}
