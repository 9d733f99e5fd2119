//! The metadata artifact written by the native build.
//!
//! The artifact is single-use: a generation pass reads it, and once the
//! output exists it is deleted. A missing artifact means "nothing to do".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::metadata::RawMetadata;
use crate::{Error, Result};

/// File name of the artifact.
pub const METADATA_FILE: &str = "bindings.json";

/// Overrides the directory the artifact is written to.
pub const METADATA_DIR_ENV: &str = "FFIGLUE_METADATA_DIR";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactState {
    /// No metadata was produced.
    Missing,
    /// Metadata is waiting to be consumed.
    Present,
    /// Metadata was consumed by this handle and deleted.
    Consumed,
}

#[derive(Debug)]
pub struct MetadataArtifact {
    path: PathBuf,
    consumed: bool,
}

impl MetadataArtifact {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: false,
        }
    }

    /// Artifact location for a build run from `dir`, honoring `FFIGLUE_METADATA_DIR`.
    pub fn locate(dir: &Path) -> Self {
        let base = std::env::var_os(METADATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.to_path_buf());
        Self::at(base.join(METADATA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> ArtifactState {
        if self.consumed {
            ArtifactState::Consumed
        } else if self.path.is_file() {
            ArtifactState::Present
        } else {
            ArtifactState::Missing
        }
    }

    /// Read and parse the artifact. `None` unless it is present.
    ///
    /// Leaves the file in place, so a failed generation can be inspected or retried.
    pub fn read(&self) -> Result<Option<RawMetadata>> {
        if self.state() != ArtifactState::Present {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        RawMetadata::from_json(&text).map(Some)
    }

    /// Delete the artifact after its output has been produced.
    pub fn consume(&mut self) -> Result<ArtifactState> {
        match self.state() {
            ArtifactState::Present => {
                fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
                self.consumed = true;
                debug!(path = %self.path.display(), "metadata consumed");
                Ok(ArtifactState::Consumed)
            }
            state => Ok(state),
        }
    }

    /// Remove a stale artifact left over from an earlier build.
    ///
    /// Returns whether anything was removed.
    pub fn discard(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "stale metadata removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, e: io::Error) -> Error {
        Error::Artifact {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}
