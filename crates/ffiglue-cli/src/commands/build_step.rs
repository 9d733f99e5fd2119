//! The native build run before generation.

use std::process::Command;

use tracing::{info, warn};

use super::CommandError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    /// Exit code, `None` when the build was killed by a signal.
    Failed(Option<i32>),
}

impl BuildOutcome {
    pub fn succeeded(self) -> bool {
        self == BuildOutcome::Succeeded
    }

    /// Process exit code to propagate.
    pub fn exit_code(self) -> i32 {
        match self {
            BuildOutcome::Succeeded => 0,
            BuildOutcome::Failed(code) => code.unwrap_or(1),
        }
    }
}

/// `cargo build [--release] [extra args]`, with inherited stdio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildStep {
    program: String,
    release: bool,
    extra: Vec<String>,
}

impl BuildStep {
    pub fn cargo(release: bool, extra: Vec<String>) -> Self {
        Self {
            program: "cargo".to_string(),
            release,
            extra,
        }
    }

    /// Run a different program with the same arguments.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["build".to_string()];
        if self.release {
            args.push("--release".to_string());
        }
        args.extend(self.extra.iter().cloned());
        args
    }

    pub fn run(&self) -> Result<BuildOutcome, CommandError> {
        let args = self.args();
        info!(program = %self.program, args = ?args, "building native library");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| CommandError::Build {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            return Ok(BuildOutcome::Succeeded);
        }
        warn!(%status, "native build failed");
        Ok(BuildOutcome::Failed(status.code()))
    }
}
