//! External formatting of emitted glue.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("failed to run `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` produced non-UTF-8 output")]
    Utf8 { program: String },
}

/// Rewrites emitted text. Semantics must be preserved.
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Formatter that pipes the source through an external program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `deno fmt` reading TypeScript from stdin.
    pub fn deno() -> Self {
        Self::new("deno", ["fmt", "--ext=ts", "-"])
    }

    /// `dprint fmt` reading from stdin, using the file name for language detection.
    pub fn dprint() -> Self {
        Self::new("dprint", ["fmt", "--stdin", "bindings.ts"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn_error(&self, e: impl std::fmt::Display) -> FormatError {
        FormatError::Spawn {
            program: self.program.clone(),
            message: e.to_string(),
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        debug!(program = %self.program, args = ?self.args, "running formatter");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.spawn_error("stdin not captured"))?;
        let input = source.to_owned();
        // stdin is fed while stdout drains.
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        let written = writer.join();

        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.spawn_error(e)),
            Err(_) => return Err(self.spawn_error("stdin writer panicked")),
        }

        String::from_utf8(output.stdout).map_err(|_| FormatError::Utf8 {
            program: self.program.clone(),
        })
    }
}
