//! Error types surfaced to the CLI binary
//!
//! Most code paths use `anyhow::Result` with context. The variants here are the ones
//! the binary needs to recognize in order to pick an exit code or a message style.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user backed out of an interactive prompt. Not an error for exit-code purposes.
    #[error("Setup cancelled.")]
    Cancelled,

    /// The project directory is already taken.
    #[error("Directory '{}' already exists.", .path.display())]
    DirectoryExists { path: PathBuf },

    #[error("No Python interpreter found. Install Python 3 from https://python.org or pass --python <VERSION>.")]
    PythonNotFound,

    #[error("Could not read a Python version from '{0}'")]
    InvalidPythonVersion(String),

    /// A child process ran but exited unsuccessfully.
    #[error("`{command}` failed{}{}", format_code(.code), format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Process exit code the binary should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::Cancelled => 0,
            ScaffoldError::CommandFailed {
                code: Some(code), ..
            } if *code > 0 && *code <= u8::MAX as i32 => *code as u8,
            _ => 1,
        }
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{}", stderr)
    }
}
