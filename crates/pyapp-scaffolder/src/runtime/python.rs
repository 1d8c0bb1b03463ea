//! Python interpreter detection

use crate::error::ScaffoldError;
use semver::{Version, VersionReq};
use std::fmt;
use std::process::Command;

/// Oldest interpreter the generated projects are expected to work with
pub const MINIMUM_PYTHON: &str = ">=3.8";

/// Interpreters probed in order
const INTERPRETERS: &[&str] = &["python3", "python"];

/// Interpreter version. Displays as `MAJOR.MINOR`, which is what `uv init --python`
/// and `requires-python` receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonVersion(Version);

impl PythonVersion {
    /// Parse `Python 3.12.4`, `3.13.0rc1`, `3.12` and similar
    pub fn parse(raw: &str) -> Result<Self, ScaffoldError> {
        let invalid = || ScaffoldError::InvalidPythonVersion(raw.trim().to_string());

        let token = raw
            .split_whitespace()
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(invalid)?;

        let mut parts = token.split('.').map(leading_number);
        let major = parts.next().flatten().ok_or_else(invalid)?;
        let minor = parts.next().flatten().ok_or_else(invalid)?;
        let patch = parts.next().flatten().unwrap_or(0);

        Ok(Self(Version::new(major, minor, patch)))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// `MAJOR.MINOR`
    pub fn short(&self) -> String {
        format!("{}.{}", self.0.major, self.0.minor)
    }

    /// Whether the version satisfies [`MINIMUM_PYTHON`]
    pub fn is_supported(&self) -> bool {
        VersionReq::parse(MINIMUM_PYTHON)
            .map(|req| req.matches(&self.0))
            .unwrap_or(true)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

fn leading_number(part: &str) -> Option<u64> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Ask the interpreter on PATH for its version
pub fn detect() -> Result<PythonVersion, ScaffoldError> {
    for interpreter in INTERPRETERS {
        let Ok(output) = Command::new(interpreter).arg("--version").output() else {
            continue;
        };
        if !output.status.success() {
            continue;
        }
        // Old interpreters print the version on stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        if let Ok(version) = PythonVersion::parse(&text) {
            return Ok(version);
        }
    }
    Err(ScaffoldError::PythonNotFound)
}
