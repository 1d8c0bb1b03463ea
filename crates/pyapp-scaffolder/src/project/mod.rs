//! Project model: the enumerated choices and the resolved configuration
//!
//! - `manifest` renders `pyproject.toml`
//! - `starter` renders `main.py`
//! - `dependencies` derives the runtime and dev package lists
//! - `directory` guards and creates the project directory

pub mod dependencies;
pub mod directory;
pub mod manifest;
pub mod starter;

pub use dependencies::DependencyPlan;
pub use directory::{create_project_dir, ensure_vacant};
pub use manifest::generate_manifest;
pub use starter::generate_starter;

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Directory name used when the project name prompt is left blank
pub const DEFAULT_PROJECT_NAME: &str = "my-py-app";

/// Starter file written into the project root
pub const STARTER_FILE: &str = "main.py";

/// Manifest file written into the project root
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Web/UI framework the starter file targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Framework {
    Vanilla,
    #[value(name = "fastapi")]
    FastApi,
    Flask,
    Streamlit,
    Typer,
    #[value(name = "nicegui")]
    NiceGui,
}

impl Framework {
    /// All frameworks in prompt order
    pub const ALL: [Framework; 6] = [
        Framework::Vanilla,
        Framework::FastApi,
        Framework::Flask,
        Framework::Streamlit,
        Framework::Typer,
        Framework::NiceGui,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Vanilla => "Vanilla",
            Framework::FastApi => "FastAPI",
            Framework::Flask => "Flask",
            Framework::Streamlit => "Streamlit",
            Framework::Typer => "Typer",
            Framework::NiceGui => "NiceGUI",
        }
    }

    /// Command behind the `dev` poe task
    pub fn dev_command(&self) -> &'static str {
        match self {
            Framework::Vanilla => "python -m watchfiles 'python main.py' .",
            Framework::FastApi => "python -m uvicorn main:app --reload",
            Framework::Flask => "python -m flask --app main run --debug",
            Framework::Streamlit => "python -m streamlit run main.py",
            Framework::Typer => "python main.py --help",
            Framework::NiceGui => "python main.py",
        }
    }
}

/// Linter choice. Ruff is the recommended one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Linter {
    Ruff,
    None,
}

impl Linter {
    pub const ALL: [Linter; 2] = [Linter::Ruff, Linter::None];

    pub fn display_name(&self) -> &'static str {
        match self {
            Linter::Ruff => "Ruff (Fast, Recommended)",
            Linter::None => "None",
        }
    }

    pub fn is_ruff(&self) -> bool {
        matches!(self, Linter::Ruff)
    }
}

/// Type checker choice. At most one is ever installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TypeChecker {
    Ty,
    Mypy,
    None,
}

impl TypeChecker {
    pub const ALL: [TypeChecker; 3] = [TypeChecker::Ty, TypeChecker::Mypy, TypeChecker::None];

    pub fn display_name(&self) -> &'static str {
        match self {
            TypeChecker::Ty => "Ty (Astral - Fast)",
            TypeChecker::Mypy => "Mypy (Standard)",
            TypeChecker::None => "None",
        }
    }

    /// Package name installed as a dev dependency, if any
    pub fn package(&self) -> Option<&'static str> {
        match self {
            TypeChecker::Ty => Some("ty"),
            TypeChecker::Mypy => Some("mypy"),
            TypeChecker::None => None,
        }
    }
}

macro_rules! impl_display_and_from_str {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ValueEnum>::from_str(s, true)
                    .map_err(|_| format!("Unknown {}: {}", $what, s))
            }
        }
    };
}

impl_display_and_from_str!(Framework, "framework");
impl_display_and_from_str!(Linter, "linter");
impl_display_and_from_str!(TypeChecker, "type checker");

/// Fully resolved answers for one run
///
/// Built once by merging CLI flags with prompt answers, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: String,
    pub framework: Framework,
    pub linter: Linter,
    pub type_checker: TypeChecker,
    /// Run `uv add` / `uv sync` / `ruff format` right away
    pub install: bool,
    pub init_git: bool,
    /// Interpreter version as `MAJOR.MINOR`
    pub python_version: String,
}

impl ProjectConfig {
    pub fn manifest(&self) -> String {
        generate_manifest(
            &self.name,
            self.linter,
            self.type_checker,
            &self.python_version,
            self.framework,
        )
    }

    pub fn starter(&self) -> String {
        generate_starter(&self.name, self.framework)
    }

    pub fn dependencies(&self) -> DependencyPlan {
        DependencyPlan::for_project(self.framework, self.linter, self.type_checker)
    }
}

/// Resolve the raw answer of the name prompt, falling back to `default` when blank
pub fn resolve_project_name(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_resolves_to_default() {
        assert_eq!(resolve_project_name("", DEFAULT_PROJECT_NAME), "my-py-app");
        assert_eq!(resolve_project_name("   ", DEFAULT_PROJECT_NAME), "my-py-app");
        assert_eq!(resolve_project_name(" demo ", DEFAULT_PROJECT_NAME), "demo");
    }

    #[test]
    fn test_parse_choices_case_insensitive() {
        assert_eq!("FastAPI".parse::<Framework>(), Ok(Framework::FastApi));
        assert_eq!("nicegui".parse::<Framework>(), Ok(Framework::NiceGui));
        assert_eq!("RUFF".parse::<Linter>(), Ok(Linter::Ruff));
        assert_eq!("mypy".parse::<TypeChecker>(), Ok(TypeChecker::Mypy));
        assert!("django".parse::<Framework>().is_err());
    }

    #[test]
    fn test_display_uses_prompt_labels() {
        assert_eq!(Framework::FastApi.to_string(), "FastAPI");
        assert_eq!(Linter::Ruff.to_string(), "Ruff (Fast, Recommended)");
        assert_eq!(TypeChecker::Ty.to_string(), "Ty (Astral - Fast)");
    }

    #[test]
    fn test_every_framework_has_a_dev_command() {
        for framework in Framework::ALL {
            assert!(framework.dev_command().starts_with("python "));
        }
    }
}
