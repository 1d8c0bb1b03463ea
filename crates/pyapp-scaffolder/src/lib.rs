//! pyapp-scaffolder - Shared library for the `create-py-app` CLI
//!
//! This library scaffolds a new uv-managed Python project: it collects a handful of
//! enumerated choices, renders a starter source file and a `pyproject.toml`, and then
//! drives `uv` and `git` through a fixed sequence of steps.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure generators for the manifest, starter file and
//!   dependency plan, plus interpreter and tool detection
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the step pipeline
//!   (`Scaffold`) with a pluggable `CommandRunner`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pyapp_scaffolder::pipeline::{child_environment, NoopObserver, ProcessRunner, Scaffold};
//! use pyapp_scaffolder::project::*;
//!
//! let project = ProjectConfig {
//!     name: "demo".into(),
//!     framework: Framework::FastApi,
//!     linter: Linter::Ruff,
//!     type_checker: TypeChecker::Mypy,
//!     install: true,
//!     init_git: true,
//!     python_version: "3.12".into(),
//! };
//! let scaffold = Scaffold::new(project, "demo".into(), child_environment(std::env::vars_os()));
//! let report = scaffold.execute(&ProcessRunner, &mut NoopObserver).await?;
//! ```

pub mod error;
pub mod pipeline;
pub mod product;
pub mod project;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use pipeline::{child_environment, CommandRunner, ProcessRunner, Report, Scaffold, Step};
pub use product::ProductConfig;
pub use project::{Framework, Linter, ProjectConfig, TypeChecker, DEFAULT_PROJECT_NAME};
pub use runtime::PythonVersion;

#[cfg(feature = "tui")]
pub use tui::run;
