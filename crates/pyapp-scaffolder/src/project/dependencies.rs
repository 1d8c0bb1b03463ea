//! Runtime and dev dependency lists passed to `uv add`

use super::{Framework, Linter, TypeChecker};

/// Task runner backing `uv run poe dev`, always installed
pub const TASK_RUNNER_PACKAGE: &str = "poethepoet";

/// Watcher used by the Vanilla `dev` task
pub const FILE_WATCHER_PACKAGE: &str = "watchfiles";

pub const RUFF_PACKAGE: &str = "ruff";

/// Ordered package lists for one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPlan {
    pub runtime: Vec<&'static str>,
    pub dev: Vec<&'static str>,
}

impl DependencyPlan {
    pub fn for_project(framework: Framework, linter: Linter, type_checker: TypeChecker) -> Self {
        let runtime = match framework {
            Framework::Vanilla => vec![],
            Framework::FastApi => vec!["fastapi", "uvicorn[standard]"],
            Framework::Flask => vec!["flask"],
            Framework::Streamlit => vec!["streamlit"],
            Framework::Typer => vec!["typer"],
            Framework::NiceGui => vec!["nicegui"],
        };

        let mut dev = vec![TASK_RUNNER_PACKAGE];
        if linter.is_ruff() {
            dev.push(RUFF_PACKAGE);
        }
        if let Some(package) = type_checker.package() {
            dev.push(package);
        }
        if framework == Framework::Vanilla {
            dev.push(FILE_WATCHER_PACKAGE);
        }

        Self { runtime, dev }
    }
}
