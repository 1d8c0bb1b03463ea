//! `pyproject.toml` generation
//!
//! The manifest is assembled from fixed blocks:
//!
//! ```toml
//! [project]                         # always
//! [build-system]                    # always (hatchling)
//! [tool.hatch.build.targets.wheel]  # always
//! [tool.ruff] ...                   # Ruff only
//! [tool.ty] / [tool.mypy]           # at most one of them
//! [tool.poe.tasks]                  # always, one `dev` task
//! ```

use super::{Framework, Linter, TypeChecker};

/// Description written into every generated manifest
pub const PROJECT_DESCRIPTION: &str = "Project generated with create-py-app";

/// Initial version of a freshly scaffolded project
pub const INITIAL_VERSION: &str = "0.1.0";

/// Rule groups enabled for `ruff check`
const RUFF_SELECT: &[&str] = &["E", "F", "I", "N", "UP", "B"];

/// Ruff `target-version` for an interpreter version, e.g. `3.12` -> `py312`
pub fn ruff_target_version(python_version: &str) -> String {
    format!("py{}", python_version.replace('.', ""))
}

/// Render the full `pyproject.toml` for the given choices
pub fn generate_manifest(
    name: &str,
    linter: Linter,
    type_checker: TypeChecker,
    python_version: &str,
    framework: Framework,
) -> String {
    let mut tools = String::new();

    if linter.is_ruff() {
        let select = RUFF_SELECT
            .iter()
            .map(|code| format!("\"{}\"", code))
            .collect::<Vec<_>>()
            .join(", ");
        tools.push_str(&format!(
            r#"
[tool.ruff]
line-length = 88
target-version = "{target}"

[tool.ruff.lint]
select = [{select}]
fixable = ["ALL"]

[tool.ruff.format]
quote-style = "double"
"#,
            target = ruff_target_version(python_version),
            select = select,
        ));
    }

    match type_checker {
        TypeChecker::Ty => tools.push_str(
            r#"
[tool.ty]
# Ty defaults
"#,
        ),
        TypeChecker::Mypy => tools.push_str(
            r#"
[tool.mypy]
strict = true
ignore_missing_imports = true
disallow_untyped_defs = true
warn_unused_ignores = true
"#,
        ),
        TypeChecker::None => {}
    }

    tools.push_str(&format!(
        r#"
[tool.poe.tasks]
dev = "{}"
"#,
        framework.dev_command()
    ));

    format!(
        r#"[project]
name = "{name}"
version = "{version}"
description = "{description}"
readme = "README.md"
requires-python = ">={python}"
dependencies = []

[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[tool.hatch.build.targets.wheel]
packages = ["."]
{tools}"#,
        name = name,
        version = INITIAL_VERSION,
        description = PROJECT_DESCRIPTION,
        python = python_version,
        tools = tools,
    )
}
