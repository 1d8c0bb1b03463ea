//! Child process invocations for `uv` and `git`

use crate::error::ScaffoldError;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Variable stripped from every child environment. An active venv in the parent
/// shell makes `uv` resolve the wrong environment for the new project.
pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// Lines of stderr kept in a failure message
const STDERR_TAIL_LINES: usize = 20;

/// Environment passed to every child process
pub type ChildEnv = Vec<(OsString, OsString)>;

/// Build the child environment from the parent's variables, minus `VIRTUAL_ENV`
pub fn child_environment<I>(vars: I) -> ChildEnv
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter(|(key, _)| key != VIRTUAL_ENV_VAR)
        .collect()
}

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn uv_init(python_version: &str) -> Self {
        Self::new("uv", ["init", "--python", python_version, "--quiet"])
    }

    /// `uv add [--dev] <packages> --quiet`
    pub fn uv_add(packages: &[&str], dev: bool) -> Self {
        let mut args = vec!["add"];
        if dev {
            args.push("--dev");
        }
        args.extend_from_slice(packages);
        args.push("--quiet");
        Self::new("uv", args)
    }

    pub fn uv_sync() -> Self {
        Self::new("uv", ["sync", "--quiet"])
    }

    pub fn ruff_format() -> Self {
        Self::new("uv", ["run", "ruff", "format", ".", "--quiet"])
    }

    pub fn git_init() -> Self {
        Self::new("git", ["init", "-q"])
    }

    pub fn git_add_all() -> Self {
        Self::new("git", ["add", "."])
    }

    pub fn git_commit(message: &str) -> Self {
        Self::new("git", ["commit", "-q", "-m", message])
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs invocations to completion
///
/// Implementations block (asynchronously) until the child exits and report a
/// non-zero exit as [`ScaffoldError::CommandFailed`].
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cwd: &Path,
        env: &ChildEnv,
    ) -> Result<(), ScaffoldError>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cwd: &Path,
        env: &ChildEnv,
    ) -> Result<(), ScaffoldError> {
        let output = Command::new(invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .env_clear()
            .envs(env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ScaffoldError::Io {
                action: "run",
                path: PathBuf::from(invocation.program),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(ScaffoldError::CommandFailed {
            command: invocation.to_string(),
            code: output.status.code(),
            stderr: stderr_tail(&String::from_utf8_lossy(&output.stderr)),
        })
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_environment_strips_virtual_env() {
        let vars = vec![
            (OsString::from("PATH"), OsString::from("/usr/bin")),
            (OsString::from("VIRTUAL_ENV"), OsString::from("/tmp/.venv")),
            (OsString::from("HOME"), OsString::from("/home/dev")),
        ];
        let env = child_environment(vars);
        assert_eq!(env.len(), 2);
        assert!(env.iter().all(|(k, _)| k != "VIRTUAL_ENV"));
        assert!(env.iter().any(|(k, v)| k == "PATH" && v == "/usr/bin"));
    }

    #[test]
    fn test_uv_invocations() {
        assert_eq!(
            Invocation::uv_init("3.12").to_string(),
            "uv init --python 3.12 --quiet"
        );
        assert_eq!(
            Invocation::uv_add(&["fastapi", "uvicorn[standard]"], false).to_string(),
            "uv add fastapi uvicorn[standard] --quiet"
        );
        assert_eq!(
            Invocation::uv_add(&["poethepoet", "ruff"], true).to_string(),
            "uv add --dev poethepoet ruff --quiet"
        );
        assert_eq!(Invocation::uv_sync().to_string(), "uv sync --quiet");
        assert_eq!(
            Invocation::ruff_format().to_string(),
            "uv run ruff format . --quiet"
        );
    }

    #[test]
    fn test_git_commit_keeps_message_as_one_argument() {
        let commit = Invocation::git_commit("Initial commit");
        assert_eq!(commit.program, "git");
        assert_eq!(commit.args, vec!["commit", "-q", "-m", "Initial commit"]);
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let tail = stderr_tail(&stderr);
        assert_eq!(tail.lines().count(), STDERR_TAIL_LINES);
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
    }

    #[tokio::test]
    async fn test_process_runner_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let env = child_environment(std::env::vars_os());
        let err = ProcessRunner
            .run(
                &Invocation::new("sh", ["-c", "echo boom >&2; exit 3"]),
                tmp.path(),
                &env,
            )
            .await
            .unwrap_err();
        match err {
            ScaffoldError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_process_runner_hides_virtual_env() {
        let tmp = tempfile::tempdir().unwrap();
        let mut vars: Vec<(OsString, OsString)> = std::env::vars_os().collect();
        vars.push(("VIRTUAL_ENV".into(), "/tmp/parent-venv".into()));
        let env = child_environment(vars);

        ProcessRunner
            .run(
                &Invocation::new("sh", ["-c", "test -z \"$VIRTUAL_ENV\""]),
                tmp.path(),
                &env,
            )
            .await
            .unwrap();
    }
}
