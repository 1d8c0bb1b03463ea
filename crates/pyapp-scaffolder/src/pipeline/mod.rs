//! Scaffolding pipeline
//!
//! A run is an explicit ordered list of [`Step`]s computed from the project
//! configuration. Each step either succeeds or fails, and [`Step::is_fatal`] is the
//! one place that decides whether a failure stops the run. Nothing is rolled back:
//! whatever was written before a fatal failure stays on disk.

mod command;

pub use command::{
    child_environment, ChildEnv, CommandRunner, Invocation, ProcessRunner, VIRTUAL_ENV_VAR,
};

use crate::error::ScaffoldError;
use crate::project::{
    create_project_dir, DependencyPlan, ProjectConfig, MANIFEST_FILE, STARTER_FILE,
};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Files `uv init` may leave behind that the starter file replaces
pub const PLACEHOLDER_FILES: &[&str] = &["hello.py"];

/// Patterns appended to `.gitignore`
pub const IGNORE_PATTERNS: &[&str] = &[".ruff_cache", ".mypy_cache", "__pycache__"];

pub const INITIAL_COMMIT_MESSAGE: &str = "Init";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateDirectory,
    InitProject,
    RemovePlaceholder,
    WriteStarter,
    WriteManifest,
    AddDependencies,
    AddDevDependencies,
    Sync,
    Format,
    InitGit,
}

impl Step {
    /// Failures of setup steps abort the run. Install, format and git steps only
    /// produce warnings.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Step::CreateDirectory
                | Step::InitProject
                | Step::RemovePlaceholder
                | Step::WriteStarter
                | Step::WriteManifest
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::CreateDirectory => "Create project directory",
            Step::InitProject => "Initialize project",
            Step::RemovePlaceholder => "Remove placeholder files",
            Step::WriteStarter => "Write starter file",
            Step::WriteManifest => "Write manifest",
            Step::AddDependencies => "Install app dependencies",
            Step::AddDevDependencies => "Install dev dependencies",
            Step::Sync => "Install project",
            Step::Format => "Run initial format",
            Step::InitGit => "Initialize Git",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Progress callbacks for a running pipeline
pub trait StepObserver {
    fn started(&mut self, _step: Step, _description: &str) {}
    fn finished(&mut self, _step: Step) {}
    fn failed(&mut self, _step: Step, _error: &ScaffoldError) {}
    fn install_skipped(&mut self) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// A non-fatal step failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: Step,
    pub message: String,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub completed: Vec<Step>,
    pub warnings: Vec<StepWarning>,
    pub install_skipped: bool,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Everything needed to materialize one project
#[derive(Debug, Clone)]
pub struct Scaffold {
    project: ProjectConfig,
    dir: PathBuf,
    env: ChildEnv,
    starter: String,
    manifest: String,
    dependencies: DependencyPlan,
}

impl Scaffold {
    /// Render the artifacts for `project`. Nothing touches the disk until `execute`.
    pub fn new(project: ProjectConfig, dir: PathBuf, env: ChildEnv) -> Self {
        let starter = project.starter();
        let manifest = project.manifest();
        let dependencies = project.dependencies();
        Self {
            project,
            dir,
            env,
            starter,
            manifest,
            dependencies,
        }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn dependencies(&self) -> &DependencyPlan {
        &self.dependencies
    }

    /// Ordered steps for this configuration
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![
            Step::CreateDirectory,
            Step::InitProject,
            Step::RemovePlaceholder,
            Step::WriteStarter,
            Step::WriteManifest,
        ];

        if self.project.install {
            if !self.dependencies.runtime.is_empty() {
                steps.push(Step::AddDependencies);
            }
            if !self.dependencies.dev.is_empty() {
                steps.push(Step::AddDevDependencies);
            }
            steps.push(Step::Sync);
            if self.project.linter.is_ruff() {
                steps.push(Step::Format);
            }
        }

        if self.project.init_git {
            steps.push(Step::InitGit);
        }

        steps
    }

    /// One-line progress text for a step
    pub fn describe(&self, step: Step) -> String {
        match step {
            Step::CreateDirectory => format!("Creating {}", self.dir.display()),
            Step::InitProject => format!(
                "Initializing uv project (Python {})",
                self.project.python_version
            ),
            Step::WriteStarter => format!("Writing {}", STARTER_FILE),
            Step::WriteManifest => format!("Writing {}", MANIFEST_FILE),
            Step::AddDependencies => format!(
                "Installing app deps: {}",
                self.dependencies.runtime.join(", ")
            ),
            Step::AddDevDependencies => {
                format!("Installing dev deps: {}", self.dependencies.dev.join(", "))
            }
            Step::Sync => "Installing project".to_string(),
            Step::Format => "Running initial format".to_string(),
            Step::InitGit => "Initializing Git".to_string(),
            Step::RemovePlaceholder => "Removing placeholder files".to_string(),
        }
    }

    /// Run every step in order
    pub async fn execute<R, O>(
        &self,
        runner: &R,
        observer: &mut O,
    ) -> Result<Report, ScaffoldError>
    where
        R: CommandRunner,
        O: StepObserver,
    {
        let mut report = Report {
            install_skipped: !self.project.install,
            ..Report::default()
        };

        for step in self.steps() {
            observer.started(step, &self.describe(step));

            match self.run_step(step, runner).await {
                Ok(()) => {
                    observer.finished(step);
                    report.completed.push(step);
                }
                Err(error) => {
                    observer.failed(step, &error);
                    if step.is_fatal() {
                        return Err(error);
                    }
                    report.warnings.push(StepWarning {
                        step,
                        message: error.to_string(),
                    });
                }
            }

            if step == Step::WriteManifest && !self.project.install {
                observer.install_skipped();
            }
        }

        Ok(report)
    }

    async fn run_step<R: CommandRunner>(
        &self,
        step: Step,
        runner: &R,
    ) -> Result<(), ScaffoldError> {
        match step {
            Step::CreateDirectory => create_project_dir(&self.dir).await,
            Step::InitProject => {
                self.invoke(runner, &Invocation::uv_init(&self.project.python_version))
                    .await
            }
            Step::RemovePlaceholder => {
                for name in PLACEHOLDER_FILES {
                    remove_if_present(&self.dir.join(name)).await?;
                }
                Ok(())
            }
            Step::WriteStarter => write_file(&self.dir.join(STARTER_FILE), &self.starter).await,
            Step::WriteManifest => write_file(&self.dir.join(MANIFEST_FILE), &self.manifest).await,
            Step::AddDependencies => {
                self.invoke(runner, &Invocation::uv_add(&self.dependencies.runtime, false))
                    .await
            }
            Step::AddDevDependencies => {
                self.invoke(runner, &Invocation::uv_add(&self.dependencies.dev, true))
                    .await
            }
            Step::Sync => self.invoke(runner, &Invocation::uv_sync()).await,
            Step::Format => self.invoke(runner, &Invocation::ruff_format()).await,
            Step::InitGit => {
                self.invoke(runner, &Invocation::git_init()).await?;
                append_ignore_patterns(&self.dir.join(".gitignore")).await?;
                self.invoke(runner, &Invocation::git_add_all()).await?;
                self.invoke(runner, &Invocation::git_commit(INITIAL_COMMIT_MESSAGE))
                    .await
            }
        }
    }

    async fn invoke<R: CommandRunner>(
        &self,
        runner: &R,
        invocation: &Invocation,
    ) -> Result<(), ScaffoldError> {
        runner.run(invocation, &self.dir, &self.env).await
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents)
        .await
        .map_err(|source| ScaffoldError::Io {
            action: "write",
            path: path.to_path_buf(),
            source,
        })
}

async fn remove_if_present(path: &Path) -> Result<(), ScaffoldError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ScaffoldError::Io {
            action: "remove",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Append [`IGNORE_PATTERNS`] to a `.gitignore`, creating it if needed
pub async fn append_ignore_patterns(path: &Path) -> Result<(), ScaffoldError> {
    let io_error = |source: io::Error| ScaffoldError::Io {
        action: "update",
        path: path.to_path_buf(),
        source,
    };

    let needs_newline = match fs::read(path).await {
        Ok(existing) => existing.last().is_some_and(|b| *b != b'\n'),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(io_error(e)),
    };

    let mut block = String::new();
    if needs_newline {
        block.push('\n');
    }
    for pattern in IGNORE_PATTERNS {
        block.push_str(pattern);
        block.push('\n');
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(io_error)?;
    file.write_all(block.as_bytes()).await.map_err(io_error)?;
    file.flush().await.map_err(io_error)
}
