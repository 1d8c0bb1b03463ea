//! create-py-app - Scaffold strictly typed Python projects managed by uv

use clap::{Parser, Subcommand};
use pyapp_scaffolder::tui::CreateArgs;
use pyapp_scaffolder::{
    Framework, Linter, ProductConfig, ProjectConfig, ScaffoldError, TypeChecker,
};
use std::path::Path;
use std::process::ExitCode;

/// create-py-app product configuration
#[derive(Clone)]
pub struct PyAppConfig;

impl ProductConfig for PyAppConfig {
    fn display_name(&self) -> &'static str {
        "Create Py App"
    }

    fn next_steps(
        &self,
        dir: &Path,
        _project: &ProjectConfig,
        install_skipped: bool,
    ) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        if install_skipped {
            steps.push("uv sync".to_string());
        }

        steps.push("uv run poe dev".to_string());
        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-py-app")]
#[command(about = "Scaffold a strictly typed Python project.")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Python project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// The name of the project directory
    pub project_name: Option<String>,

    /// Initialize a git repository (default)
    #[arg(long, overrides_with = "no_git")]
    pub git: bool,

    /// Do not initialize a git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Framework for the starter file
    #[arg(short, long, value_enum)]
    pub framework: Option<Framework>,

    /// Linter to configure
    #[arg(long, value_enum)]
    pub linter: Option<Linter>,

    /// Type checker to configure
    #[arg(long = "type-checker", value_enum)]
    pub type_checker: Option<TypeChecker>,

    /// Install dependencies right away
    #[arg(long, overrides_with = "no_install")]
    pub install: bool,

    /// Write the project files only
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Python version to pin, e.g. 3.12 (detected from PATH by default)
    #[arg(long)]
    pub python: Option<String>,

    /// Skip uv installation check
    #[arg(long = "skip-uv-check")]
    pub skip_uv_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        let install = match (args.install, args.no_install) {
            (_, true) => Some(false),
            (true, _) => Some(true),
            _ => None,
        };
        CreateArgs {
            name: args.project_name,
            git: !args.no_git,
            framework: args.framework,
            linter: args.linter,
            type_checker: args.type_checker,
            install,
            python: args.python,
            skip_tool_check: args.skip_uv_check,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C inside a prompt is read as a key and cancels the prompt; this only
    // fires while a child process is running
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = PyAppConfig;

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs::default(),
    };

    let result = pyapp_scaffolder::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::Cancelled) => {
            let _ = cliclack::outro_cancel("Cancelled");
            ExitCode::SUCCESS
        }
        Some(scaffold_err) => {
            let _ = cliclack::log::error(scaffold_err);
            ExitCode::from(scaffold_err.exit_code())
        }
        None => {
            let _ = cliclack::log::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CreateArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Some(Command::Create(create)) => create.into(),
            None => panic!("expected create subcommand"),
        }
    }

    #[test]
    fn test_git_enabled_by_default() {
        let args = parse(&["create-py-app", "create", "demo"]);
        assert_eq!(args.name.as_deref(), Some("demo"));
        assert!(args.git);
        assert_eq!(args.install, None);
        assert_eq!(args.framework, None);
    }

    #[test]
    fn test_no_git_and_no_install() {
        let args = parse(&["create-py-app", "create", "--no-git", "--no-install"]);
        assert!(!args.git);
        assert_eq!(args.install, Some(false));
        assert_eq!(args.name, None);
    }

    #[test]
    fn test_choice_flags() {
        let args = parse(&[
            "create-py-app",
            "create",
            "api",
            "--framework",
            "fastapi",
            "--linter",
            "ruff",
            "--type-checker",
            "mypy",
            "--install",
            "--python",
            "3.12",
            "-y",
        ]);
        assert_eq!(args.framework, Some(Framework::FastApi));
        assert_eq!(args.linter, Some(Linter::Ruff));
        assert_eq!(args.type_checker, Some(TypeChecker::Mypy));
        assert_eq!(args.install, Some(true));
        assert_eq!(args.python.as_deref(), Some("3.12"));
        assert!(args.yes);
    }

    #[test]
    fn test_unknown_framework_is_rejected() {
        assert!(Args::try_parse_from(["create-py-app", "create", "--framework", "django"]).is_err());
    }

    #[test]
    fn test_next_steps() {
        let config = PyAppConfig;
        let cwd = std::env::current_dir().unwrap();
        let project = ProjectConfig {
            name: "demo".to_string(),
            framework: Framework::Vanilla,
            linter: Linter::None,
            type_checker: TypeChecker::None,
            install: false,
            init_git: false,
            python_version: "3.12".to_string(),
        };

        let steps = config.next_steps(&cwd.join("demo"), &project, true);
        assert_eq!(steps, vec!["cd demo", "uv sync", "uv run poe dev"]);

        let steps = config.next_steps(&cwd.join("demo"), &project, false);
        assert_eq!(steps, vec!["cd demo", "uv run poe dev"]);
    }
}
