//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::pipeline::{child_environment, ProcessRunner, Report, Scaffold, Step, StepObserver};
use crate::product::ProductConfig;
use crate::project::{
    ensure_vacant, resolve_project_name, Framework, Linter, ProjectConfig, TypeChecker,
};
use crate::runtime::{detect_python, uv_tool, PythonVersion, MINIMUM_PYTHON};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Display;
use std::io;

/// Accent color used for titles
const RUBY_RED: (u8, u8, u8) = (0xF7, 0x00, 0x18);

/// CLI arguments for the create command
///
/// Every `Some` field answers its prompt up front; `yes` accepts the default for
/// the rest.
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project directory name, relative to the current directory
    pub name: Option<String>,

    /// Initialize a git repository
    pub git: bool,

    pub framework: Option<Framework>,
    pub linter: Option<Linter>,
    pub type_checker: Option<TypeChecker>,

    /// Install dependencies now
    pub install: Option<bool>,

    /// Interpreter version to pin instead of detecting one
    pub python: Option<String>,

    /// Skip the uv installation check
    pub skip_tool_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            name: None,
            git: true,
            framework: None,
            linter: None,
            type_checker: None,
            install: None,
            python: None,
            skip_tool_check: false,
            yes: false,
        }
    }
}

/// Turns a prompt interrupted with Esc/Ctrl-C into [`ScaffoldError::Cancelled`]
trait PromptResultExt<T> {
    fn or_cancel(self) -> Result<T>;
}

impl<T> PromptResultExt<T> for io::Result<T> {
    fn or_cancel(self) -> Result<T> {
        self.map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted {
                ScaffoldError::Cancelled.into()
            } else {
                anyhow::Error::from(e)
            }
        })
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    let (r, g, b) = RUBY_RED;
    cliclack::intro(config.display_name().truecolor(r, g, b).bold())?;

    // Step 1: Make sure uv is around
    if args.skip_tool_check {
        cliclack::log::info("Skipping uv check")?;
    } else if !handle_tool_check(&args).await? {
        return Ok(());
    }

    // Step 2: Interpreter version
    let python = resolve_python(&args)?;

    // Step 3: Project name and directory guard
    let name = select_name(config, &args)?;
    let current_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let project_dir = current_dir.join(&name);
    ensure_vacant(&project_dir)?;

    // Step 4: Remaining choices
    let framework = select_choice(
        "Select a framework",
        &Framework::ALL,
        args.framework,
        args.yes,
    )?;
    let linter = select_choice("Select a linter", &Linter::ALL, args.linter, args.yes)?;
    let type_checker = select_choice(
        "Select a type checker",
        &TypeChecker::ALL,
        args.type_checker,
        args.yes,
    )?;
    let install = confirm_install(&args)?;

    let project = ProjectConfig {
        name,
        framework,
        linter,
        type_checker,
        install,
        init_git: args.git,
        python_version: python.short(),
    };

    // Step 5: Scaffold
    cliclack::log::step(format!(
        "Scaffolding project in {}",
        project.name.bold().white()
    ))?;
    let scaffold = Scaffold::new(
        project,
        project_dir,
        child_environment(std::env::vars_os()),
    );
    let report = scaffold
        .execute(&ProcessRunner, &mut SpinnerObserver::default())
        .await?;

    // Step 6: Show warnings and next steps
    print_warnings(&report)?;
    print_next_steps(config, &scaffold, &report)?;

    Ok(())
}

/// Returns `false` when the run should stop here (user went to read the docs)
async fn handle_tool_check(args: &CreateArgs) -> Result<bool> {
    let tool = uv_tool();
    let name = tool.config().display_name;

    if let Some(version) = tool.version() {
        cliclack::log::success(format!("{} installed ({})", name, version))?;
        return Ok(true);
    }

    cliclack::log::warning(format!("{} is not installed", name))?;

    if args.yes {
        cliclack::log::info(format!("Continuing without {} (--yes mode)", name))?;
        return Ok(true);
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item("install", format!("Install {} automatically", name), "")
        .item(
            "docs",
            format!("Open documentation ({})", tool.config().docs_url),
            "",
        )
        .item("skip", format!("Skip and continue without {}", name), "")
        .interact()
        .or_cancel()?;

    match action {
        "install" => {
            cliclack::log::info(format!("This will execute: {}", tool.install_command()))?;

            let confirm = cliclack::confirm("Proceed with installation?")
                .initial_value(true)
                .interact()
                .or_cancel()?;

            if !confirm {
                cliclack::log::info(format!(
                    "Continuing without {}. Installation instructions: {}",
                    name,
                    tool.config().docs_url
                ))?;
                return Ok(true);
            }

            match tool.install().await {
                Ok(()) => cliclack::log::success(format!("{} installed successfully", name))?,
                Err(e) => {
                    cliclack::log::error(format!("{}", e))?;

                    let continue_anyway = cliclack::confirm(format!("Continue without {}?", name))
                        .initial_value(false)
                        .interact()
                        .or_cancel()?;

                    if !continue_anyway {
                        return Err(ScaffoldError::Cancelled.into());
                    }
                }
            }
            Ok(true)
        }
        "docs" => {
            tool.open_docs()?;
            cliclack::outro(format!("After installing {}, run this command again.", name))?;
            Ok(false)
        }
        _ => {
            cliclack::log::info(format!(
                "Continuing without {}. Installation instructions: {}",
                name,
                tool.config().docs_url
            ))?;
            Ok(true)
        }
    }
}

fn resolve_python(args: &CreateArgs) -> Result<PythonVersion> {
    let python = match &args.python {
        Some(raw) => {
            let version = PythonVersion::parse(raw)?;
            cliclack::log::info(format!("Using Python {}", version))?;
            version
        }
        None => {
            let version = detect_python()?;
            cliclack::log::info(format!("Detected system Python: {}", version).dimmed())?;
            version
        }
    };

    if !python.is_supported() {
        cliclack::log::warning(format!(
            "Python {} does not satisfy {}; generated tooling may not install",
            python, MINIMUM_PYTHON
        ))?;
    }

    Ok(python)
}

fn select_name<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<String> {
    let default = config.default_project_name();

    let input = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => String::new(),
        None => cliclack::input("Project name")
            .placeholder(default)
            .default_input(default)
            .required(false)
            .interact::<String>()
            .or_cancel()?,
    };

    Ok(resolve_project_name(&input, default))
}

/// Single-choice prompt over a closed enum, unless a flag or `--yes` answers it
fn select_choice<T>(prompt: &str, choices: &[T], preset: Option<T>, yes: bool) -> Result<T>
where
    T: Copy + Eq + Display,
{
    if let Some(choice) = preset {
        cliclack::log::info(format!("{}: {}", prompt.trim_start_matches("Select a "), choice))?;
        return Ok(choice);
    }
    if yes {
        return Ok(choices[0]);
    }

    let mut select = cliclack::select(prompt);
    for choice in choices {
        select = select.item(*choice, choice, "");
    }
    select.interact().or_cancel()
}

fn confirm_install(args: &CreateArgs) -> Result<bool> {
    if let Some(install) = args.install {
        return Ok(install);
    }
    if args.yes {
        return Ok(true);
    }
    cliclack::confirm("Install dependencies now?")
        .initial_value(true)
        .interact()
        .or_cancel()
}

/// One spinner per pipeline step
#[derive(Default)]
struct SpinnerObserver {
    spinner: Option<cliclack::ProgressBar>,
    description: String,
}

impl StepObserver for SpinnerObserver {
    fn started(&mut self, _step: Step, description: &str) {
        let spinner = cliclack::spinner();
        spinner.start(description);
        self.spinner = Some(spinner);
        self.description = description.to_string();
    }

    fn finished(&mut self, _step: Step) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(&self.description);
        }
    }

    fn failed(&mut self, step: Step, _error: &ScaffoldError) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(format!("{} failed", step));
        }
    }

    fn install_skipped(&mut self) {
        let _ = cliclack::log::remark("Skipping install.".dimmed());
    }
}

fn print_warnings(report: &Report) -> Result<()> {
    for warning in &report.warnings {
        cliclack::log::warning(format!("{}: {}", warning.step, warning.message))?;
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    scaffold: &Scaffold,
    report: &Report,
) -> Result<()> {
    let steps = config.next_steps(scaffold.dir(), scaffold.project(), report.install_skipped);

    let (r, g, b) = RUBY_RED;
    println!();
    println!("  {}", "Done! Now run:".truecolor(r, g, b).bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    if report.is_clean() {
        cliclack::outro("Happy coding!")?;
    } else {
        cliclack::outro(format!(
            "Project created with {} warning(s). Re-run the failed commands inside the project.",
            report.warnings.len()
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_prompt_maps_to_cancelled() {
        let result: io::Result<bool> = Err(io::Error::from(io::ErrorKind::Interrupted));
        let err = result.or_cancel().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::Cancelled)
        ));
    }

    #[test]
    fn test_other_prompt_errors_pass_through() {
        let result: io::Result<bool> = Err(io::Error::from(io::ErrorKind::BrokenPipe));
        let err = result.or_cancel().unwrap_err();
        assert!(err.downcast_ref::<ScaffoldError>().is_none());
        assert!(err.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_default_args_enable_git() {
        let args = CreateArgs::default();
        assert!(args.git);
        assert!(!args.yes);
        assert_eq!(args.install, None);
    }

    #[test]
    fn test_presets_skip_prompts() {
        let framework =
            select_choice("Select a framework", &Framework::ALL, Some(Framework::Flask), false)
                .unwrap();
        assert_eq!(framework, Framework::Flask);

        let linter = select_choice("Select a linter", &Linter::ALL, None, true).unwrap();
        assert_eq!(linter, Linter::Ruff);

        let install = confirm_install(&CreateArgs {
            install: Some(false),
            ..CreateArgs::default()
        })
        .unwrap();
        assert!(!install);
    }
}
