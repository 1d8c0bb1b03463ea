//! External tool checks and installation
//!
//! Scaffolding cannot start without `uv`, so the prompt flow checks for it first and
//! can run the official installer on request.

use anyhow::Result;
use colored::Colorize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Installer scripts download a static binary; give slow links a minute
const INSTALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Description of a CLI tool the scaffolder shells out to
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Binary name on PATH
    pub name: &'static str,
    pub display_name: &'static str,
    pub install_script_url: &'static str,
    pub docs_url: &'static str,
}

/// Checks for and installs a single tool
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Shell pipeline that runs the installer
    pub fn install_command(&self) -> String {
        format!("curl -LsSf {} | sh", self.config.install_script_url)
    }

    /// Whether `<name> --version` runs successfully
    pub fn is_installed(&self) -> bool {
        self.version().is_some()
    }

    /// Trimmed `--version` output, e.g. `uv 0.5.11`
    pub fn version(&self) -> Option<String> {
        let output = std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8(output.stdout)
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Run the install script, streaming its output
    pub async fn install(&self) -> Result<()> {
        let cmd = self.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new("sh")
            .arg("-c")
            .arg(&cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            anyhow::bail!("Failed to capture installer output");
        };
        let mut stdout_lines = BufReader::new(stdout).lines();
        let mut stderr_lines = BufReader::new(stderr).lines();

        let stream = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_lines.next_line(), if stdout_open => match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    },
                    line = stderr_lines.next_line(), if stderr_open => match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    },
                }
            }
            child.wait().await
        };

        let status = match timeout(INSTALL_TIMEOUT, stream).await {
            Ok(status) => status?,
            Err(_) => {
                println!();
                anyhow::bail!(
                    "Installation timed out after {} seconds.\n\
                     Please try again later or install manually:\n\
                     {}",
                    INSTALL_TIMEOUT.as_secs(),
                    cmd
                );
            }
        };

        println!();
        if !status.success() {
            anyhow::bail!(
                "Installation failed with exit code: {}\n\
                 Please try installing manually: {}",
                status.code().unwrap_or(-1),
                cmd
            );
        }
        Ok(())
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} documentation in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for uv
pub fn uv_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "uv",
        display_name: "uv",
        install_script_url: "https://astral.sh/uv/install.sh",
        docs_url: "https://docs.astral.sh/uv/",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_install_command() {
        assert_eq!(
            uv_tool().install_command(),
            "curl -LsSf https://astral.sh/uv/install.sh | sh"
        );
    }

    #[test]
    fn test_missing_tool_is_not_installed() {
        let tool = ToolManager::new(ToolConfig {
            name: "definitely-not-a-real-binary-7c1e",
            display_name: "nothing",
            install_script_url: "https://example.invalid/install.sh",
            docs_url: "https://example.invalid",
        });
        assert!(!tool.is_installed());
        assert_eq!(tool.version(), None);
    }
}
