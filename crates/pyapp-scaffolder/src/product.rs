//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to brand the prompt flow and to phrase the
//! instructions printed once the project exists.

use crate::project::{ProjectConfig, DEFAULT_PROJECT_NAME};
use std::path::Path;

pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Title shown in the intro banner
    fn display_name(&self) -> &'static str;

    /// Name used when the project name prompt is left blank
    fn default_project_name(&self) -> &'static str {
        DEFAULT_PROJECT_NAME
    }

    /// The "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, project: &ProjectConfig, install_skipped: bool) -> Vec<String>;
}
