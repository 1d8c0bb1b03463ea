//! Runtime detection and tool management
//!
//! This module provides:
//! - Python interpreter version detection
//! - Tool checks and installation for `uv`

pub mod python;
pub mod tool;

pub use python::{detect as detect_python, PythonVersion, MINIMUM_PYTHON};
pub use tool::{uv_tool, ToolConfig, ToolManager};
