use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::error::{ToolError, ToolResult};

pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Handle on the external `ffmpeg` binary.
///
/// We shell out to the system binary rather than linking libav, so the only
/// requirement is an executable on PATH (or an explicit path).
#[derive(Clone, Debug)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    pub fn ensure_available(&self) -> ToolResult<()> {
        if self.is_available() {
            return Ok(());
        }
        Err(ToolError::transcode(format!(
            "'{}' was not found or is not runnable (is ffmpeg installed and on PATH?)",
            self.program.display()
        )))
    }

    /// Runs ffmpeg to completion. A non-zero exit is an error carrying ffmpeg's stderr.
    pub fn run(&self, args: &[OsString]) -> ToolResult<()> {
        tracing::debug!(program = %self.program.display(), ?args, "running ffmpeg");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ToolError::transcode(format!(
                    "failed to spawn '{}': {e}",
                    self.program.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::transcode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

pub fn ensure_parent_dir(path: &Path) -> ToolResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
