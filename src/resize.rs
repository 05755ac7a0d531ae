use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    error::{ToolError, ToolResult},
    ffmpeg::Ffmpeg,
};

pub const MIN_COMPRESSION: i64 = 1;
pub const MAX_COMPRESSION: i64 = 9;

#[derive(Clone, Debug)]
pub struct ResizeRequest {
    pub input: PathBuf,
    /// Edge length of the square output, in pixels.
    pub resolution: u32,
    /// ffmpeg `-q` value; 1 is best quality. Parsed wide so out-of-range
    /// input reaches [`ResizeRequest::validate`] instead of the arg parser.
    pub compression: i64,
}

impl ResizeRequest {
    pub fn validate(&self) -> ToolResult<()> {
        if !self.input.exists() {
            return Err(ToolError::validation(format!(
                "input file '{}' does not exist",
                self.input.display()
            )));
        }
        if !self.input.is_file() {
            return Err(ToolError::validation(format!(
                "input '{}' is not a regular file",
                self.input.display()
            )));
        }
        if self
            .input
            .file_name()
            .is_some_and(|n| n.to_string_lossy().contains('%'))
        {
            // ffmpeg's image2 muxer reads `%d`-style names as sequence patterns.
            return Err(ToolError::validation(format!(
                "input '{}' contains '%', which ffmpeg treats as a sequence pattern; rename it first",
                self.input.display()
            )));
        }
        if self.resolution == 0 {
            return Err(ToolError::validation("resolution must be non-zero"));
        }
        if !(MIN_COMPRESSION..=MAX_COMPRESSION).contains(&self.compression) {
            return Err(ToolError::validation(format!(
                "compression must be between {MIN_COMPRESSION} and {MAX_COMPRESSION} (got {})",
                self.compression
            )));
        }
        Ok(())
    }
}

/// `photo.jpg` -> `photo_backup.jpg`, next to the original.
pub fn backup_path(input: &Path) -> ToolResult<PathBuf> {
    let stem = input.file_stem().ok_or_else(|| {
        ToolError::validation(format!("input '{}' has no file name", input.display()))
    })?;

    let mut name = OsString::from(stem);
    name.push("_backup");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(input.with_file_name(name))
}

pub fn transcode_args(
    backup: &Path,
    output: &Path,
    resolution: u32,
    compression: i64,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        backup.into(),
        "-vf".into(),
        format!("scale={resolution}:{resolution}").into(),
    ];
    if compression == MIN_COMPRESSION {
        // `-q 1` alone is clamped by the encoder's default qmin of 2.
        args.extend(["-qmin".into(), "1".into()]);
    }
    args.extend(["-q".into(), compression.to_string().into(), output.into()]);
    args
}

/// The original file parked under its backup name.
///
/// Dropping the guard without [`BackupGuard::commit`] puts the original back,
/// discarding whatever was written at the original path in the meantime.
#[derive(Debug)]
pub struct BackupGuard {
    original: PathBuf,
    backup: PathBuf,
    armed: bool,
}

impl BackupGuard {
    pub fn park(original: &Path, backup: &Path) -> ToolResult<Self> {
        if backup.exists() {
            return Err(ToolError::validation(format!(
                "backup file '{}' already exists; remove it first",
                backup.display()
            )));
        }
        std::fs::rename(original, backup).with_context(|| {
            format!(
                "rename '{}' to '{}'",
                original.display(),
                backup.display()
            )
        })?;
        Ok(Self {
            original: original.to_path_buf(),
            backup: backup.to_path_buf(),
            armed: true,
        })
    }

    pub fn backup(&self) -> &Path {
        &self.backup
    }

    /// Keeps the new file and deletes the backup.
    pub fn commit(mut self) -> ToolResult<()> {
        self.armed = false;
        std::fs::remove_file(&self.backup)
            .with_context(|| format!("remove backup '{}'", self.backup.display()))?;
        Ok(())
    }

    fn restore(&self) -> std::io::Result<()> {
        if self.original.exists() {
            std::fs::remove_file(&self.original)?;
        }
        std::fs::rename(&self.backup, &self.original)
    }
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.restore() {
            Ok(()) => tracing::warn!(
                path = %self.original.display(),
                "resize failed; restored original file"
            ),
            Err(e) => tracing::error!(
                path = %self.original.display(),
                backup = %self.backup.display(),
                "resize failed and restoring the original also failed: {e}"
            ),
        }
    }
}

#[tracing::instrument(skip(ffmpeg), fields(input = %req.input.display()))]
pub fn resize_in_place(ffmpeg: &Ffmpeg, req: &ResizeRequest) -> ToolResult<()> {
    req.validate()?;
    let backup = backup_path(&req.input)?;
    ffmpeg.ensure_available()?;

    let guard = BackupGuard::park(&req.input, &backup)?;
    tracing::info!(backup = %guard.backup().display(), "original moved aside");

    let args = transcode_args(guard.backup(), &req.input, req.resolution, req.compression);
    ffmpeg.run(&args)?;

    if !req.input.is_file() {
        return Err(ToolError::transcode(format!(
            "ffmpeg reported success but produced no '{}'",
            req.input.display()
        )));
    }

    guard.commit()?;
    tracing::info!(
        resolution = req.resolution,
        compression = req.compression,
        "resized in place"
    );
    Ok(())
}
