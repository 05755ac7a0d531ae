use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use tempfile::TempDir;

use crate::{error::ToolResult, ffmpeg::Ffmpeg};

pub const FRAME_PREFIX: &str = "image_";
pub const FRAME_EXT: &str = "png";

/// ffmpeg output pattern; numbering starts at 1.
pub const FRAME_PATTERN: &str = "image_%03d.png";

pub fn extraction_args(input: &Path, frame_rate: u32, out_dir: &Path) -> Vec<OsString> {
    vec![
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        input.into(),
        "-vcodec".into(),
        "png".into(),
        "-r".into(),
        frame_rate.to_string().into(),
        out_dir.join(FRAME_PATTERN).into(),
    ]
}

/// Frame number encoded in a file name like `image_007.png`.
pub fn frame_number(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(FRAME_PREFIX)?
        .strip_suffix(FRAME_EXT)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Numbered frames in `dir`, in frame order. Unrelated files are ignored.
pub fn list_frames(dir: &Path) -> ToolResult<Vec<PathBuf>> {
    let mut numbered = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("read frame directory '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(n) = name.to_str().and_then(frame_number) else {
            continue;
        };
        numbered.push((n, entry.path()));
    }
    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, p)| p).collect())
}

/// Frames dumped by ffmpeg. The backing directory is deleted on drop.
#[derive(Debug)]
pub struct ExtractedFrames {
    dir: TempDir,
    frames: Vec<PathBuf>,
}

impl ExtractedFrames {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[tracing::instrument(skip(ffmpeg), fields(input = %input.display()))]
pub fn extract_frames(
    ffmpeg: &Ffmpeg,
    input: &Path,
    frame_rate: u32,
) -> ToolResult<ExtractedFrames> {
    let dir = tempfile::Builder::new()
        .prefix("framekit-frames-")
        .tempdir()
        .context("create temporary frame directory")?;

    ffmpeg.run(&extraction_args(input, frame_rate, dir.path()))?;

    let frames = list_frames(dir.path())?;
    tracing::info!(count = frames.len(), dir = %dir.path().display(), "extracted frames");
    Ok(ExtractedFrames { dir, frames })
}
