//! Flags and exit handling shared by the binaries.

use std::path::PathBuf;

use clap::Args;

use crate::{
    error::{ToolError, ToolResult},
    ffmpeg::{DEFAULT_FFMPEG, Ffmpeg},
};

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct FfmpegArgs {
    /// ffmpeg binary to run.
    #[arg(long = "ffmpeg", env = "FRAMEKIT_FFMPEG", default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}

impl FfmpegArgs {
    pub fn ffmpeg(&self) -> Ffmpeg {
        Ffmpeg::new(&self.ffmpeg)
    }
}

/// Validation failures are reported on stdout and end the run normally;
/// everything else propagates as a process failure.
pub fn finish<T>(result: ToolResult<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(ToolError::Validation(msg)) => {
            println!("{msg}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
