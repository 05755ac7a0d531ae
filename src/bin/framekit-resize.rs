use std::path::PathBuf;

use clap::Parser;
use framekit::{
    ResizeRequest,
    cli::{FfmpegArgs, LogArgs, finish},
};

/// Resize and recompress an image in place (requires `ffmpeg` on PATH).
#[derive(Parser, Debug)]
#[command(name = "framekit-resize", version)]
struct Cli {
    /// Image to resize; it is overwritten.
    #[arg(short = 'i', long = "input_file", visible_alias = "input-file")]
    input_file: PathBuf,

    /// Output edge length in pixels (the result is square).
    #[arg(short = 'r', long = "resolution")]
    resolution: u32,

    /// Compression level, 1 (best quality) to 9.
    #[arg(
        short = 'c',
        long = "compression",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    compression: i64,

    #[command(flatten)]
    ffmpeg: FfmpegArgs,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    framekit::logging::init(cli.log.verbose);

    let req = ResizeRequest {
        input: cli.input_file,
        resolution: cli.resolution,
        compression: cli.compression,
    };
    if finish(framekit::resize_in_place(&cli.ffmpeg.ffmpeg(), &req))?.is_some() {
        eprintln!("resized {}", req.input.display());
    }
    Ok(())
}
