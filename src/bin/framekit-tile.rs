use std::path::PathBuf;

use clap::Parser;
use framekit::{
    TileRequest,
    cli::{FfmpegArgs, LogArgs, finish},
    tiler::{DEFAULT_FRAME_RATE, DEFAULT_WIDTH_COUNT},
};

/// Tile the frames of a video into one contact-sheet image (requires `ffmpeg` on PATH).
#[derive(Parser, Debug)]
#[command(name = "framekit-tile", version)]
struct Cli {
    /// Video to sample.
    #[arg(short = 'i', long = "input_file", visible_alias = "input-file")]
    input_file: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(short = 'o', long = "output_file", visible_alias = "output-file")]
    output_file: PathBuf,

    /// Frames extracted per second of video.
    #[arg(short = 'f', long = "frame_rate", visible_alias = "frame-rate", default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: u32,

    /// Frames per canvas row.
    #[arg(short = 'w', long = "width_count", visible_alias = "width-count", default_value_t = DEFAULT_WIDTH_COUNT)]
    width_count: u32,

    #[command(flatten)]
    ffmpeg: FfmpegArgs,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    framekit::logging::init(cli.log.verbose);

    let req = TileRequest {
        input: cli.input_file,
        output: cli.output_file,
        frame_rate: cli.frame_rate,
        width_count: cli.width_count,
    };
    if let Some(summary) = finish(framekit::tile_video(&cli.ffmpeg.ffmpeg(), &req))? {
        let (w, h) = summary.grid.canvas_size();
        eprintln!(
            "wrote {} ({} frames, {}x{} grid, {w}x{h})",
            req.output.display(),
            summary.frame_count,
            summary.grid.columns,
            summary.grid.rows
        );
    }
    Ok(())
}
