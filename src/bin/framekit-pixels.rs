use std::path::PathBuf;

use clap::Parser;
use framekit::{
    PixelDumpRequest,
    cli::{LogArgs, finish},
};

/// Dump every pixel of an image as `[R,G,B,A]` text.
#[derive(Parser, Debug)]
#[command(name = "framekit-pixels", version)]
struct Cli {
    /// Image to read.
    #[arg(short = 'i', long = "input_file", visible_alias = "input-file")]
    input_file: PathBuf,

    /// Text file to write (overwritten).
    #[arg(short = 'o', long = "output_file", visible_alias = "output-file")]
    output_file: PathBuf,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    framekit::logging::init(cli.log.verbose);

    let req = PixelDumpRequest {
        input: cli.input_file,
        output: cli.output_file,
    };
    if let Some((width, height)) = finish(framekit::extract_pixels(&req))? {
        eprintln!("wrote {} ({width}x{height})", req.output.display());
    }
    Ok(())
}
