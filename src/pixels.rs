//! Plain-text RGBA dumps.
//!
//! Format: a `[width,height]` header, then one line per image row (top to
//! bottom), each line the concatenation of `[R,G,B,A]` tokens left to right.
//! Rows are introduced by a newline, so there is no trailing newline.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{DynamicImage, GenericImageView as _};

use crate::{
    error::{ToolError, ToolResult},
    ffmpeg::ensure_parent_dir,
};

#[derive(Clone, Debug)]
pub struct PixelDumpRequest {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl PixelDumpRequest {
    pub fn validate(&self) -> ToolResult<()> {
        if !self.input.exists() {
            return Err(ToolError::validation(format!(
                "input file '{}' does not exist",
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Streams `img` in the dump format. Pixels are read through 8-bit RGBA, so
/// images without an alpha channel report 255.
pub fn write_pixel_dump<W: Write>(img: &DynamicImage, mut out: W) -> std::io::Result<()> {
    let (width, height) = img.dimensions();
    write!(out, "[{width},{height}]")?;
    for y in 0..height {
        out.write_all(b"\n")?;
        for x in 0..width {
            let [r, g, b, a] = img.get_pixel(x, y).0;
            write!(out, "[{r},{g},{b},{a}]")?;
        }
    }
    out.flush()
}

pub fn decode_image(path: &Path) -> ToolResult<DynamicImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format of '{}'", path.display()))?;
    reader
        .decode()
        .map_err(|e| ToolError::image(format!("decode '{}': {e}", path.display())))
}

/// Returns the dimensions of the dumped image.
#[tracing::instrument(fields(input = %req.input.display(), output = %req.output.display()))]
pub fn extract_pixels(req: &PixelDumpRequest) -> ToolResult<(u32, u32)> {
    req.validate()?;

    let img = decode_image(&req.input)?;
    let (width, height) = img.dimensions();
    tracing::info!(width, height, color = ?img.color(), "decoded image");

    ensure_parent_dir(&req.output)?;
    let file = File::create(&req.output)
        .with_context(|| format!("create '{}'", req.output.display()))?;
    write_pixel_dump(&img, BufWriter::new(file))
        .with_context(|| format!("write pixel dump '{}'", req.output.display()))?;

    tracing::info!("wrote pixel dump");
    Ok((width, height))
}
