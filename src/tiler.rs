use std::path::PathBuf;

use image::{DynamicImage, GenericImageView as _, Rgb, RgbImage, imageops};

use crate::{
    error::{ToolError, ToolResult},
    ffmpeg::{Ffmpeg, ensure_parent_dir},
    frames::extract_frames,
    pixels::decode_image,
};

pub const CANVAS_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_WIDTH_COUNT: u32 = 10;

#[derive(Clone, Debug)]
pub struct TileRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frame_rate: u32,
    /// Frames per canvas row.
    pub width_count: u32,
}

impl TileRequest {
    pub fn validate(&self) -> ToolResult<()> {
        if !self.input.exists() {
            return Err(ToolError::validation(format!(
                "input file '{}' does not exist",
                self.input.display()
            )));
        }
        if self.frame_rate == 0 {
            return Err(ToolError::validation("frame rate must be non-zero"));
        }
        if self.width_count == 0 {
            return Err(ToolError::validation("width count must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSummary {
    pub frame_count: usize,
    pub grid: TileGrid,
}

#[tracing::instrument(
    skip(ffmpeg),
    fields(input = %req.input.display(), output = %req.output.display())
)]
pub fn tile_video(ffmpeg: &Ffmpeg, req: &TileRequest) -> ToolResult<TileSummary> {
    req.validate()?;
    ffmpeg.ensure_available()?;

    let frames = extract_frames(ffmpeg, &req.input, req.frame_rate)?;
    let Some(first_path) = frames.paths().first() else {
        return Err(ToolError::transcode(format!(
            "ffmpeg extracted no frames from '{}'",
            req.input.display()
        )));
    };

    let first = decode_image(first_path)?;
    let (frame_width, frame_height) = first.dimensions();
    let grid = TileGrid::new(frames.len(), req.width_count, frame_width, frame_height)?;
    tracing::info!(
        frames = frames.len(),
        columns = grid.columns,
        rows = grid.rows,
        "tiling"
    );

    let mut sheet = ContactSheet::new(grid);
    sheet.paste(0, &first)?;
    drop(first);
    for (index, path) in frames.paths().iter().enumerate().skip(1) {
        let frame = decode_image(path)?;
        sheet.paste(index, &frame)?;
    }

    ensure_parent_dir(&req.output)?;
    sheet
        .into_image()
        .save(&req.output)
        .map_err(|e| ToolError::image(format!("save '{}': {e}", req.output.display())))?;

    tracing::info!("wrote contact sheet");
    Ok(TileSummary {
        frame_count: frames.len(),
        grid,
    })
}

/// Cell layout of a contact sheet: `columns` frames per row, as many rows as
/// the frame count needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    pub fn new(
        frame_count: usize,
        columns: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> ToolResult<Self> {
        if frame_count == 0 {
            return Err(ToolError::validation("no frames to tile"));
        }
        if columns == 0 {
            return Err(ToolError::validation("width count must be non-zero"));
        }
        if frame_width == 0 || frame_height == 0 {
            return Err(ToolError::validation("frame width/height must be non-zero"));
        }

        let rows = u32::try_from(frame_count.div_ceil(columns as usize))
            .map_err(|_| ToolError::validation("too many frames for one canvas"))?;

        let grid = Self {
            frame_width,
            frame_height,
            columns,
            rows,
        };
        if frame_width.checked_mul(columns).is_none() || frame_height.checked_mul(rows).is_none()
        {
            return Err(ToolError::validation(format!(
                "canvas of {columns}x{rows} frames at {frame_width}x{frame_height} is too large"
            )));
        }
        Ok(grid)
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.frame_width * self.columns,
            self.frame_height * self.rows,
        )
    }

    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Top-left pixel of the cell holding frame `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        let col = (index % columns) as u32;
        let row = (index / columns) as u32;
        (col * self.frame_width, row * self.frame_height)
    }
}

#[derive(Debug)]
pub struct ContactSheet {
    grid: TileGrid,
    canvas: RgbImage,
}

impl ContactSheet {
    pub fn new(grid: TileGrid) -> Self {
        let (width, height) = grid.canvas_size();
        Self {
            grid,
            canvas: RgbImage::from_pixel(width, height, CANVAS_BACKGROUND),
        }
    }

    /// Copies `frame` into its cell. Alpha is dropped, not blended.
    pub fn paste(&mut self, index: usize, frame: &DynamicImage) -> ToolResult<()> {
        if index >= self.grid.capacity() {
            return Err(ToolError::validation(format!(
                "frame index {index} is outside a {}x{} grid",
                self.grid.columns, self.grid.rows
            )));
        }
        let (w, h) = frame.dimensions();
        if (w, h) != (self.grid.frame_width, self.grid.frame_height) {
            return Err(ToolError::image(format!(
                "frame {index} is {w}x{h}, expected {}x{}",
                self.grid.frame_width, self.grid.frame_height
            )));
        }

        let (x, y) = self.grid.cell_origin(index);
        imageops::replace(&mut self.canvas, &frame.to_rgb8(), i64::from(x), i64::from(y));
        Ok(())
    }

    pub fn into_image(self) -> RgbImage {
        self.canvas
    }
}
