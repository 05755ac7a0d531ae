#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod ffmpeg;
pub mod frames;
pub mod logging;
pub mod pixels;
pub mod resize;
pub mod tiler;

pub use error::{ToolError, ToolResult};
pub use ffmpeg::Ffmpeg;
pub use frames::{ExtractedFrames, extract_frames, list_frames};
pub use pixels::{PixelDumpRequest, extract_pixels, write_pixel_dump};
pub use resize::{ResizeRequest, resize_in_place};
pub use tiler::{ContactSheet, TileGrid, TileRequest, TileSummary, tile_video};
