//! # zentiles
//!
//! Single-resolution fallback tile source for ordinary raster images.
//!
//! Tiled-image servers normally read pyramidal formats that are already cut
//! into tiles. This crate serves the images that are not: plain PNG, JPEG and
//! WebP files. Each image is decoded once through the [`image`] crate, and
//! tiles are copied out of the decoded bitmap on demand.
//!
//! ## Tiling
//!
//! There is exactly one resolution. Under the default
//! [`TilePolicy::SquareWithRemainder`], a square image is one tile and a
//! non-square image is two: a leading square of side `min(width, height)`,
//! then the remainder along the longer axis. [`TilePolicy::WholeImage`] makes
//! every image a single tile. Always use the dimensions on the returned
//! [`TileBuffer`]; the remainder tile is smaller than the nominal tile size.
//!
//! ## Colour
//!
//! sRGB, greyscale and CIELAB images are served as they are. Anything else
//! (16-bit, floating point) is converted to 8-bit sRGB on the first tile
//! request, with one warning sent to the configured [`LogSink`].
//!
//! ## Limits
//!
//! [`BackendConfig::default`] refuses images whose decoded bitmap would exceed
//! [`DEFAULT_MAX_DECODED_BYTES`]. The check runs on the header, before pixels
//! are decoded.
//!
//! ## Non-Goals
//!
//! - Codecs (decoding is the `image` crate's job)
//! - Resolution pyramids
//! - Content sniffing for the format gate: only the file extension is checked
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use zentiles::{BackendRegistry, ImageBackend, TileRequest};
//!
//! let registry = BackendRegistry::default();
//! let mut image = registry.open(Path::new("photo.jpg"))?;
//!
//! let meta = image.metadata()?;
//! println!("{}x{}, tile {}", meta.width, meta.height, meta.tile_width);
//!
//! let tile = image.get_tile(TileRequest::new(0))?;
//! assert_eq!(tile.len(), (tile.width * tile.height * tile.channels) as usize);
//! image.close();
//! # Ok::<(), zentiles::TileError>(())
//! ```

#![forbid(unsafe_code)]

mod backend;
mod config;
mod decode;
mod error;
mod fallback;
mod format;
mod limits;
mod pixel;
mod tile;
mod tiling;

// Re-exports
pub use backend::{BackendRegistry, ImageBackend, ImageMetadata};
pub use config::{BackendConfig, LogSink};
pub use decode::{ImageInfo, probe};
pub use error::TileError;
pub use fallback::FallbackImage;
pub use format::SourceFormat;
pub use limits::{DEFAULT_MAX_DECODED_BYTES, Limits};
pub use pixel::{BandFormat, ColourSpace, Interpretation, SampleType};
pub use tile::{TileBuffer, TileRequest};
pub use tiling::{Region, TileLayout, TilePolicy};
