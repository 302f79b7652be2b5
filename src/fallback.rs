//! Single-resolution backend for ordinary raster images.
//!
//! Serves PNG, JPEG and WebP files that have no internal tiling or pyramid.
//! The whole image is decoded at open time (subject to
//! [`Limits`](crate::Limits)), and tiles are cut from the decoded bitmap.
//! With the default [`TilePolicy`](crate::TilePolicy) a square image is a
//! single tile and a non-square one is a leading square plus a remainder.
//!
//! The colour space is resolved on the first tile request rather than at
//! open: images outside sRGB, greyscale and CIELAB are converted to 8-bit
//! sRGB then, once, and a warning is sent to the configured
//! [`LogSink`](crate::LogSink).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::backend::{ImageBackend, ImageMetadata};
use crate::config::{BackendConfig, LogSink};
use crate::decode::DecodedImage;
use crate::error::TileError;
use crate::format::SourceFormat;
use crate::pixel::ColourSpace;
use crate::tile::{PixelFormat, TileBuffer, TileRequest, copy_region};
use crate::tiling::TileLayout;

pub(crate) const BACKEND_NAME: &str = "fallback";

pub(crate) fn construct(path: &Path, config: &BackendConfig) -> Box<dyn ImageBackend> {
    Box::new(FallbackImage::new(path, config.clone()))
}

enum State {
    Unopened,
    Open(OpenImage),
    /// Open was attempted and failed; the handle is unusable.
    Failed,
    Closed,
}

struct OpenImage {
    image: DecodedImage,
    layout: TileLayout,
    metadata: ImageMetadata,
}

impl OpenImage {
    fn load(path: &Path, config: &BackendConfig) -> Result<Self, TileError> {
        let format = SourceFormat::from_path(path)?;
        let (info, image) = DecodedImage::open_sequential(path, &config.limits)?;
        let (bits_per_channel, sample_type) = info.band_format.sample_layout();
        let layout = TileLayout::new(info.width, info.height, config.tile_policy);

        if let Some(detected) = info.format.filter(|&f| f != format.image_format()) {
            log::debug!(
                target: "zentiles",
                "{} has a {format:?} extension but decodes as {detected:?}",
                path.display(),
            );
        }

        log::debug!(
            target: "zentiles",
            "opened {} ({format:?}): {}x{}, {} x {:?}, {} tile(s) of {}x{}",
            path.display(),
            info.width,
            info.height,
            info.channels,
            info.band_format,
            layout.tile_count(),
            layout.tile_width,
            layout.tile_height,
        );

        let metadata = ImageMetadata {
            width: info.width,
            height: info.height,
            tile_width: layout.tile_width,
            tile_height: layout.tile_height,
            channels: info.channels,
            bits_per_channel,
            sample_type,
            colour_space: ColourSpace::None,
            num_resolutions: 1,
            image_widths: vec![info.width],
            image_heights: vec![info.height],
            tile_widths: vec![layout.tile_width],
            tile_heights: vec![layout.tile_height],
        };
        Ok(Self {
            image,
            layout,
            metadata,
        })
    }

    /// Settle the colour space. Converts to sRGB at most once: after a
    /// conversion the image reads back as sRGB.
    fn normalize_colour(&mut self, path: &Path, log: &LogSink) {
        let interpretation = self.image.interpretation();
        if let Some(space) = interpretation.colour_space() {
            self.metadata.colour_space = space;
            return;
        }

        log.warn(&format!(
            "Unsupported colour space {interpretation:?} in {}: conversion to sRGB",
            path.display()
        ));
        self.image = self.image.to_srgb();
        self.metadata.colour_space = ColourSpace::Srgb;
        self.metadata.channels = self.image.bands();
        if let Some(band_format) = self.image.band_format() {
            let (bits, sample_type) = band_format.sample_layout();
            self.metadata.bits_per_channel = bits;
            self.metadata.sample_type = sample_type;
        }
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat {
            channels: self.metadata.channels,
            bits_per_channel: self.metadata.bits_per_channel,
            sample_type: self.metadata.sample_type,
            colour_space: self.metadata.colour_space,
        }
    }
}

/// An image served by the fallback backend.
pub struct FallbackImage {
    path: PathBuf,
    config: BackendConfig,
    state: State,
}

impl FallbackImage {
    /// Create an unopened handle for `path`.
    pub fn new(path: &Path, config: BackendConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            config,
            state: State::Unopened,
        }
    }

    /// Create a handle and open it.
    pub fn open_path(path: &Path, config: BackendConfig) -> Result<Self, TileError> {
        let mut image = Self::new(path, config);
        image.open()?;
        Ok(image)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }
}

impl ImageBackend for FallbackImage {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&mut self) -> Result<(), TileError> {
        match self.state {
            State::Unopened => {}
            State::Closed => return Err(TileError::Closed),
            State::Open(_) | State::Failed => return Err(TileError::AlreadyOpened),
        }
        match OpenImage::load(&self.path, &self.config) {
            Ok(open) => {
                self.state = State::Open(open);
                Ok(())
            }
            Err(e) => {
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    fn close(&mut self) {
        self.state = State::Closed;
    }

    fn metadata(&self) -> Result<&ImageMetadata, TileError> {
        match &self.state {
            State::Open(open) => Ok(&open.metadata),
            State::Closed => Err(TileError::Closed),
            State::Unopened | State::Failed => Err(TileError::NotOpen),
        }
    }

    fn get_tile(&mut self, request: TileRequest) -> Result<TileBuffer, TileError> {
        let open = match &mut self.state {
            State::Open(open) => open,
            State::Closed => return Err(TileError::Closed),
            State::Unopened | State::Failed => return Err(TileError::NotOpen),
        };

        open.normalize_colour(&self.path, &self.config.log);

        let available = open.metadata.num_resolutions;
        if request.resolution >= available {
            return Err(TileError::InvalidResolution {
                resolution: request.resolution,
                available,
            });
        }

        let region = open.layout.region(request.tile)?;
        let format = open.pixel_format();
        let data = open
            .image
            .data()
            .and_then(|pixels| {
                copy_region(
                    pixels,
                    open.image.width(),
                    open.image.height(),
                    format.bytes_per_pixel(),
                    region,
                )
            })
            .ok_or_else(|| TileError::DecodeRead {
                path: self.path.clone(),
            })?;

        Ok(TileBuffer::new(&request, region, format, &self.path, data))
    }
}

impl fmt::Debug for FallbackImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Unopened => "unopened",
            State::Open(_) => "open",
            State::Failed => "failed",
            State::Closed => "closed",
        };
        f.debug_struct("FallbackImage")
            .field("path", &self.path)
            .field("state", &state)
            .field("config", &self.config)
            .finish()
    }
}
