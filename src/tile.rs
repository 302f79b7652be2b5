use std::path::{Path, PathBuf};

use crate::pixel::{ColourSpace, SampleType};
use crate::tiling::Region;

/// Addressing of one tile, as supplied by the host server.
///
/// `sequence` and `angle` are passed through to the [`TileBuffer`]. `layer` is
/// accepted for compatibility with layered sources and ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileRequest {
    pub sequence: i32,
    pub angle: i32,
    pub resolution: u32,
    pub layer: i32,
    pub tile: u32,
}

impl TileRequest {
    /// Request `tile` at resolution 0.
    pub fn new(tile: u32) -> Self {
        Self {
            tile,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_view(mut self, sequence: i32, angle: i32) -> Self {
        self.sequence = sequence;
        self.angle = angle;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }
}

/// Pixel data for one tile. Owned by the caller.
///
/// `width` and `height` are the real extent of `data`, which for the
/// remainder tile of a non-square image differs from the nominal tile size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBuffer {
    pub tile: u32,
    pub resolution: u32,
    pub sequence: i32,
    pub angle: i32,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub bits_per_channel: u32,
    pub sample_type: SampleType,
    pub colour_space: ColourSpace,
    /// Image the tile was cut from.
    pub path: PathBuf,
    data: Vec<u8>,
}

impl TileBuffer {
    pub(crate) fn new(
        request: &TileRequest,
        region: Region,
        format: PixelFormat,
        path: &Path,
        data: Vec<u8>,
    ) -> Self {
        Self {
            tile: request.tile,
            resolution: request.resolution,
            sequence: request.sequence,
            angle: request.angle,
            width: region.width,
            height: region.height,
            channels: format.channels,
            bits_per_channel: format.bits_per_channel,
            sample_type: format.sample_type,
            colour_space: format.colour_space,
            path: path.to_path_buf(),
            data,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Size of the pixel data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sample layout shared by every tile of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelFormat {
    pub channels: u32,
    pub bits_per_channel: u32,
    pub sample_type: SampleType,
    pub colour_space: ColourSpace,
}

impl PixelFormat {
    pub(crate) fn bytes_per_pixel(&self) -> usize {
        self.channels as usize * (self.bits_per_channel as usize / 8)
    }
}

/// Copy `region` out of a row-major image into a new, exactly sized buffer.
///
/// Returns `None` if `data` does not cover the image or the region falls
/// outside it.
pub(crate) fn copy_region(
    data: &[u8],
    image_width: u32,
    image_height: u32,
    bytes_per_pixel: usize,
    region: Region,
) -> Option<Vec<u8>> {
    let stride = (image_width as usize).checked_mul(bytes_per_pixel)?;
    let image_bytes = stride.checked_mul(image_height as usize)?;
    let pixels = data.get(..image_bytes)?;
    if region.x.checked_add(region.width)? > image_width
        || region.y.checked_add(region.height)? > image_height
    {
        return None;
    }

    let row_len = region.width as usize * bytes_per_pixel;
    let len = row_len.checked_mul(region.height as usize)?;
    // Zero-filled before the rows are copied in.
    let mut out = vec![0u8; len];
    if len == 0 {
        return Some(out);
    }

    let full = imgref::ImgRef::new(pixels, stride, image_height as usize);
    let view = full.sub_image(
        region.x as usize * bytes_per_pixel,
        region.y as usize,
        row_len,
        region.height as usize,
    );
    for (dst, src) in out.chunks_exact_mut(row_len).zip(view.rows()) {
        dst.copy_from_slice(src);
    }
    Some(out)
}
