use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};

use crate::error::TileError;
use crate::limits::Limits;
use crate::pixel::{BandFormat, Interpretation};

/// Header information, read without decoding any pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Container format detected from the file content.
    pub format: Option<ImageFormat>,
    pub channels: u32,
    pub band_format: BandFormat,
    pub interpretation: Interpretation,
    /// Largest bitmap held for this image: the native decode, or the 8-bit
    /// sRGB copy if the colour space has to be converted.
    pub decoded_bytes: u64,
}

impl ImageInfo {
    fn from_decoder(
        decoder: &impl ImageDecoder,
        format: Option<ImageFormat>,
    ) -> Result<Self, TileError> {
        let (width, height) = decoder.dimensions();
        let color = decoder.color_type();
        let band_format = BandFormat::from_color_type(color)
            .ok_or_else(|| TileError::UnsupportedSampleFormat(format!("{color:?}")))?;
        let interpretation = Interpretation::from_color_type(color);
        let mut bytes_per_pixel = u64::from(color.bytes_per_pixel());
        if interpretation.colour_space().is_none() {
            let srgb_channels = if color.has_alpha() { 4 } else { 3 };
            bytes_per_pixel = bytes_per_pixel.max(srgb_channels);
        }
        let decoded_bytes = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
            .ok_or(TileError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            format,
            channels: u32::from(color.channel_count()),
            band_format,
            interpretation,
            decoded_bytes,
        })
    }

    /// Reject empty images and anything over `limits`.
    fn check(&self, limits: &Limits) -> Result<(), TileError> {
        if self.width == 0 || self.height == 0 {
            return Err(TileError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        limits.check(self.width, self.height)?;
        limits.check_memory(self.decoded_bytes)
    }
}

/// Read the header of `path` without decoding pixels.
///
/// Performs no extension check; see [`SourceFormat`](crate::SourceFormat).
pub fn probe(path: &Path) -> Result<ImageInfo, TileError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let decoder = reader.into_decoder()?;
    ImageInfo::from_decoder(&decoder, format)
}

/// Exclusive owner of one decoded image.
#[derive(Debug)]
pub(crate) struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    /// Open `path` for a single forward pass.
    ///
    /// The header is inspected first and checked against `limits`; pixels are
    /// only decoded once the image is known to fit.
    pub(crate) fn open_sequential(
        path: &Path,
        limits: &Limits,
    ) -> Result<(ImageInfo, Self), TileError> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format();
        let decoder = reader.into_decoder()?;
        let info = ImageInfo::from_decoder(&decoder, format)?;
        info.check(limits)?;
        let image = DynamicImage::from_decoder(decoder)?;
        Ok((info, Self { image }))
    }

    #[cfg(test)]
    pub(crate) fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    pub(crate) fn width(&self) -> u32 {
        self.image.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.image.height()
    }

    pub(crate) fn bands(&self) -> u32 {
        u32::from(self.image.color().channel_count())
    }

    pub(crate) fn band_format(&self) -> Option<BandFormat> {
        BandFormat::from_color_type(self.image.color())
    }

    pub(crate) fn interpretation(&self) -> Interpretation {
        Interpretation::from_color_type(self.image.color())
    }

    /// Raw samples in row-major order, or `None` if the decoded buffer does
    /// not cover the whole image.
    pub(crate) fn data(&self) -> Option<&[u8]> {
        let expected = (self.width() as usize)
            .checked_mul(self.height() as usize)?
            .checked_mul(usize::from(self.image.color().bytes_per_pixel()))?;
        let bytes = self.image.as_bytes();
        (bytes.len() >= expected).then_some(bytes)
    }

    /// Convert to 8-bit sRGB, keeping alpha if present.
    pub(crate) fn to_srgb(&self) -> Self {
        let image = if self.image.color().has_alpha() {
            DynamicImage::ImageRgba8(self.image.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(self.image.to_rgb8())
        };
        Self { image }
    }
}
