/// Decoded-size ceiling applied by [`Limits::size_guarded`].
///
/// This backend only serves small and medium images; anything bigger belongs
/// to a pyramid-aware source.
pub const DEFAULT_MAX_DECODED_BYTES: u64 = 50_000_000;

/// Resource limits checked at open time, before any pixel is decoded.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the fully decoded bitmap, in bytes.
    pub max_decoded_bytes: Option<u64>,
}

impl Limits {
    /// Limits with only the default decoded-size ceiling set.
    pub fn size_guarded() -> Self {
        Self {
            max_decoded_bytes: Some(DEFAULT_MAX_DECODED_BYTES),
            ..Self::default()
        }
    }

    /// Replace the decoded-size ceiling.
    pub fn with_max_decoded_bytes(mut self, bytes: Option<u64>) -> Self {
        self.max_decoded_bytes = bytes;
        self
    }

    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::TileError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::TileError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::TileError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::TileError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check the full decoded size against the ceiling.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), crate::TileError> {
        if let Some(limit) = self.max_decoded_bytes {
            if bytes > limit {
                return Err(crate::TileError::ImageTooLarge { bytes, limit });
            }
        }
        Ok(())
    }
}
