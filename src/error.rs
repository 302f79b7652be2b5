use std::path::PathBuf;

/// Errors from opening images and producing tiles.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TileError {
    #[error("unsupported image type: {0}")]
    UnsupportedFormat(String),

    #[error("image too large: {bytes} decoded bytes exceeds limit {limit}")]
    ImageTooLarge { bytes: u64, limit: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("unsupported image data type: {0}")]
    UnsupportedSampleFormat(String),

    #[error("unable to read image {}", path.display())]
    DecodeRead { path: PathBuf },

    #[error("invalid resolution {resolution}: image has {available} resolution(s)")]
    InvalidResolution { resolution: u32, available: u32 },

    #[error("invalid tile index {tile}: image has {count} tile(s)")]
    InvalidTileIndex { tile: u32, count: u32 },

    #[error("image is not open")]
    NotOpen,

    #[error("image was already opened")]
    AlreadyOpened,

    #[error("image has been closed")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
}
