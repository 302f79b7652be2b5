use std::path::Path;

use crate::error::TileError;

/// Source formats this backend accepts, keyed by file extension.
///
/// The gate is on the extension only. The decoder itself sniffs content, so a
/// valid image with a foreign extension is rejected here, and a file with an
/// allowed extension but different content still reaches the decoder.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Webp,
}

impl SourceFormat {
    /// Look up a format by extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Gate a path on its extension.
    ///
    /// The extension is what [`Path::extension`] reports, so a bare dotfile
    /// such as `.png` has none and is rejected.
    pub fn from_path(path: &Path) -> Result<Self, TileError> {
        let Some(ext) = path.extension() else {
            return Err(TileError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            )));
        };
        let Some(ext) = ext.to_str() else {
            return Err(TileError::UnsupportedFormat(format!(
                "{} has a non-UTF-8 extension",
                path.display()
            )));
        };
        Self::from_extension(ext)
            .ok_or_else(|| TileError::UnsupportedFormat(format!(".{ext}")))
    }

    /// Whether a path passes the extension gate.
    pub fn accepts(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }

    /// The matching `image` crate format. The decoder detects the format from
    /// content, which can disagree with this.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Webp => image::ImageFormat::WebP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/b.png")).unwrap(),
            SourceFormat::Png
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("b.jpg")).unwrap(),
            SourceFormat::Jpeg
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("b.jpeg")).unwrap(),
            SourceFormat::Jpeg
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("b.webp")).unwrap(),
            SourceFormat::Webp
        );
    }

    #[test]
    fn extension_case_is_normalized() {
        assert_eq!(
            SourceFormat::from_path(Path::new("SCAN.JPG")).unwrap(),
            SourceFormat::Jpeg
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("x.WebP")).unwrap(),
            SourceFormat::Webp
        );
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["a.tif", "a.gif", "a.png.bak", "a", "dir.png/file", ".png"] {
            assert!(
                matches!(
                    SourceFormat::from_path(Path::new(name)),
                    Err(TileError::UnsupportedFormat(_))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn dotfile_has_no_extension() {
        match SourceFormat::from_path(Path::new("/x/.png")) {
            Err(TileError::UnsupportedFormat(msg)) => assert!(msg.contains("no extension"), "{msg}"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_extension_is_reported_as_such() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"scan.p\xffg"));
        match SourceFormat::from_path(path) {
            Err(TileError::UnsupportedFormat(msg)) => assert!(msg.contains("non-UTF-8"), "{msg}"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn image_formats() {
        assert_eq!(SourceFormat::Png.image_format(), image::ImageFormat::Png);
        assert_eq!(SourceFormat::Jpeg.image_format(), image::ImageFormat::Jpeg);
        assert_eq!(SourceFormat::Webp.image_format(), image::ImageFormat::WebP);
    }
}
