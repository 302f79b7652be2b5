//! Backend selection and independent handles across threads.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;
use zentiles::*;

fn write_png(dir: &TempDir, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(w, h, Rgb([10, 20, 30]))
        .save(&path)
        .unwrap();
    path
}

fn quiet() -> BackendConfig {
    BackendConfig::default().with_log(LogSink::silent())
}

/// Serves `.raw` paths as a fixed 1x1 grey image without touching the disk.
struct ConstantBackend {
    path: PathBuf,
    metadata: ImageMetadata,
}

impl ConstantBackend {
    fn accepts(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == "raw")
    }

    fn construct(path: &Path, _config: &BackendConfig) -> Box<dyn ImageBackend> {
        Box::new(Self {
            path: path.to_path_buf(),
            metadata: ImageMetadata {
                width: 1,
                height: 1,
                tile_width: 1,
                tile_height: 1,
                channels: 1,
                bits_per_channel: 8,
                sample_type: SampleType::FixedPoint,
                colour_space: ColourSpace::Greyscale,
                num_resolutions: 1,
                image_widths: vec![1],
                image_heights: vec![1],
                tile_widths: vec![1],
                tile_heights: vec![1],
            },
        })
    }
}

impl ImageBackend for ConstantBackend {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&mut self) -> Result<(), TileError> {
        Ok(())
    }

    fn close(&mut self) {}

    fn metadata(&self) -> Result<&ImageMetadata, TileError> {
        Ok(&self.metadata)
    }

    fn get_tile(&mut self, _request: TileRequest) -> Result<TileBuffer, TileError> {
        Err(TileError::NotOpen)
    }
}

#[test]
fn default_registry_has_the_fallback_backend() {
    let registry = BackendRegistry::default();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["fallback"]);
    assert_eq!(
        registry.config().limits.max_decoded_bytes,
        Some(DEFAULT_MAX_DECODED_BYTES)
    );
}

#[test]
fn registry_opens_through_the_fallback_backend() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "a.png", 10, 4);
    let registry = BackendRegistry::with_defaults(quiet());

    let mut image = registry.open(&path).unwrap();
    assert_eq!(image.name(), "fallback");
    assert_eq!(image.path(), path.as_path());
    assert_eq!(image.metadata().unwrap().tile_width, 4);

    let rest = image.get_tile(TileRequest::new(1)).unwrap();
    assert_eq!((rest.width, rest.height), (6, 4));
    image.close();
    assert!(matches!(image.metadata(), Err(TileError::Closed)));
}

#[test]
fn unclaimed_paths_are_unsupported() {
    let registry = BackendRegistry::with_defaults(quiet());
    assert!(matches!(
        registry.open(Path::new("slide.svs")),
        Err(TileError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        BackendRegistry::new(quiet()).open(Path::new("a.png")),
        Err(TileError::UnsupportedFormat(_))
    ));
}

#[test]
fn registered_backends_are_tried_in_order() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "a.png", 3, 3);

    let mut registry = BackendRegistry::new(quiet());
    registry.register("constant", ConstantBackend::accepts, ConstantBackend::construct);
    registry.register("fallback", SourceFormat::accepts, |path, config| {
        Box::new(FallbackImage::new(path, config.clone()))
    });
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["constant", "fallback"]
    );

    let raw = registry.open(Path::new("x.raw")).unwrap();
    assert_eq!(raw.name(), "constant");
    assert_eq!(raw.metadata().unwrap().colour_space, ColourSpace::Greyscale);

    let fallback = registry.open(&png).unwrap();
    assert_eq!(fallback.name(), "fallback");
}

#[test]
fn failed_open_surfaces_from_registry() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "big.png", 20, 20);
    let config = quiet().with_limits(Limits::default().with_max_decoded_bytes(Some(100)));
    let registry = BackendRegistry::with_defaults(config);
    assert!(matches!(
        registry.open(&path),
        Err(TileError::ImageTooLarge {
            bytes: 1200,
            limit: 100
        })
    ));
}

#[test]
fn handles_work_independently_across_threads() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (1..=4)
        .map(|i| write_png(&dir, &format!("{i}.png"), 10 * i, 6))
        .collect();
    let registry = BackendRegistry::with_defaults(quiet());

    let lens: Vec<usize> = std::thread::scope(|scope| {
        let workers: Vec<_> = paths
            .iter()
            .map(|path| {
                let mut image = registry.open(path).unwrap();
                scope.spawn(move || image.get_tile(TileRequest::new(1)).unwrap().len())
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    // Remainder tiles are (10i - 6) x 6 RGB.
    assert_eq!(lens, vec![4 * 6 * 3, 14 * 6 * 3, 24 * 6 * 3, 34 * 6 * 3]);
}
