#![no_main]
use libfuzzer_sys::fuzz_target;
use zentiles::{BackendConfig, FallbackImage, ImageBackend, Limits, LogSink, TileRequest};

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let path = dir.path().join("input.png");
    if std::fs::write(&path, data).is_err() {
        return;
    }

    // Open and cut every tile: must never panic
    let config = BackendConfig::default()
        .with_limits(Limits::default().with_max_decoded_bytes(Some(1 << 24)))
        .with_log(LogSink::silent());
    let Ok(mut image) = FallbackImage::open_path(&path, config) else {
        return;
    };
    for tile in 0..3 {
        let _ = image.get_tile(TileRequest::new(tile));
    }
    let _ = image.get_tile(TileRequest::new(0).with_resolution(1));
    image.close();
});
