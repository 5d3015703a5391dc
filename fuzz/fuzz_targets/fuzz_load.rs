#![no_main]

use libfuzzer_sys::fuzz_target;
use zenwebp_loader::{ImageRecord, Limits, LoadRequest, LoaderConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = std::env::temp_dir().canonicalize() else {
        return;
    };
    let path = dir.join(format!("zenwebp-loader-fuzz-{}.webp", std::process::id()));
    if std::fs::write(&path, data).is_err() {
        return;
    }

    let limits = Limits {
        max_pixels: Some(4 * 1024 * 1024),
        ..Limits::host_default()
    };
    let config = LoaderConfig::default().with_limits(limits);
    let mut image = ImageRecord::new(&path);

    if LoadRequest::new(&mut image, &config).immediate(true).run().is_ok() {
        let pixels = image.pixels().expect("successful load attaches pixels");
        assert_eq!(pixels.width() as u32, image.width);
        assert_eq!(pixels.height() as u32, image.height);
        assert_eq!(pixels.buf().len(), pixels.width() * pixels.height());
    } else {
        assert!(!image.has_pixels());
    }
});
