#![no_main]

use libfuzzer_sys::fuzz_target;
use zenwebp_loader::ProbeStrategy;
use zenwebp_loader::format::has_webp_signature;
use zenwebp_loader::probe::{parse_header, probe};

fuzz_target!(|data: &[u8]| {
    let header = parse_header(data);
    let legacy = probe(data, ProbeStrategy::HeaderOnly).ok();

    // The header-only probe is the header parse with alpha and animation cleared.
    assert_eq!(legacy, header.map(|f| f.dimensions_only()));

    if probe(data, ProbeStrategy::Auto).is_ok() {
        assert!(has_webp_signature(data));
    }
});
