//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use zenwebp_loader::pixel::{Bgra, BgraImage};

pub const RED: Bgra<u8> = Bgra {
    b: 0,
    g: 0,
    r: 255,
    a: 255,
};

pub fn solid(width: usize, height: usize, px: Bgra<u8>) -> BgraImage {
    BgraImage::new(vec![px; width * height], width, height)
}

/// Deterministic high-frequency pattern; compresses very differently at low
/// and high quality.
pub fn noise(width: usize, height: usize) -> BgraImage {
    let mut state = 0x2545_F491u32;
    let buf = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [b, g, r, _] = state.to_le_bytes();
            Bgra { b, g, r, a: 255 }
        })
        .collect();
    BgraImage::new(buf, width, height)
}

/// Lossy WebP bytes for a BGRA image. Opaque images are encoded without an
/// alpha channel.
pub fn encode_lossy(img: &BgraImage, quality: f32) -> Vec<u8> {
    let config = zenwebp::LossyConfig::new().with_quality(quality);
    let (w, h) = (img.width() as u32, img.height() as u32);
    if img.buf().iter().all(|p| p.a == 255) {
        let bgr: Vec<u8> = img.buf().iter().flat_map(|p| [p.b, p.g, p.r]).collect();
        zenwebp::EncodeRequest::lossy(&config, &bgr, zenwebp::PixelLayout::Bgr8, w, h)
            .encode()
            .unwrap()
    } else {
        let bytes: &[u8] = bytemuck::cast_slice(img.buf().as_slice());
        zenwebp::EncodeRequest::lossy(&config, bytes, zenwebp::PixelLayout::Bgra8, w, h)
            .encode()
            .unwrap()
    }
}

pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn push_chunk(out: &mut Vec<u8>, fourcc: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(fourcc);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}

fn push_u24(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes()[..3]);
}

/// The complete `VP8 ` chunk (header, payload and padding) of a simple
/// lossy file.
fn vp8_chunk(webp: &[u8]) -> &[u8] {
    let mut pos = 12;
    while pos + 8 <= webp.len() {
        let size = u32::from_le_bytes([
            webp[pos + 4],
            webp[pos + 5],
            webp[pos + 6],
            webp[pos + 7],
        ]) as usize;
        let end = pos + 8 + size + (size & 1);
        if &webp[pos..pos + 4] == b"VP8 " {
            return &webp[pos..end.min(webp.len())];
        }
        pos = end;
    }
    panic!("no VP8 chunk in encoder output");
}

/// A one-frame animated WebP whose only frame covers the whole canvas.
pub fn animated_from(frame: &BgraImage) -> Vec<u8> {
    let still = encode_lossy(frame, 90.0);
    let bitstream = vp8_chunk(&still);
    let (w, h) = (frame.width() as u32, frame.height() as u32);

    let mut vp8x = vec![0x02, 0, 0, 0];
    push_u24(&mut vp8x, w - 1);
    push_u24(&mut vp8x, h - 1);

    let mut anim = vec![0, 0, 0, 0];
    anim.extend_from_slice(&0u16.to_le_bytes());

    let mut anmf = Vec::new();
    push_u24(&mut anmf, 0);
    push_u24(&mut anmf, 0);
    push_u24(&mut anmf, w - 1);
    push_u24(&mut anmf, h - 1);
    push_u24(&mut anmf, 100);
    anmf.push(0);
    anmf.extend_from_slice(bitstream);

    let mut body = b"WEBP".to_vec();
    push_chunk(&mut body, b"VP8X", &vp8x);
    push_chunk(&mut body, b"ANIM", &anim);
    push_chunk(&mut body, b"ANMF", &anmf);

    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

pub fn close(a: Bgra<u8>, b: Bgra<u8>, tolerance: u8) -> bool {
    a.b.abs_diff(b.b) <= tolerance
        && a.g.abs_diff(b.g) <= tolerance
        && a.r.abs_diff(b.r) <= tolerance
        && a.a.abs_diff(b.a) <= tolerance
}

/// An animated container with a VP8X header and an ANIM chunk but no frames.
pub fn frameless_animation(width: u32, height: u32) -> Vec<u8> {
    let mut vp8x = vec![0x02, 0, 0, 0];
    push_u24(&mut vp8x, width - 1);
    push_u24(&mut vp8x, height - 1);

    let mut body = b"WEBP".to_vec();
    push_chunk(&mut body, b"VP8X", &vp8x);
    push_chunk(&mut body, b"ANIM", &[0; 6]);

    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}
