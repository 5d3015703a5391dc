//! WebP codec adapter using zenwebp.

use crate::error::CodecStage;
use crate::pixel::{rgba_bytes_into_bgra, BgraImage, ImgRef, Bgra};
use crate::probe::Features;
use crate::LoaderError;

/// Frame requested from animated files (1-based).
pub(crate) const FIRST_FRAME: u32 = 1;

/// Probe WebP features without decoding pixels.
pub(crate) fn probe(data: &[u8]) -> Result<Features, LoaderError> {
    let info = zenwebp::ImageInfo::from_webp(data)
        .map_err(|e| LoaderError::UnsupportedFormat(e.to_string()))?;

    Ok(Features {
        width: info.width,
        height: info.height,
        has_alpha: info.has_alpha,
        has_animation: info.has_animation,
    })
}

/// Decode a still image to BGRA in a single call.
pub(crate) fn decode_still(
    data: &[u8],
    expected: &Features,
    config: &zenwebp::DecodeConfig,
) -> Result<BgraImage, LoaderError> {
    let (raw, width, height) = zenwebp::DecodeRequest::new(config, data)
        .decode_rgba()
        .map_err(|e| LoaderError::codec(CodecStage::Decode, e))?;

    if width != expected.width || height != expected.height {
        return Err(LoaderError::codec_msg(
            CodecStage::Decode,
            "decoded size differs from probed size",
        ));
    }

    Ok(BgraImage::new(
        rgba_bytes_into_bgra(raw),
        width as usize,
        height as usize,
    ))
}

/// Decode the first frame of an animation into a caller-allocated buffer.
///
/// The demuxer confirms the frame exists; the decoder then composites it onto
/// a canvas-sized buffer of `4 × width × height` bytes with a stride of
/// `width` pixels. That buffer becomes the pixel storage without a copy.
pub(crate) fn decode_first_frame(
    data: &[u8],
    canvas: &Features,
    config: &zenwebp::DecodeConfig,
) -> Result<BgraImage, LoaderError> {
    let demuxer =
        zenwebp::mux::WebPDemuxer::new(data).map_err(|e| LoaderError::codec(CodecStage::Demux, e))?;
    let frame = demuxer
        .frame(FIRST_FRAME)
        .ok_or(LoaderError::MissingFrame(FIRST_FRAME))?;
    log::debug!(
        "animation frame {}: {}x{} at ({}, {}) of {} frames",
        FIRST_FRAME,
        frame.width,
        frame.height,
        frame.x_offset,
        frame.y_offset,
        demuxer.num_frames()
    );

    let stride = canvas.width as usize * 4;
    let mut buffer = vec![0u8; stride * canvas.height as usize];
    let (width, height) = zenwebp::DecodeRequest::new(config, data)
        .stride(canvas.width)
        .decode_rgba_into(&mut buffer)
        .map_err(|e| LoaderError::codec(CodecStage::Decode, e))?;

    if width != canvas.width || height != canvas.height {
        return Err(LoaderError::codec_msg(
            CodecStage::Decode,
            "decoded frame differs from canvas size",
        ));
    }

    Ok(BgraImage::new(
        rgba_bytes_into_bgra(buffer),
        width as usize,
        height as usize,
    ))
}

/// Encode BGRA pixels to lossy WebP.
///
/// `base` supplies every encoder knob except quality. Fully opaque images are
/// handed to the encoder without an alpha channel so the file carries no
/// alpha plane.
pub(crate) fn encode_bgra(
    img: ImgRef<'_, Bgra<u8>>,
    quality: u8,
    base: Option<&zenwebp::LossyConfig>,
) -> Result<Vec<u8>, LoaderError> {
    let width = img.width() as u32;
    let height = img.height() as u32;
    let (buf, _, _) = img.to_contiguous_buf();

    let config = base
        .cloned()
        .unwrap_or_default()
        .with_quality(f32::from(quality));

    let opaque = buf.iter().all(|p| p.a == u8::MAX);
    let packed;
    let (bytes, layout): (&[u8], _) = if opaque {
        packed = buf.iter().flat_map(|p| [p.b, p.g, p.r]).collect::<Vec<u8>>();
        (packed.as_slice(), zenwebp::PixelLayout::Bgr8)
    } else {
        (bytemuck::cast_slice(buf.as_ref()), zenwebp::PixelLayout::Bgra8)
    };

    let webp = zenwebp::EncodeRequest::lossy(&config, bytes, layout, width, height)
        .encode()
        .map_err(|e| LoaderError::codec(CodecStage::Encode, e))?;

    non_empty(webp)
}

fn non_empty(webp: Vec<u8>) -> Result<Vec<u8>, LoaderError> {
    if webp.is_empty() {
        return Err(LoaderError::codec_msg(
            CodecStage::Encode,
            "encoder produced no output",
        ));
    }
    Ok(webp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Img;

    fn filled(width: usize, height: usize, alpha: u8) -> BgraImage {
        let px = Bgra {
            b: 40,
            g: 120,
            r: 200,
            a: alpha,
        };
        Img::new(vec![px; width * height], width, height)
    }

    fn frameless_animation() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(b"WEBP");
        body.extend_from_slice(b"VP8X");
        body.extend_from_slice(&10u32.to_le_bytes());
        body.push(0x02);
        body.extend_from_slice(&[0; 3]);
        body.extend_from_slice(&[15, 0, 0, 7, 0, 0]);
        body.extend_from_slice(b"ANIM");
        body.extend_from_slice(&6u32.to_le_bytes());
        body.extend_from_slice(&[0; 6]);
        let mut file = b"RIFF".to_vec();
        file.extend_from_slice(&(body.len() as u32).to_le_bytes());
        file.extend_from_slice(&body);
        file
    }

    #[test]
    fn opaque_pixels_encode_without_alpha() {
        let img = filled(16, 8, 255);
        let webp = encode_bgra(img.as_ref(), 80, None).unwrap();
        let features = probe(&webp).unwrap();
        assert_eq!((features.width, features.height), (16, 8));
        assert!(!features.has_alpha);
    }

    #[test]
    fn translucent_pixels_keep_alpha() {
        let img = filled(16, 8, 128);
        let webp = encode_bgra(img.as_ref(), 80, None).unwrap();
        assert!(probe(&webp).unwrap().has_alpha);
    }

    #[test]
    fn empty_encoder_output_is_an_encode_error() {
        match non_empty(Vec::new()) {
            Err(LoaderError::Codec { stage, .. }) => assert_eq!(stage, CodecStage::Encode),
            other => panic!("expected encode error, got {other:?}"),
        }
        assert_eq!(non_empty(vec![1]).unwrap(), vec![1]);
    }

    #[test]
    fn animation_without_frames_reports_missing_frame() {
        let canvas = Features {
            width: 16,
            height: 8,
            has_alpha: false,
            has_animation: true,
        };
        let err = decode_first_frame(
            &frameless_animation(),
            &canvas,
            &zenwebp::DecodeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoaderError::MissingFrame(FIRST_FRAME)));
    }
}
