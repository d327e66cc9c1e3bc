use crate::{ChannelOrder, CodecError, EngineBuffer, Frame};
use crisp_base::Tensor;

/// Channel count of the engine's pixel layout.
pub const ENGINE_CHANNELS: usize = 3;

/// Repack a device-order frame into the engine's interleaved RGB layout.
///
/// The conversion is a fixed channel permutation (BGR frames swap channels 0
/// and 2, RGB frames copy through) with no gamma or colorimetric adjustment.
/// Width, height and pixel count are preserved exactly.
///
/// # Errors
///
/// - [`CodecError::InvalidFrame`] if the frame has no pixels
/// - [`CodecError::UnsupportedChannelLayout`] if the frame does not carry
///   exactly [`ENGINE_CHANNELS`] channels; no output buffer is produced
pub fn to_engine(frame: &Frame) -> Result<EngineBuffer, CodecError> {
    if frame.data().is_empty() {
        return Err(CodecError::InvalidFrame("empty frame".to_string()));
    }
    if frame.channels() != ENGINE_CHANNELS {
        return Err(CodecError::UnsupportedChannelLayout {
            expected: ENGINE_CHANNELS,
            got: frame.channels(),
        });
    }

    let data = match frame.order() {
        ChannelOrder::Rgb => frame.data().to_vec(),
        ChannelOrder::Bgr => swap_first_and_third(frame.data()),
    };

    Ok(EngineBuffer {
        data,
        width: frame.width(),
        height: frame.height(),
        channels: ENGINE_CHANNELS,
    })
}

/// Convert an engine output buffer back into a frame with the requested
/// device order. Inverse of [`to_engine`]: applying both with the same order
/// reproduces the original pixel data exactly.
///
/// # Errors
///
/// Returns [`CodecError::DimensionMismatch`] if the buffer's declared
/// `width * height * channels` does not equal its data length, and
/// [`CodecError::InvalidFrame`] for zero-sized dimensions.
pub fn from_engine(buffer: &EngineBuffer, order: ChannelOrder) -> Result<Frame, CodecError> {
    let expected = buffer.expected_len();
    if expected != buffer.data.len() {
        return Err(CodecError::DimensionMismatch {
            expected,
            got: buffer.data.len(),
        });
    }

    let data = match order {
        ChannelOrder::Rgb => buffer.data.clone(),
        ChannelOrder::Bgr => swap_first_and_third(&buffer.data),
    };

    let tensor = Tensor::new(vec![buffer.height, buffer.width, buffer.channels], data)?;
    Frame::new(tensor, order)
}

/// Naive bilinear upscale of a frame to `width*scale x height*scale`, for the
/// side-by-side "before" preview. Shares nothing with the engine path.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFrame`] if `scale` is zero.
pub fn preview_upscale(frame: &Frame, scale: u32) -> Result<Frame, CodecError> {
    if scale == 0 {
        return Err(CodecError::InvalidFrame("scale factor must be >= 1".to_string()));
    }
    if scale == 1 {
        return Ok(frame.clone());
    }

    let w = frame.width();
    let h = frame.height();
    let c = frame.channels();
    let out_w = w * scale as usize;
    let out_h = h * scale as usize;
    let src = frame.data();
    let inv = 1.0 / scale as f32;

    let mut out = vec![0u8; out_w * out_h * c];
    for oy in 0..out_h {
        // Map output pixel centers back onto the source grid
        let sy = ((oy as f32 + 0.5) * inv - 0.5).max(0.0);
        let y0 = (sy as usize).min(h - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fy = sy - y0 as f32;

        for ox in 0..out_w {
            let sx = ((ox as f32 + 0.5) * inv - 0.5).max(0.0);
            let x0 = (sx as usize).min(w - 1);
            let x1 = (x0 + 1).min(w - 1);
            let fx = sx - x0 as f32;

            for ch in 0..c {
                let p00 = src[(y0 * w + x0) * c + ch] as f32;
                let p01 = src[(y0 * w + x1) * c + ch] as f32;
                let p10 = src[(y1 * w + x0) * c + ch] as f32;
                let p11 = src[(y1 * w + x1) * c + ch] as f32;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;

                out[(oy * out_w + ox) * c + ch] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    let tensor = Tensor::new(vec![out_h, out_w, c], out)?;
    Frame::new(tensor, frame.order())
}

/// Pack a 3-channel frame into 0RGB u32 words for the display surface.
pub fn to_argb(frame: &Frame) -> Vec<u32> {
    debug_assert_eq!(
        frame.channels(),
        3,
        "ARGB packing expects a 3-channel frame"
    );
    let (r_off, b_off) = match frame.order() {
        ChannelOrder::Rgb => (0, 2),
        ChannelOrder::Bgr => (2, 0),
    };
    let buf = frame.data();
    let pixels = frame.width() * frame.height();
    let mut argb = Vec::with_capacity(pixels);
    for i in 0..pixels {
        let idx = i * 3;
        let r = buf[idx + r_off] as u32;
        let g = buf[idx + 1] as u32;
        let b = buf[idx + b_off] as u32;
        argb.push((r << 16) | (g << 8) | b);
    }
    argb
}

fn swap_first_and_third(interleaved: &[u8]) -> Vec<u8> {
    let mut out = interleaved.to_vec();
    for px in out.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    out
}
