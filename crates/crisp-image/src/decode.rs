use crate::{ChannelOrder, CodecError, Frame};
use crisp_base::Tensor;

/// Decode a compressed image (MJPEG capture frames, mostly) into an RGB frame.
///
/// The format is auto-detected by the `image` crate. Non-RGB8 decodes are
/// converted, so the result is always `[height, width, 3]` in RGB order.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the data is invalid or the format is
/// unsupported.
pub fn decode_rgb(data: &[u8]) -> Result<Frame, CodecError> {
    let img = crates_image::load_from_memory(data)?;
    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();
    let tensor = Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?;
    Frame::new(tensor, ChannelOrder::Rgb)
}
