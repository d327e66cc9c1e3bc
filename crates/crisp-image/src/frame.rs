use crate::CodecError;
use crisp_base::Tensor;

/// Device-native channel order of an interleaved frame.
///
/// Capture backends that decode compressed streams produce `Rgb`; raw capture
/// devices and most display surfaces are `Bgr`. The tag travels with the frame
/// so the codec can apply the right permutation instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// An interleaved pixel buffer with shape `[height, width, channels]` and an
/// explicit channel order.
///
/// Frames are created fresh each pipeline iteration and handed off by value
/// between stages; no two stages hold the same frame at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    tensor: Tensor<u8>,
    order: ChannelOrder,
}

impl Frame {
    /// Wrap an HWC tensor as a frame.
    ///
    /// Rejects non-3D shapes, zero width or height, and channel counts outside
    /// 1..=4 with [`CodecError::InvalidFrame`].
    pub fn new(tensor: Tensor<u8>, order: ChannelOrder) -> Result<Self, CodecError> {
        if tensor.ndim() != 3 {
            return Err(CodecError::InvalidFrame(format!(
                "expected [H, W, C] shape, got {:?}",
                tensor.shape
            )));
        }
        let [h, w, c] = [tensor.shape[0], tensor.shape[1], tensor.shape[2]];
        if h == 0 || w == 0 {
            return Err(CodecError::InvalidFrame(format!(
                "zero-sized frame: {w}x{h}"
            )));
        }
        if c == 0 || c > 4 {
            return Err(CodecError::InvalidFrame(format!(
                "unsupported channel count: {c}"
            )));
        }
        Ok(Self { tensor, order })
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn data(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.tensor.data
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }
}

/// The pixel layout the inference engine consumes and produces: interleaved
/// bytes in engine-native (RGB) channel order, with declared dimensions.
///
/// The declared `width * height * channels` is validated against `data.len()`
/// wherever a buffer crosses back into frame land, so a lying buffer surfaces
/// as [`CodecError::DimensionMismatch`] instead of a silent reinterpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineBuffer {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl EngineBuffer {
    /// Pre-allocate an output buffer of exactly `width * height * channels`
    /// zeroed bytes, as the engine's `process` contract requires.
    pub fn zeroed(width: usize, height: usize, channels: usize) -> Self {
        Self {
            data: vec![0u8; width * height * channels],
            width,
            height,
            channels,
        }
    }

    /// Number of bytes the declared dimensions imply.
    pub fn expected_len(&self) -> usize {
        self.width * self.height * self.channels
    }
}
