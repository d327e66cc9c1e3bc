use crisp_base::TensorError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum CodecError {
    /// Zero-sized or structurally malformed frame.
    InvalidFrame(String),
    /// Frame channel count does not match the engine layout.
    UnsupportedChannelLayout { expected: usize, got: usize },
    /// Declared buffer dimensions disagree with the data length.
    DimensionMismatch { expected: usize, got: usize },
    /// Compressed image data could not be decoded.
    Decode(String),
    Tensor(TensorError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidFrame(msg) => write!(f, "invalid frame: {msg}"),
            CodecError::UnsupportedChannelLayout { expected, got } => {
                write!(
                    f,
                    "unsupported channel layout: expected {expected} channels, got {got}"
                )
            }
            CodecError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected} bytes, got {got}")
            }
            CodecError::Decode(msg) => write!(f, "decode error: {msg}"),
            CodecError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<TensorError> for CodecError {
    fn from(err: TensorError) -> Self {
        CodecError::Tensor(err)
    }
}

impl From<crates_image::ImageError> for CodecError {
    fn from(err: crates_image::ImageError) -> Self {
        CodecError::Decode(err.to_string())
    }
}
