use crisp_image::CodecError;
use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// Device could not be opened or configured.
    Device(String),
    /// The capture stream failed or ended.
    Stream(String),
    /// The frame channel between the capture thread and the consumer closed.
    Channel(String),
    /// A captured frame could not be decoded.
    Decode(CodecError),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<CodecError> for CameraError {
    fn from(err: CodecError) -> Self {
        CameraError::Decode(err)
    }
}
