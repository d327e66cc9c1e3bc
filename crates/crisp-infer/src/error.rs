use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// Model files missing or unparsable. Fatal for the session.
    ModelLoad(String),
    /// Configuration rejected (bad value, or reconfiguring a running engine).
    Config(String),
    /// A single process call failed. Recoverable; skip the frame.
    Process(String),
    /// The accelerator is gone. Fatal for the session.
    DeviceLost(String),
    Io(String),
}

impl InferError {
    /// Whether this error ends the session rather than one frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, InferError::ModelLoad(_) | InferError::DeviceLost(_))
    }
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::Process(msg) => write!(f, "process error: {msg}"),
            InferError::DeviceLost(msg) => write!(f, "device lost: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}
