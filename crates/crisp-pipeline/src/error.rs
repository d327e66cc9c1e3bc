use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// The capture device stopped yielding frames (or was lost).
    CaptureLost(String),
    /// The engine reported an unrecoverable failure.
    Inference(String),
    /// The display sink failed.
    Sink(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::CaptureLost(msg) => write!(f, "capture unavailable: {msg}"),
            PipelineError::Inference(msg) => write!(f, "inference failed: {msg}"),
            PipelineError::Sink(msg) => write!(f, "display sink failed: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
