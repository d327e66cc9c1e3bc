use crate::PipelineError;
use crisp_image::Frame;

/// What the sink wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFlow {
    Continue,
    /// The user asked to quit (exit key, window closed). Checked once per
    /// iteration; the frame already in flight completes first.
    Stop,
}

/// Push-based display for the two output streams.
///
/// `before` is the annotated naive preview, `after` the engine output. The
/// sink paces the loop (a real display blocks on refresh) and carries the
/// cooperative exit signal in its return value.
pub trait FrameSink {
    fn present(&mut self, before: &Frame, after: &Frame) -> Result<SinkFlow, PipelineError>;
}
