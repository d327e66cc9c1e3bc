use crate::{InferError, UpscalerConfig};
use crisp_image::EngineBuffer;
use std::path::Path;

/// The super-resolution engine contract the pipeline depends on.
///
/// Protocol: `load` exactly once, `configure` before the first `process`,
/// then one blocking `process` call in flight at a time for the session's
/// lifetime. The caller owns the instance exclusively.
pub trait Upscaler {
    /// Load the model from its parameter and weight files.
    ///
    /// A failure here is fatal for the session; there is nothing to process
    /// with.
    fn load(&mut self, params: &Path, weights: &Path) -> Result<(), InferError>;

    /// Install the processing parameters.
    ///
    /// Must complete before the first `process` call; reconfiguring a session
    /// that has already processed frames is an [`InferError::Config`].
    fn configure(&mut self, config: UpscalerConfig) -> Result<(), InferError>;

    /// Upscale one frame, synchronously.
    ///
    /// Writes into the caller-provided `output`, which must be pre-allocated
    /// to exactly `input.width * scale` x `input.height * scale` x channels.
    /// An undersized buffer is rejected with [`InferError::Process`].
    fn process(&mut self, input: &EngineBuffer, output: &mut EngineBuffer)
        -> Result<(), InferError>;
}
