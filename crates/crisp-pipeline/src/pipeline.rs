use crate::{FpsCounter, FrameSink, PipelineError, SinkFlow};
use crisp_camera::Camera;
use crisp_image::{codec, overlay, EngineBuffer};
use crisp_infer::Upscaler;
use log::{info, warn};
use std::time::Instant;

/// Pipeline parameters fixed at construction.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    scale: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

impl PipelineConfig {
    /// Set the upscale factor; must match the engine's configured scale.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

/// Counters reported after a clean stop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Frames that made it through the engine and onto the sink.
    pub frames_processed: u64,
    /// Frames dropped for per-frame shape or engine errors.
    pub frames_skipped: u64,
}

/// The capture -> convert -> infer -> display loop.
///
/// Owns the camera, the engine and the sink exclusively for the session. The
/// engine must already be loaded and configured. No timeout is imposed on the
/// engine's process call; a production deployment would want a bounded wait
/// with cancellation so a wedged accelerator cannot hang the loop.
pub struct Pipeline<C: Camera, U: Upscaler, S: FrameSink> {
    camera: C,
    upscaler: U,
    sink: S,
    config: PipelineConfig,
    fps: FpsCounter,
}

impl<C: Camera, U: Upscaler, S: FrameSink> Pipeline<C, U, S> {
    pub fn new(camera: C, upscaler: U, sink: S, config: PipelineConfig) -> Self {
        Self {
            camera,
            upscaler,
            sink,
            config,
            fps: FpsCounter::new(),
        }
    }

    /// Drive the loop until the sink signals stop (clean exit) or a fatal
    /// error ends the session.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::CaptureLost`] when the camera errors or its stream
    ///   ends
    /// - [`PipelineError::Inference`] when the engine reports a fatal
    ///   (persistent) failure; per-frame process errors only skip the frame
    /// - [`PipelineError::Sink`] when the display fails
    pub async fn run(&mut self) -> Result<PipelineReport, PipelineError> {
        let scale = self.config.scale();
        let mut report = PipelineReport::default();

        info!("pipeline started (scale {}x)", scale);

        loop {
            // Capturing
            let frame = match self.camera.recv().await {
                Ok(frame) => frame,
                Err(e) => {
                    return Err(PipelineError::CaptureLost(e.to_string()));
                }
            };

            // Converting: naive preview and engine repack. Shape problems are
            // this frame's problem only.
            let mut before = match codec::preview_upscale(&frame, scale) {
                Ok(before) => before,
                Err(e) => {
                    warn!("dropping frame: {}", e);
                    report.frames_skipped += 1;
                    continue;
                }
            };
            let engine_input = match codec::to_engine(&frame) {
                Ok(buffer) => buffer,
                Err(e) => {
                    warn!("dropping frame: {}", e);
                    report.frames_skipped += 1;
                    continue;
                }
            };

            // Inferring: output buffer sized exactly to the engine contract,
            // elapsed time around the blocking call is the FPS sample.
            let mut engine_output = EngineBuffer::zeroed(
                engine_input.width * scale as usize,
                engine_input.height * scale as usize,
                engine_input.channels,
            );
            let started = Instant::now();
            if let Err(e) = self.upscaler.process(&engine_input, &mut engine_output) {
                if e.is_fatal() {
                    return Err(PipelineError::Inference(e.to_string()));
                }
                warn!("dropping frame: {}", e);
                report.frames_skipped += 1;
                continue;
            }
            let fps = self.fps.update(started.elapsed());

            let after = match codec::from_engine(&engine_output, frame.order()) {
                Ok(after) => after,
                Err(e) => {
                    warn!("dropping frame: {}", e);
                    report.frames_skipped += 1;
                    continue;
                }
            };

            // Rendering, then the once-per-iteration exit check
            overlay::draw_fps(&mut before, fps);
            report.frames_processed += 1;

            match self.sink.present(&before, &after)? {
                SinkFlow::Continue => {}
                SinkFlow::Stop => {
                    info!(
                        "pipeline stopped: {} frames processed, {} skipped",
                        report.frames_processed, report.frames_skipped
                    );
                    return Ok(report);
                }
            }
        }
    }

    /// Last measured FPS, if any frame has been timed yet.
    pub fn fps(&self) -> Option<f64> {
        self.fps.value()
    }
}
