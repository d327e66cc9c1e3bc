use crisp_base::Tensor;
use crisp_camera::{Camera, CameraError};
use crisp_image::{ChannelOrder, EngineBuffer, Frame};
use crisp_infer::{InferError, Upscaler, UpscalerConfig};
use crisp_pipeline::{FrameSink, Pipeline, PipelineConfig, PipelineError, SinkFlow};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

fn solid_frame(width: usize, height: usize, channels: usize, value: u8) -> Frame {
    let tensor = Tensor::new(
        vec![height, width, channels],
        vec![value; width * height * channels],
    )
    .unwrap();
    Frame::new(tensor, ChannelOrder::Rgb).unwrap()
}

/// Yields a scripted sequence of frames, then fails like a lost device.
struct ScriptedCamera {
    frames: VecDeque<Frame>,
}

impl ScriptedCamera {
    fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl Camera for ScriptedCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.frames
            .pop_front()
            .ok_or_else(|| CameraError::Stream("end of stream".to_string()))
    }
}

/// Nearest-neighbor duplicating upscaler with an optional per-call failure
/// script.
struct FakeUpscaler {
    scale: usize,
    failures: VecDeque<Option<InferError>>,
}

impl FakeUpscaler {
    fn new(scale: usize) -> Self {
        Self {
            scale,
            failures: VecDeque::new(),
        }
    }

    fn failing_with(mut self, failures: Vec<Option<InferError>>) -> Self {
        self.failures = failures.into();
        self
    }
}

impl Upscaler for FakeUpscaler {
    fn load(&mut self, _params: &Path, _weights: &Path) -> Result<(), InferError> {
        Ok(())
    }

    fn configure(&mut self, config: UpscalerConfig) -> Result<(), InferError> {
        self.scale = config.scale() as usize;
        Ok(())
    }

    fn process(
        &mut self,
        input: &EngineBuffer,
        output: &mut EngineBuffer,
    ) -> Result<(), InferError> {
        if let Some(Some(err)) = self.failures.pop_front() {
            return Err(err);
        }

        let scale = self.scale;
        assert_eq!(output.width, input.width * scale);
        assert_eq!(output.height, input.height * scale);
        for oy in 0..output.height {
            for ox in 0..output.width {
                let src = ((oy / scale) * input.width + (ox / scale)) * input.channels;
                let dst = (oy * output.width + ox) * output.channels;
                for ch in 0..input.channels {
                    output.data[dst + ch] = input.data[src + ch];
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct SinkLog {
    presented: Vec<((usize, usize), (usize, usize))>,
}

/// Records every presented pair and stops after a fixed number of frames.
struct RecordingSink {
    log: Arc<Mutex<SinkLog>>,
    stop_after: usize,
}

impl RecordingSink {
    fn new(stop_after: usize) -> (Self, Arc<Mutex<SinkLog>>) {
        let log = Arc::new(Mutex::new(SinkLog::default()));
        (
            Self {
                log: log.clone(),
                stop_after,
            },
            log,
        )
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, before: &Frame, after: &Frame) -> Result<SinkFlow, PipelineError> {
        let mut log = self.log.lock().unwrap();
        log.presented.push((
            (before.width(), before.height()),
            (after.width(), after.height()),
        ));
        if log.presented.len() >= self.stop_after {
            Ok(SinkFlow::Stop)
        } else {
            Ok(SinkFlow::Continue)
        }
    }
}

#[tokio::test]
async fn test_single_iteration_2x2_scale_2() {
    let camera = ScriptedCamera::new(vec![solid_frame(2, 2, 3, 90)]);
    let upscaler = FakeUpscaler::new(2);
    let (sink, log) = RecordingSink::new(1);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.frames_processed, 1);
    assert_eq!(report.frames_skipped, 0);

    let log = log.lock().unwrap();
    // Both the preview path and the engine path produce 4x4, independently
    assert_eq!(log.presented, vec![((4, 4), (4, 4))]);
    assert!(pipeline.fps().is_some());
}

#[tokio::test]
async fn test_capture_loss_after_three_frames() {
    let camera = ScriptedCamera::new(vec![
        solid_frame(2, 2, 3, 1),
        solid_frame(2, 2, 3, 2),
        solid_frame(2, 2, 3, 3),
    ]);
    let upscaler = FakeUpscaler::new(2);
    let (sink, log) = RecordingSink::new(usize::MAX);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let result = pipeline.run().await;

    // Clean classified stop, not a panic
    assert!(matches!(result, Err(PipelineError::CaptureLost(_))));
    assert_eq!(log.lock().unwrap().presented.len(), 3);
}

#[tokio::test]
async fn test_bad_channel_frame_is_skipped() {
    let camera = ScriptedCamera::new(vec![
        solid_frame(2, 2, 3, 1),
        solid_frame(2, 2, 4, 2), // wrong layout for the engine
        solid_frame(2, 2, 3, 3),
    ]);
    let upscaler = FakeUpscaler::new(2);
    let (sink, log) = RecordingSink::new(2);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.frames_processed, 2);
    assert_eq!(report.frames_skipped, 1);
    assert_eq!(log.lock().unwrap().presented.len(), 2);
}

#[tokio::test]
async fn test_recoverable_process_error_skips_frame() {
    let camera = ScriptedCamera::new(vec![solid_frame(2, 2, 3, 1), solid_frame(2, 2, 3, 2)]);
    let upscaler = FakeUpscaler::new(2).failing_with(vec![
        Some(InferError::Process("transient".to_string())),
        None,
    ]);
    let (sink, log) = RecordingSink::new(1);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.frames_processed, 1);
    assert_eq!(report.frames_skipped, 1);
    assert_eq!(log.lock().unwrap().presented.len(), 1);
}

#[tokio::test]
async fn test_fatal_process_error_terminates() {
    let camera = ScriptedCamera::new(vec![solid_frame(2, 2, 3, 1), solid_frame(2, 2, 3, 2)]);
    let upscaler = FakeUpscaler::new(2)
        .failing_with(vec![Some(InferError::DeviceLost("gone".to_string()))]);
    let (sink, log) = RecordingSink::new(usize::MAX);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let result = pipeline.run().await;

    assert!(matches!(result, Err(PipelineError::Inference(_))));
    assert!(log.lock().unwrap().presented.is_empty());
}

#[tokio::test]
async fn test_stop_signal_ends_cleanly() {
    // Endless supply of frames; the sink's stop request must end the loop
    let frames: Vec<Frame> = (0..100).map(|i| solid_frame(2, 2, 3, i as u8)).collect();
    let camera = ScriptedCamera::new(frames);
    let upscaler = FakeUpscaler::new(2);
    let (sink, log) = RecordingSink::new(5);

    let mut pipeline = Pipeline::new(camera, upscaler, sink, PipelineConfig::default());
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.frames_processed, 5);
    assert_eq!(log.lock().unwrap().presented.len(), 5);
}
