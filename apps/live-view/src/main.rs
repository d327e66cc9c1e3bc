use crisp_base::log_fatal;
use crisp_camera::{CameraConfig, V4l2Camera};
use crisp_image::{codec, Frame};
use crisp_infer::{tile_size_for, Device, GpuInfo, OnnxUpscaler, Upscaler, UpscalerConfig};
use crisp_pipeline::{FrameSink, Pipeline, PipelineConfig, PipelineError, SinkFlow};
use log::info;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;

const CAPTURE_WIDTH: u32 = 640;
const CAPTURE_HEIGHT: u32 = 480;
const SCALE: u32 = 2;
const NOISE: i32 = 3;
const PREPADDING: u32 = 7;

const DEFAULT_PARAMS: &str = "models/upconv7-photo/noise3_scale2.0x.json";
const DEFAULT_WEIGHTS: &str = "models/upconv7-photo/noise3_scale2.0x.onnx";

/// Two side-by-side windows; `q`, Escape or closing either one stops the loop.
struct MinifbSink {
    before: Window,
    after: Window,
}

impl MinifbSink {
    fn new(width: usize, height: usize) -> Result<Self, minifb::Error> {
        let mut before = Window::new(
            "Before (q to exit)",
            width,
            height,
            WindowOptions::default(),
        )?;
        let after = Window::new("After", width, height, WindowOptions::default())?;
        before.set_target_fps(60);
        Ok(Self { before, after })
    }
}

impl FrameSink for MinifbSink {
    fn present(&mut self, before: &Frame, after: &Frame) -> Result<SinkFlow, PipelineError> {
        let before_argb = codec::to_argb(before);
        self.before
            .update_with_buffer(&before_argb, before.width(), before.height())
            .map_err(|e| PipelineError::Sink(e.to_string()))?;

        let after_argb = codec::to_argb(after);
        self.after
            .update_with_buffer(&after_argb, after.width(), after.height())
            .map_err(|e| PipelineError::Sink(e.to_string()))?;

        let quit = !self.before.is_open()
            || !self.after.is_open()
            || self.before.is_key_down(Key::Q)
            || self.before.is_key_down(Key::Escape);

        Ok(if quit { SinkFlow::Stop } else { SinkFlow::Continue })
    }
}

fn select_device() -> Device {
    #[cfg(feature = "cuda")]
    {
        Device::Cuda { device_id: 0 }
    }
    #[cfg(not(feature = "cuda"))]
    {
        Device::Cpu
    }
}

#[tokio::main]
async fn main() {
    crisp_base::init_stdout_logger();

    let mut args = std::env::args().skip(1);
    let params = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_PARAMS.to_string()));
    let weights = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_WEIGHTS.to_string()));

    let device = select_device();
    let gpu = GpuInfo::probe(&device);
    let tile_size = tile_size_for(gpu.memory_free_mb);
    info!(
        "device {} ({}), headroom {:?} MB, tile size {}",
        device, gpu.name, gpu.memory_free_mb, tile_size
    );

    let mut upscaler = OnnxUpscaler::new(device);
    if let Err(e) = upscaler.load(&params, &weights) {
        log_fatal!(
            "failed to load model from {} and {}: {}",
            params.display(),
            weights.display(),
            e
        );
    }
    if let Err(e) = upscaler.configure(
        UpscalerConfig::default()
            .with_noise(NOISE)
            .with_scale(SCALE)
            .with_prepadding(PREPADDING)
            .with_tile_size(tile_size),
    ) {
        log_fatal!("failed to configure engine: {}", e);
    }

    let camera_config = CameraConfig::default()
        .with_width(CAPTURE_WIDTH)
        .with_height(CAPTURE_HEIGHT);
    let camera = match V4l2Camera::new(camera_config.clone()) {
        Ok(camera) => camera,
        Err(e) => {
            log_fatal!("failed to open camera {}: {}", camera_config.device(), e);
        }
    };

    let out_width = (CAPTURE_WIDTH * SCALE) as usize;
    let out_height = (CAPTURE_HEIGHT * SCALE) as usize;
    let sink = match MinifbSink::new(out_width, out_height) {
        Ok(sink) => sink,
        Err(e) => {
            log_fatal!("failed to create display windows: {}", e);
        }
    };

    let config = PipelineConfig::default().with_scale(SCALE);
    let mut pipeline = Pipeline::new(camera, upscaler, sink, config);

    match pipeline.run().await {
        Ok(report) => {
            info!(
                "done: {} frames processed, {} skipped",
                report.frames_processed, report.frames_skipped
            );
        }
        Err(e) => {
            log_fatal!("{}", e);
        }
    }
}
