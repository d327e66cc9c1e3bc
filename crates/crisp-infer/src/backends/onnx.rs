use crate::{Device, InferError, Upscaler, UpscalerConfig};
use crisp_image::EngineBuffer;
use log::{debug, info};
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().commit();
    });
}

/// Sidecar parameter file describing an ONNX super-resolution model.
///
/// The engine contract takes a parameter path and a weight path; for ONNX the
/// weights are a single `.onnx` file, so the parameter file is a small JSON
/// declaring what the graph cannot: its native upscale factor and channel
/// count.
#[derive(Debug, Clone, Deserialize)]
struct ModelParams {
    #[serde(default)]
    name: Option<String>,
    scale: u32,
    channels: usize,
}

/// ONNX-runtime-backed super-resolution engine.
///
/// Feeds `[1, C, H, W]` f32 tensors in 0..=1 range through an `ort` session,
/// whole-frame when the input fits the configured tile size, tiled with
/// prepadding context otherwise.
pub struct OnnxUpscaler {
    device: Device,
    config: UpscalerConfig,
    session: Option<OrtSession>,
    params: Option<ModelParams>,
    input_name: String,
    output_name: String,
    processed: bool,
}

impl OnnxUpscaler {
    pub fn new(device: Device) -> Self {
        ensure_ort_init();
        Self {
            device,
            config: UpscalerConfig::default(),
            session: None,
            params: None,
            input_name: String::new(),
            output_name: String::new(),
            processed: false,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    fn build_session(&self, weights: &Path) -> Result<OrtSession, InferError> {
        let mut builder = OrtSession::builder()
            .map_err(|e| InferError::ModelLoad(format!("failed to create session builder: {e}")))?;

        builder = match &self.device {
            Device::Cpu => {
                debug!("using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                debug!("using CUDA execution provider (device_id={})", device_id);
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|e| {
                        InferError::ModelLoad(format!("CUDA execution provider rejected: {e}"))
                    })?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::ModelLoad(
                    "CUDA device requested but the cuda feature is not enabled".to_string(),
                ));
            }
        };

        builder
            .commit_from_file(weights)
            .map_err(|e| InferError::ModelLoad(format!("failed to load model: {e}")))
    }

    /// One session run over a region already packed as `[1, C, rh, rw]`.
    /// Returns the output in the same packing at `rh*scale x rw*scale`.
    fn run_region(
        session: &mut OrtSession,
        input_name: &str,
        output_name: &str,
        nchw: Vec<f32>,
        channels: usize,
        rw: usize,
        rh: usize,
        scale: usize,
    ) -> Result<Vec<f32>, InferError> {
        let array = ArrayD::from_shape_vec(vec![1, channels, rh, rw], nchw)
            .map_err(|e| InferError::Process(format!("failed to shape input tensor: {e}")))?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Process(format!("failed to create tensor ref: {e}")))?;

        let outputs = session
            .run(inputs![input_name => tensor_ref])
            .map_err(|e| InferError::Process(format!("inference failed: {e}")))?;

        let view = outputs[output_name]
            .try_extract_array::<f32>()
            .map_err(|e| InferError::Process(format!("output is not f32: {e}")))?;

        let expected_shape = [1, channels, rh * scale, rw * scale];
        if view.shape() != expected_shape {
            return Err(InferError::Process(format!(
                "model produced shape {:?}, expected {:?}",
                view.shape(),
                expected_shape
            )));
        }

        let owned = view.to_owned();
        owned
            .as_slice()
            .map(|s| s.to_vec())
            .ok_or_else(|| InferError::Process("output tensor is not contiguous".to_string()))
    }
}

impl Upscaler for OnnxUpscaler {
    fn load(&mut self, params: &Path, weights: &Path) -> Result<(), InferError> {
        if self.session.is_some() {
            return Err(InferError::ModelLoad("model already loaded".to_string()));
        }

        let raw = std::fs::read_to_string(params).map_err(|e| {
            InferError::ModelLoad(format!("failed to read {}: {e}", params.display()))
        })?;
        let model_params: ModelParams = serde_json::from_str(&raw).map_err(|e| {
            InferError::ModelLoad(format!("failed to parse {}: {e}", params.display()))
        })?;

        if model_params.scale == 0 {
            return Err(InferError::ModelLoad(
                "model declares a zero scale factor".to_string(),
            ));
        }

        let session = self.build_session(weights)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferError::ModelLoad("model has no outputs".to_string()))?;

        info!(
            "loaded {} (scale {}x, {} channels) on {}",
            model_params.name.as_deref().unwrap_or("model"),
            model_params.scale,
            model_params.channels,
            self.device
        );

        self.input_name = input_name;
        self.output_name = output_name;
        self.params = Some(model_params);
        self.session = Some(session);
        Ok(())
    }

    fn configure(&mut self, config: UpscalerConfig) -> Result<(), InferError> {
        if self.processed {
            return Err(InferError::Config(
                "cannot reconfigure after processing has started".to_string(),
            ));
        }
        if config.scale() == 0 {
            return Err(InferError::Config("scale factor must be >= 1".to_string()));
        }
        self.config = config;
        Ok(())
    }

    fn process(
        &mut self,
        input: &EngineBuffer,
        output: &mut EngineBuffer,
    ) -> Result<(), InferError> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| InferError::Process("model not loaded".to_string()))?;

        if params.scale != self.config.scale() {
            return Err(InferError::Config(format!(
                "configured scale {} does not match model scale {}",
                self.config.scale(),
                params.scale
            )));
        }
        if input.channels != params.channels {
            return Err(InferError::Process(format!(
                "input has {} channels, model expects {}",
                input.channels, params.channels
            )));
        }
        if input.data.len() != input.expected_len() {
            return Err(InferError::Process(format!(
                "input buffer declares {} bytes but holds {}",
                input.expected_len(),
                input.data.len()
            )));
        }

        let scale = self.config.scale() as usize;
        let (w, h, c) = (input.width, input.height, input.channels);
        let (out_w, out_h) = (w * scale, h * scale);

        if output.width != out_w || output.height != out_h || output.channels != c {
            return Err(InferError::Process(format!(
                "output buffer is {}x{}x{}, expected {}x{}x{}",
                output.width, output.height, output.channels, out_w, out_h, c
            )));
        }
        if output.data.len() != output.expected_len() {
            return Err(InferError::Process(format!(
                "output buffer declares {} bytes but holds {}",
                output.expected_len(),
                output.data.len()
            )));
        }

        let tile = self.config.tile_size() as usize;
        let pad = self.config.prepadding() as usize;
        let input_name = self.input_name.clone();
        let output_name = self.output_name.clone();
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| InferError::Process("model not loaded".to_string()))?;

        if w <= tile && h <= tile {
            // Whole frame fits in one engine step
            let nchw = hwc_region_to_nchw(input, 0, 0, w, h);
            let result = Self::run_region(
                session,
                &input_name,
                &output_name,
                nchw,
                c,
                w,
                h,
                scale,
            )?;
            nchw_to_hwc_region(&result, out_w, out_h, c, 0, 0, out_w, out_h, output, 0, 0);
        } else {
            // Tile loop with prepadding context on every side; the padded
            // margin is cropped back off each tile's output so seams land on
            // pixel-exact boundaries.
            let mut ty = 0;
            while ty < h {
                let th = tile.min(h - ty);
                let y0 = ty.saturating_sub(pad);
                let y1 = (ty + th + pad).min(h);

                let mut tx = 0;
                while tx < w {
                    let tw = tile.min(w - tx);
                    let x0 = tx.saturating_sub(pad);
                    let x1 = (tx + tw + pad).min(w);

                    let (rw, rh) = (x1 - x0, y1 - y0);
                    let nchw = hwc_region_to_nchw(input, x0, y0, rw, rh);
                    let result = Self::run_region(
                        session,
                        &input_name,
                        &output_name,
                        nchw,
                        c,
                        rw,
                        rh,
                        scale,
                    )?;

                    nchw_to_hwc_region(
                        &result,
                        rw * scale,
                        rh * scale,
                        c,
                        (tx - x0) * scale,
                        (ty - y0) * scale,
                        tw * scale,
                        th * scale,
                        output,
                        tx * scale,
                        ty * scale,
                    );

                    tx += tile;
                }
                ty += tile;
            }
        }

        self.processed = true;
        Ok(())
    }
}

/// Pack an HWC u8 region into `[1, C, rh, rw]` f32 in 0..=1 range.
fn hwc_region_to_nchw(buf: &EngineBuffer, x0: usize, y0: usize, rw: usize, rh: usize) -> Vec<f32> {
    let c = buf.channels;
    let plane = rw * rh;
    let mut nchw = vec![0.0f32; c * plane];
    for y in 0..rh {
        for x in 0..rw {
            let src = ((y0 + y) * buf.width + (x0 + x)) * c;
            let dst = y * rw + x;
            for ch in 0..c {
                nchw[ch * plane + dst] = buf.data[src + ch] as f32 / 255.0;
            }
        }
    }
    nchw
}

/// Copy a crop of a `[1, C, src_h, src_w]` f32 plane-packed result into an
/// interleaved u8 output buffer, rescaling to 0..=255 with clamping.
#[allow(clippy::too_many_arguments)]
fn nchw_to_hwc_region(
    nchw: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    crop_x: usize,
    crop_y: usize,
    crop_w: usize,
    crop_h: usize,
    out: &mut EngineBuffer,
    out_x: usize,
    out_y: usize,
) {
    debug_assert!(crop_x + crop_w <= src_w && crop_y + crop_h <= src_h);
    let plane = src_w * src_h;
    for y in 0..crop_h {
        for x in 0..crop_w {
            let src = (crop_y + y) * src_w + (crop_x + x);
            let dst = ((out_y + y) * out.width + (out_x + x)) * channels;
            for ch in 0..channels {
                let value = nchw[ch * plane + src] * 255.0;
                out.data[dst + ch] = value.clamp(0.0, 255.0) as u8;
            }
        }
    }
}
