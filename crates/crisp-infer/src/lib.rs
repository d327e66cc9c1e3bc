//! Super-resolution engine contract and backends.
//!
//! The pipeline sees an [`Upscaler`]: load a model once, configure it once,
//! then feed it one [`EngineBuffer`](crisp_image::EngineBuffer) at a time.
//! [`tile_size_for`] maps the accelerator's advisory memory headroom to the
//! tile size the engine may process per internal step.

pub mod backends;
pub mod budget;
pub mod config;
pub mod device;
pub mod error;
pub mod traits;

pub use backends::onnx::OnnxUpscaler;
pub use budget::tile_size_for;
pub use config::UpscalerConfig;
pub use device::{Device, GpuInfo};
pub use error::InferError;
pub use traits::Upscaler;
