//! The capture -> convert -> infer -> display loop.
//!
//! One logical thread drives the whole pipeline: pull a frame, repack it for
//! the engine, run the blocking upscale, repack the result, stamp the FPS
//! overlay on the naive preview, and push both streams to the sink. Startup
//! resource failures and device loss are fatal; anything wrong with a single
//! frame's shape is logged and that frame is skipped.

pub mod error;
pub mod fps;
pub mod pipeline;
pub mod traits;

pub use error::PipelineError;
pub use fps::FpsCounter;
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport};
pub use traits::{FrameSink, SinkFlow};
