//! Frame model and pixel-layout conversions for the crisp pipeline.
//!
//! A captured [`Frame`] is an interleaved HWC `Tensor<u8>` tagged with its
//! device-native channel order. The codec converts frames to and from the
//! [`EngineBuffer`] layout the super-resolution engine expects, produces the
//! naive preview upscale for side-by-side comparison, and packs frames into
//! ARGB words for the display surface.

pub mod codec;
pub mod decode;
pub mod error;
pub mod frame;
pub mod overlay;

pub use codec::{from_engine, preview_upscale, to_argb, to_engine, ENGINE_CHANNELS};
pub use decode::decode_rgb;
pub use error::CodecError;
pub use frame::{ChannelOrder, EngineBuffer, Frame};
