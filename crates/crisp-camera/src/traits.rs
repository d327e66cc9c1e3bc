use crate::CameraError;
use crisp_image::Frame;

/// Async camera trait for frame capture.
///
/// Implementations provide a `recv` method that asynchronously returns
/// decoded frames in device-native interleaved layout. A `recv` error means
/// the device is lost or the stream has ended; callers should not retry.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Frame, CameraError>;
}
