/// Engine processing parameters, fixed for the session.
///
/// Must be fully populated (via [`Upscaler::configure`](crate::Upscaler))
/// before the first process call. `scale` determines the output dimensions as
/// exact integer multiples of the input's.
#[derive(Clone, Debug, PartialEq)]
pub struct UpscalerConfig {
    noise: i32,
    scale: u32,
    prepadding: u32,
    tile_size: u32,
}

impl Default for UpscalerConfig {
    fn default() -> Self {
        Self {
            noise: 3,
            scale: 2,
            prepadding: 7,
            tile_size: 32,
        }
    }
}

impl UpscalerConfig {
    /// Set the denoise level baked into the model.
    pub fn with_noise(mut self, noise: i32) -> Self {
        self.noise = noise;
        self
    }

    /// Set the upscale factor (>= 1).
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the border context, in pixels, given to the engine around each tile.
    pub fn with_prepadding(mut self, prepadding: u32) -> Self {
        self.prepadding = prepadding;
        self
    }

    /// Set the maximum spatial chunk, in pixels per side, the engine may
    /// process in one internal step.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn noise(&self) -> i32 {
        self.noise
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn prepadding(&self) -> u32 {
        self.prepadding
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
