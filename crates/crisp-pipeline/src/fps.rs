use std::time::Duration;

/// Instantaneous frames-per-second from the latest process call's elapsed
/// wall time. Only the most recent sample is kept.
#[derive(Debug, Default)]
pub struct FpsCounter {
    last: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's elapsed time and return the updated FPS.
    ///
    /// A zero elapsed time would divide by zero; the prior value (or the
    /// undefined sentinel, if there is none yet) is retained instead.
    pub fn update(&mut self, elapsed: Duration) -> Option<f64> {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.last = Some(1.0 / secs);
        }
        self.last
    }

    /// The most recent FPS value, or `None` before the first valid sample.
    pub fn value(&self) -> Option<f64> {
        self.last
    }
}
