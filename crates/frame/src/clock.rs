/// Turns wall-clock readings into per-frame deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
    max_delta: Option<f32>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Some(0.1))
    }
}

impl FrameClock {
    /// `max_delta` caps a single frame's delta (e.g. after a stall);
    /// `None` disables the cap.
    pub fn new(max_delta: Option<f32>) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Seconds since the previous tick.
    ///
    /// The first tick returns 0. A clock reading earlier than the previous one
    /// yields 0 rather than a negative delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last {
            None => 0.0,
            Some(prev) => (now - prev).max(0.0) as f32,
        };
        self.last = Some(now);
        match self.max_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last
    }

    /// Forget the previous reading; the next tick returns 0.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
