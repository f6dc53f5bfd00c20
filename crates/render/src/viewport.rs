use serde::{Deserialize, Serialize};

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` for a zero height.
    pub fn aspect(&self) -> Option<f32> {
        (self.height != 0).then(|| self.width as f32 / self.height as f32)
    }

    /// A minimised window reports a zero dimension; projecting it is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
