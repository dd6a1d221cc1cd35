use serde::{Deserialize, Serialize};

pub const MIN_HEIGHT: u32 = 1;
pub const MAX_HEIGHT: u32 = 48;
pub const DEFAULT_HEIGHT: u32 = 6;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Height of the proof tree as chosen by the user, clamped to `[1, 48]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Height(u32);

impl Height {
    pub fn new(height: u32) -> Self {
        Self(height.clamp(MIN_HEIGHT, MAX_HEIGHT))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Height {
    fn default() -> Self {
        Self(DEFAULT_HEIGHT)
    }
}

/// Diagram zoom factor, clamped to `[0.5, 2.0]`. NaN falls back to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Zoom(f64);

impl Zoom {
    pub fn new(zoom: f64) -> Self {
        if zoom.is_nan() {
            return Self::default();
        }
        Self(zoom.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}
