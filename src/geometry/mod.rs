pub mod bounds;
pub mod hull;
pub mod transform;

pub use bounds::*;
pub use hull::*;
pub use transform::*;

use serde::{Deserialize, Serialize};

/// A 2D coordinate. Whether it lives in course space or screen space is up to
/// the caller; the two only meet through [`CourseTransform`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise `self + (other - self) * t`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}
