use super::{BoundingBox, Point};

const EPSILON: f64 = 1e-9;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Fixed parameters of the course-to-screen mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformConfig {
    /// Counter-clockwise rotation applied in course space, in degrees.
    pub rotation_degrees: f64,
    /// Pixels kept free on every side of the viewport.
    pub padding: f64,
    /// Screen-space shift of the course center; positive y moves down.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Multiplier on top of the fitted scale.
    pub zoom: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            padding: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Axis-aligned footprint of a `width` x `height` rectangle rotated by
/// `radians`.
#[must_use]
pub fn rotated_extent(width: f64, height: f64, radians: f64) -> (f64, f64) {
    let (sin, cos) = radians.sin_cos();
    (
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}

/// Course-space to screen-space mapping for one frame: center on the bounds,
/// scale to fit, rotate, move to the viewport center plus offset, flip Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourseTransform {
    center: Point,
    origin: Point,
    scale: f64,
    sin: f64,
    cos: f64,
}

impl CourseTransform {
    #[must_use]
    pub fn new(bounds: &BoundingBox, viewport: Viewport, config: &TransformConfig) -> Self {
        let radians = config.rotation_degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        let (rotated_w, rotated_h) = rotated_extent(bounds.width(), bounds.height(), radians);
        let available_w = (viewport.width - 2.0 * config.padding).max(0.0);
        let available_h = (viewport.height - 2.0 * config.padding).max(0.0);

        let fit = match (rotated_w > EPSILON, rotated_h > EPSILON) {
            (true, true) => (available_w / rotated_w).min(available_h / rotated_h),
            (true, false) => available_w / rotated_w,
            (false, true) => available_h / rotated_h,
            (false, false) => 1.0,
        };

        let center = viewport.center();
        Self {
            center: bounds.center(),
            origin: Point::new(center.x + config.offset_x, center.y + config.offset_y),
            scale: fit * config.zoom,
            sin,
            cos,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let dx = (point.x - self.center.x) * self.scale;
        let dy = (point.y - self.center.y) * self.scale;
        let rx = dx * self.cos - dy * self.sin;
        let ry = dx * self.sin + dy * self.cos;
        Point::new(self.origin.x + rx, self.origin.y - ry)
    }

    #[must_use]
    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply(*p)).collect()
    }

    /// Inverse of [`apply`](Self::apply). A zero scale collapses everything
    /// onto the course center, so that is what comes back.
    #[must_use]
    pub fn invert(&self, point: Point) -> Point {
        if self.scale.abs() < EPSILON {
            return self.center;
        }
        let rx = point.x - self.origin.x;
        let ry = self.origin.y - point.y;
        let dx = rx * self.cos + ry * self.sin;
        let dy = -rx * self.sin + ry * self.cos;
        Point::new(
            dx / self.scale + self.center.x,
            dy / self.scale + self.center.y,
        )
    }
}

/// One-shot form of [`CourseTransform::apply`].
#[must_use]
pub fn transform(
    point: Point,
    bounds: &BoundingBox,
    viewport: Viewport,
    config: &TransformConfig,
) -> Point {
    CourseTransform::new(bounds, viewport, config).apply(point)
}
