use super::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            max_x: point.x,
            min_y: point.y,
            max_y: point.y,
        }
    }

    pub fn expand_to(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Returns `None` for an empty slice; callers skip drawing in that case.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    bounding_box_of(points)
}

#[must_use]
pub fn bounding_box_of<'a, I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut points = points.into_iter();
    let mut bounds = BoundingBox::from_point(*points.next()?);
    for point in points {
        bounds.expand_to(*point);
    }
    Some(bounds)
}
