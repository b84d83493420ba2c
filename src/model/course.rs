use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point, bounding_box_of};

/// One hole of the course. Polygons are closed rings given as vertex lists.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Hole {
    pub fairway: Vec<Point>,
    pub green: Vec<Point>,
    #[serde(default)]
    pub tees: Vec<Vec<Point>>,
    pub flag: Point,
    #[serde(default)]
    pub bunkers: Vec<Vec<Point>>,
    #[serde(default)]
    pub water: Vec<Vec<Point>>,
}

impl Hole {
    /// Every vertex that belongs to this hole, flag included.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.fairway
            .iter()
            .chain(self.green.iter())
            .chain(self.tees.iter().flatten())
            .chain(self.bunkers.iter().flatten())
            .chain(self.water.iter().flatten())
            .chain(std::iter::once(&self.flag))
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        bounding_box_of(self.points())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct CourseData {
    pub holes: Vec<Hole>,
    #[serde(default)]
    pub water: Vec<Vec<Point>>,
    #[serde(default)]
    pub bridges: Vec<Vec<Point>>,
}

impl CourseData {
    /// Union of every hole's bounds. Course-wide water and bridges are
    /// decoration around the holes and do not widen the view.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.holes
            .iter()
            .filter_map(Hole::bounds)
            .reduce(BoundingBox::union)
    }

    /// Holes are numbered from 1 in list order.
    pub fn hole_mut(&mut self, number: u32) -> Option<&mut Hole> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        self.holes.get_mut(idx)
    }

    #[must_use]
    pub fn hole(&self, number: u32) -> Option<&Hole> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        self.holes.get(idx)
    }
}
