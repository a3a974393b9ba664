use crate::{Interval, Point2D};

/// Axis-aligned bounding box in the 2D model plane.
///
/// Used by the spatial index over baked faces. Containment tests are
/// epsilon tolerant so pixels landing exactly on a face edge still find it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
}

impl Aabb {
    /// Create a new AABB from two intervals.
    pub fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// Create the smallest AABB holding every point, or [`Aabb::EMPTY`]
    /// when the iterator is empty.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2D>,
    {
        points.into_iter().fold(Aabb::EMPTY, |acc, p| Aabb {
            x: acc.x.include(p.x),
            y: acc.y.include(p.y),
        })
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
        }
    }

    /// Test if a point lies inside the box, edges included within epsilon.
    pub fn contains(&self, p: Point2D) -> bool {
        self.x.contains_approx(p.x) && self.y.contains_approx(p.y)
    }

    /// Returns the index (0=X, 1=Y) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        if self.x.size() >= self.y.size() {
            0
        } else {
            1
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Point2D {
        Point2D::new(self.x.center(), self.y.center())
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
    };
}
