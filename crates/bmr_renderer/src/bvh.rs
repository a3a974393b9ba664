//! Bounding Volume Hierarchy over baked faces.
//!
//! A 2D binary tree of model-space bounding boxes. The compositor asks it
//! which bakes cover a given point; leaves hold indices into the bake list
//! so results can be returned in bake (depth) order.

use bmr_math::{Aabb, Point2D};

/// Maximum items per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with item indices.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of items.
    Leaf { items: Vec<usize>, bbox: Aabb },
    /// Empty tree.
    Empty,
}

impl BvhNode {
    /// Build a tree over `items`, each an index into `bounds`.
    fn build(mut items: Vec<usize>, bounds: &[Aabb]) -> Self {
        if items.is_empty() {
            return BvhNode::Empty;
        }

        let bbox = items
            .iter()
            .fold(Aabb::EMPTY, |acc, &i| Aabb::surrounding(&acc, &bounds[i]));

        if items.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf { items, bbox };
        }

        // Median split on the longest axis of the centroid spread
        let centroids = Aabb::from_points(items.iter().map(|&i| bounds[i].centroid()));
        let axis = centroids.longest_axis();
        let key = |i: usize| {
            let c = bounds[i].centroid();
            if axis == 0 {
                c.x
            } else {
                c.y
            }
        };
        items.sort_unstable_by(|&a, &b| key(a).total_cmp(&key(b)));

        let right_items = items.split_off(items.len() / 2);
        BvhNode::Branch {
            left: Box::new(Self::build(items, bounds)),
            right: Box::new(Self::build(right_items, bounds)),
            bbox,
        }
    }

    fn query(&self, p: Point2D, bounds: &[Aabb], out: &mut Vec<usize>) {
        match self {
            BvhNode::Empty => {}
            BvhNode::Leaf { items, bbox } => {
                if bbox.contains(p) {
                    out.extend(items.iter().copied().filter(|&i| bounds[i].contains(p)));
                }
            }
            BvhNode::Branch { left, right, bbox } => {
                if bbox.contains(p) {
                    left.query(p, bounds, out);
                    right.query(p, bounds, out);
                }
            }
        }
    }
}

/// Point query index over a list of bounding boxes.
#[derive(Debug)]
pub struct SpatialIndex {
    bounds: Vec<Aabb>,
    root: BvhNode,
}

impl SpatialIndex {
    pub fn new(bounds: Vec<Aabb>) -> Self {
        let root = BvhNode::build((0..bounds.len()).collect(), &bounds);
        Self { bounds, root }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Collect the indices of every box containing `p` (edges inclusive)
    /// into `out`, in ascending order. `out` is cleared first.
    pub fn query_point(&self, p: Point2D, out: &mut Vec<usize>) {
        out.clear();
        self.root.query(p, &self.bounds, out);
        out.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Aabb {
        Aabb::from_points([Point2D::new(x, y), Point2D::new(x + size, y + size)])
    }

    fn brute_force(bounds: &[Aabb], p: Point2D) -> Vec<usize> {
        (0..bounds.len()).filter(|&i| bounds[i].contains(p)).collect()
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::new(Vec::new());
        assert!(index.is_empty());
        assert!(matches!(index.root, BvhNode::Empty));

        let mut out = vec![7];
        index.query_point(Point2D::new(0.0, 0.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_leaf() {
        let index = SpatialIndex::new(vec![square(0.0, 0.0, 1.0)]);
        assert!(matches!(index.root, BvhNode::Leaf { .. }));

        let mut out = Vec::new();
        index.query_point(Point2D::new(1.0, 1.0), &mut out);
        assert_eq!(out, vec![0]);

        index.query_point(Point2D::new(1.5, 1.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_matches_brute_force() {
        // A grid of overlapping squares forces several levels of branches
        let bounds: Vec<Aabb> = (0..40)
            .map(|i| square((i % 8) as f64 * 1.5, (i / 8) as f64 * 1.5, 2.0))
            .collect();
        let index = SpatialIndex::new(bounds.clone());
        assert!(matches!(index.root, BvhNode::Branch { .. }));

        let mut out = Vec::new();
        for qy in 0..20 {
            for qx in 0..30 {
                let p = Point2D::new(qx as f64 * 0.45, qy as f64 * 0.45);
                index.query_point(p, &mut out);
                assert_eq!(out, brute_force(&bounds, p), "query at {p:?}");
            }
        }
    }
}
