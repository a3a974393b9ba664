//! Axis-aligned boxes built from six faces.

use std::sync::Arc;

use bmr_math::{Point3D, Vector};
use serde::{Deserialize, Serialize};

use crate::argb_image::ArgbImage;
use crate::blend::BlendMode;
use crate::error::{expect_len, CoreResult};
use crate::face::{compare_depth, Face};

/// One of the six sides of a [`Cuboid`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Canonical order used by every six-element slice in this module.
    pub const ALL: [Direction; 6] = [
        Self::Up,
        Self::Down,
        Self::North,
        Self::East,
        Self::South,
        Self::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Tie-breaker used when opposite faces z-fight.
    pub const fn priority(self) -> i8 {
        match self {
            Self::Up | Self::East | Self::South => 1,
            Self::Down | Self::North | Self::West => 0,
        }
    }
}

/// A box of six faces with fixed adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    faces: [Face; 6],
    by_depth: [Direction; 6],
}

impl Cuboid {
    /// Assemble a cuboid from faces given in [`Direction::ALL`] order.
    ///
    /// Opposites and priorities are overwritten to match the direction each
    /// face was placed at.
    pub fn new(faces: [Face; 6]) -> Self {
        let mut faces = faces;
        for (face, direction) in faces.iter_mut().zip(Direction::ALL) {
            face.set_opposite(Some(direction.opposite()));
            face.set_priority(direction.priority());
        }
        let mut cuboid = Self {
            faces,
            by_depth: Direction::ALL,
        };
        cuboid.sort_faces();
        cuboid
    }

    /// Build the box spanned by two opposite corners. `images` is in
    /// [`Direction::ALL`] order and must hold 6 entries.
    pub fn from_corners(
        p1: Point3D,
        p2: Point3D,
        images: &[Option<Arc<ArgbImage>>],
    ) -> CoreResult<Self> {
        expect_len("images", images.len(), 6)?;
        let p = Point3D::new;
        let corners: [[Point3D; 4]; 6] = [
            // up
            [
                p(p1.x, p2.y, p1.z),
                p(p2.x, p2.y, p1.z),
                p(p2.x, p2.y, p2.z),
                p(p1.x, p2.y, p2.z),
            ],
            // down
            [
                p(p1.x, p1.y, p1.z),
                p(p1.x, p1.y, p2.z),
                p(p2.x, p1.y, p2.z),
                p(p2.x, p1.y, p1.z),
            ],
            // north
            [
                p(p2.x, p2.y, p1.z),
                p(p1.x, p2.y, p1.z),
                p(p1.x, p1.y, p1.z),
                p(p2.x, p1.y, p1.z),
            ],
            // east
            [
                p(p2.x, p2.y, p2.z),
                p(p2.x, p2.y, p1.z),
                p(p2.x, p1.y, p1.z),
                p(p2.x, p1.y, p2.z),
            ],
            // south
            [
                p(p1.x, p2.y, p2.z),
                p(p2.x, p2.y, p2.z),
                p(p2.x, p1.y, p2.z),
                p(p1.x, p1.y, p2.z),
            ],
            // west
            [
                p(p1.x, p2.y, p1.z),
                p(p1.x, p2.y, p2.z),
                p(p1.x, p1.y, p2.z),
                p(p1.x, p1.y, p1.z),
            ],
        ];

        let mut i = 0;
        let faces = corners.map(|points| {
            let face = Face::new(images[i].clone(), points);
            i += 1;
            face
        });
        Ok(Self::new(faces))
    }

    pub fn face(&self, direction: Direction) -> &Face {
        &self.faces[direction.index()]
    }

    pub fn face_mut(&mut self, direction: Direction) -> &mut Face {
        &mut self.faces[direction.index()]
    }

    /// The face opposite `direction`'s face.
    pub fn opposite_of(&self, direction: Direction) -> &Face {
        self.face(direction.opposite())
    }

    /// Faces in [`Direction::ALL`] order.
    pub fn faces(&self) -> &[Face; 6] {
        &self.faces
    }

    /// Directions sorted by ascending average z.
    pub fn faces_by_depth(&self) -> &[Direction; 6] {
        &self.by_depth
    }

    pub fn set_images(&mut self, images: &[Option<Arc<ArgbImage>>]) -> CoreResult<()> {
        expect_len("images", images.len(), 6)?;
        for (face, image) in self.faces.iter_mut().zip(images) {
            face.set_image(image.clone());
        }
        Ok(())
    }

    pub fn set_overlays(&mut self, overlays: &[Vec<Arc<ArgbImage>>]) -> CoreResult<()> {
        expect_len("overlays", overlays.len(), 6)?;
        for (face, layers) in self.faces.iter_mut().zip(overlays) {
            face.set_overlays(layers.clone());
        }
        Ok(())
    }

    pub fn set_overlay_blend_modes(&mut self, modes: &[Vec<Option<BlendMode>>]) -> CoreResult<()> {
        expect_len("blend modes", modes.len(), 6)?;
        for (face, modes) in self.faces.iter_mut().zip(modes) {
            face.set_overlay_blend_modes(modes.clone());
        }
        Ok(())
    }

    pub fn rotate(&mut self, x: f64, y: f64, z: f64, save_axis: bool) {
        for face in &mut self.faces {
            face.rotate(x, y, z, save_axis);
        }
        self.sort_faces();
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for face in &mut self.faces {
            face.translate(x, y, z);
        }
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        for face in &mut self.faces {
            face.scale(x, y, z);
        }
    }

    pub fn flip_about_plane(&mut self, x: bool, y: bool, z: bool) {
        for face in &mut self.faces {
            face.flip_about_plane(x, y, z);
        }
        self.sort_faces();
    }

    pub fn update_lighting(&mut self, direction: Vector, ambient: f64, max: f64) {
        for face in &mut self.faces {
            face.update_lighting(direction, ambient, max);
        }
    }

    /// Re-sort the depth order. Stable, so ties keep direction order.
    pub fn sort_faces(&mut self) {
        let faces = &self.faces;
        self.by_depth
            .sort_by(|a, b| compare_depth(&faces[a.index()], &faces[b.index()]));
    }
}
