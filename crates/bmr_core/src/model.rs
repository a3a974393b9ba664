//! A renderable collection of cuboids.

use bmr_math::Vector;

use crate::cuboid::{Cuboid, Direction};
use crate::face::{compare_depth, Face};

/// Handle to one face of one component of a [`Model`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceRef {
    pub component: usize,
    pub direction: Direction,
}

/// Cuboids plus the flattened list of all their faces, kept sorted by
/// ascending average z so that faces further back come first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    components: Vec<Cuboid>,
    faces: Vec<FaceRef>,
}

impl Model {
    pub fn new(components: Vec<Cuboid>) -> Self {
        let mut model = Self {
            components: Vec::with_capacity(components.len()),
            faces: Vec::with_capacity(components.len() * 6),
        };
        model.extend(components);
        model
    }

    /// Move every component of `other` into this model.
    pub fn append(&mut self, other: Model) {
        self.extend(other.components);
    }

    pub fn push(&mut self, component: Cuboid) {
        self.extend(std::iter::once(component));
    }

    fn extend(&mut self, components: impl IntoIterator<Item = Cuboid>) {
        for cuboid in components {
            let component = self.components.len();
            self.faces.extend(
                cuboid
                    .faces_by_depth()
                    .iter()
                    .map(|&direction| FaceRef {
                        component,
                        direction,
                    }),
            );
            self.components.push(cuboid);
        }
        self.sort_faces();
    }

    pub fn components(&self) -> &[Cuboid] {
        &self.components
    }

    /// Edit one component in place, then restore the depth order of the
    /// face list. Returns `None` if `index` is out of range.
    pub fn update_component<R>(&mut self, index: usize, f: impl FnOnce(&mut Cuboid) -> R) -> Option<R> {
        let result = f(self.components.get_mut(index)?);
        self.sort_faces();
        Some(result)
    }

    /// Every face handle in depth order.
    pub fn faces(&self) -> &[FaceRef] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Resolve a handle. Panics if `face` does not belong to this model.
    pub fn face(&self, face: FaceRef) -> &Face {
        self.components[face.component].face(face.direction)
    }

    /// The face across the box from `face`, if it has one.
    pub fn opposite(&self, face: FaceRef) -> Option<&Face> {
        let cuboid = &self.components[face.component];
        cuboid
            .face(face.direction)
            .opposite()
            .map(|direction| cuboid.face(direction))
    }

    /// Faces in depth order, each paired with its opposite.
    pub fn faces_by_depth(&self) -> impl Iterator<Item = (&Face, Option<&Face>)> + '_ {
        self.faces
            .iter()
            .map(move |&face| (self.face(face), self.opposite(face)))
    }

    pub fn rotate(&mut self, x: f64, y: f64, z: f64, save_axis: bool) {
        for cuboid in &mut self.components {
            cuboid.rotate(x, y, z, save_axis);
        }
        self.sort_faces();
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for cuboid in &mut self.components {
            cuboid.translate(x, y, z);
        }
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        for cuboid in &mut self.components {
            cuboid.scale(x, y, z);
        }
    }

    pub fn flip_about_plane(&mut self, x: bool, y: bool, z: bool) {
        for cuboid in &mut self.components {
            cuboid.flip_about_plane(x, y, z);
        }
        self.sort_faces();
    }

    pub fn update_lighting(&mut self, direction: Vector, ambient: f64, max: f64) {
        for cuboid in &mut self.components {
            cuboid.update_lighting(direction, ambient, max);
        }
    }

    /// Re-sort the flattened face list by average z.
    pub fn sort_faces(&mut self) {
        let components = &self.components;
        self.faces.sort_by(|a, b| {
            compare_depth(
                components[a.component].face(a.direction),
                components[b.component].face(b.direction),
            )
        });
    }
}
