//! Parsed model geometry, stored exactly as it appears in the file.

use corelib::{GrowableBuffer, Vec2, Vec3};

/// One face corner: 1-based indices into the model's lists, 0 = unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    pub position_index: u32,
    pub texture_index: u32,
    pub normal_index: u32,
}

impl FaceCorner {
    pub const fn new(position_index: u32, texture_index: u32, normal_index: u32) -> Self {
        Self {
            position_index,
            texture_index,
            normal_index,
        }
    }
}

/// Triangle or quad, corners in file order (defines winding).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Triangle([FaceCorner; 3]),
    Quad([FaceCorner; 4]),
}

impl Face {
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners().len()
    }

    pub fn corners(&self) -> &[FaceCorner] {
        match self {
            Face::Triangle(c) => c,
            Face::Quad(c) => c,
        }
    }

    /// Number of triangles after fan triangulation.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.corner_count() - 2
    }
}

/// Geometry lists filled by a single load; read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    positions: GrowableBuffer<Vec3>,
    normals: GrowableBuffer<Vec3>,
    texcoords: GrowableBuffer<Vec2>,
    faces: GrowableBuffer<Face>,
}

impl Model {
    pub(crate) fn from_parts(
        positions: GrowableBuffer<Vec3>,
        normals: GrowableBuffer<Vec3>,
        texcoords: GrowableBuffer<Vec2>,
        faces: GrowableBuffer<Face>,
    ) -> Self {
        Self {
            positions,
            normals,
            texcoords,
            faces,
        }
    }

    pub fn positions(&self) -> &GrowableBuffer<Vec3> {
        &self.positions
    }

    pub fn normals(&self) -> &GrowableBuffer<Vec3> {
        &self.normals
    }

    pub fn texcoords(&self) -> &GrowableBuffer<Vec2> {
        &self.texcoords
    }

    pub fn faces(&self) -> &GrowableBuffer<Face> {
        &self.faces
    }

    /// `true` when all four lists are empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.normals.is_empty()
            && self.texcoords.is_empty()
            && self.faces.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_corner_counts() {
        let c = FaceCorner::new(1, 0, 0);
        assert_eq!(Face::Triangle([c; 3]).corner_count(), 3);
        assert_eq!(Face::Quad([c; 4]).corner_count(), 4);
        assert_eq!(Face::Quad([c; 4]).triangle_count(), 2);
    }

    #[test]
    fn default_model_is_empty() {
        let model = Model::default();
        assert!(model.is_empty());
        assert_eq!(model.triangle_count(), 0);
    }
}
