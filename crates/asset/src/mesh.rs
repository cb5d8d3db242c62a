//! CPU-side indexed mesh, laid out for direct upload by a renderer.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use corelib::GrowableBuffer;

use crate::{
    error::{Attribute, MeshError},
    model::{FaceCorner, Model},
};

const DEFAULT_UV: [f32; 2] = [0.0, 0.0];
const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl Model {
    /// Resolve face corners into a de-duplicated vertex list and fan
    /// triangulated indices. Corner indices are bounds-checked here.
    pub fn to_mesh_data(&self) -> Result<MeshData, MeshError> {
        let mut unique: HashMap<FaceCorner, u32> = HashMap::new();
        let mut vertices: Vec<MeshVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::with_capacity(self.triangle_count() * 3);
        let mut face_indices: Vec<u32> = Vec::with_capacity(4);

        for (face_no, face) in self.faces().iter().enumerate() {
            face_indices.clear();
            for corner in face.corners() {
                let index = match unique.get(corner) {
                    Some(&idx) => idx,
                    None => {
                        let vertex = self.resolve_corner(face_no, corner)?;
                        let idx = u32::try_from(vertices.len())
                            .map_err(|_| MeshError::TooManyVertices)?;
                        vertices.push(vertex);
                        unique.insert(*corner, idx);
                        idx
                    }
                };
                face_indices.push(index);
            }

            // Triangulate fan
            for tri in 1..(face_indices.len() - 1) {
                indices.push(face_indices[0]);
                indices.push(face_indices[tri]);
                indices.push(face_indices[tri + 1]);
            }
        }

        Ok(MeshData::new(vertices, indices))
    }

    fn resolve_corner(&self, face: usize, corner: &FaceCorner) -> Result<MeshVertex, MeshError> {
        let position = lookup(
            self.positions(),
            corner.position_index,
            face,
            Attribute::Position,
        )?
        .ok_or(MeshError::IndexOutOfRange {
            face,
            attribute: Attribute::Position,
            index: 0,
            len: self.positions().size(),
        })?;
        let uv = lookup(self.texcoords(), corner.texture_index, face, Attribute::Texcoord)?
            .map_or(DEFAULT_UV, |t| t.to_array());
        let normal = lookup(self.normals(), corner.normal_index, face, Attribute::Normal)?
            .map_or(DEFAULT_NORMAL, |n| n.to_array());
        Ok(MeshVertex::new(position.to_array(), normal, uv))
    }
}

/// `Ok(None)` for the unset index 0, otherwise the 1-based element.
fn lookup<T: Copy>(
    list: &GrowableBuffer<T>,
    index: u32,
    face: usize,
    attribute: Attribute,
) -> Result<Option<T>, MeshError> {
    if index == 0 {
        return Ok(None);
    }
    list.get(index as usize - 1)
        .map(|v| Some(*v))
        .map_err(|_| MeshError::IndexOutOfRange {
            face,
            attribute,
            index,
            len: list.size(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::load_model_from_str;

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
        assert_eq!(data.vertex_bytes().len(), std::mem::size_of::<MeshVertex>());
        assert_eq!(data.index_bytes().len(), 4);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 1.0 1.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 1.0 1.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1 4/4/1
        "#;
        let mesh = load_model_from_str(src)
            .expect("parse quad")
            .to_mesh_data()
            .expect("build mesh");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
        let mesh = load_model_from_str(src).unwrap().to_mesh_data().unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        // Unset normal/uv fall back to defaults
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = load_model_from_str(src).unwrap().to_mesh_data().unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 0,
                attribute: Attribute::Position,
                index: 3,
                len: 2
            }
        );

        let src = "v 0 0 0\nf 1//2 1 1\n";
        let err = load_model_from_str(src).unwrap().to_mesh_data().unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                attribute: Attribute::Normal,
                ..
            }
        ));
    }

    #[test]
    fn zero_position_index_is_rejected() {
        let src = "v 0 0 0\nf 0 1 1\n";
        let err = load_model_from_str(src).unwrap().to_mesh_data().unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                attribute: Attribute::Position,
                index: 0,
                ..
            }
        ));
    }
}
