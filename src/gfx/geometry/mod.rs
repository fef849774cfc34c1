//! # Cube Geometry
//!
//! The viewer draws one fixed mesh. The static tables in [`cube`] describe it the way it
//! is authored (8 corners, 12 edges, 6 quads); [`GeometryData`] expands them once at
//! startup into the vertex and index lists the GPU consumes.
//!
//! Faces are expanded to 4 vertices each so every corner can carry its face's color,
//! normal and texture coordinate. Each quad becomes two triangles.

pub mod cube;

use cgmath::{InnerSpace, Vector3};

use crate::gfx::rendering::vertex::Vertex3D;
use cube::{EDGES, FACES, FACE_COLORS, TEX_COORDS, VERTICES};

/// Cube geometry ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Face corners, 4 per face, with color, normal and texture coordinates
    pub face_vertices: Vec<Vertex3D>,
    /// Triangle list indices into `face_vertices`
    pub face_indices: Vec<u32>,
    /// The 8 cube corners, position only
    pub edge_vertices: Vec<Vertex3D>,
    /// Line list indices into `edge_vertices`
    pub edge_indices: Vec<u32>,
}

impl GeometryData {
    /// Expands the static cube tables
    pub fn cube() -> Self {
        let mut face_vertices = Vec::with_capacity(FACES.len() * 4);
        let mut face_indices = Vec::with_capacity(FACES.len() * 6);

        for (face_index, face) in FACES.iter().enumerate() {
            let normal = outward_normal(face);
            let base = face_vertices.len() as u32;

            for (slot, &corner) in face.iter().enumerate() {
                face_vertices.push(Vertex3D {
                    position: VERTICES[corner],
                    normal: normal.into(),
                    color: FACE_COLORS[face_index],
                    tex_coords: TEX_COORDS[slot],
                });
            }

            face_indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        let edge_vertices = VERTICES.iter().copied().map(Vertex3D::position_only).collect();
        let edge_indices = EDGES.iter().flatten().copied().collect();

        Self {
            face_vertices,
            face_indices,
            edge_vertices,
            edge_indices,
        }
    }

    /// Get the number of triangles in the face pass
    pub fn triangle_count(&self) -> usize {
        self.face_indices.len() / 3
    }

    /// Get the number of lines in the wireframe pass
    pub fn line_count(&self) -> usize {
        self.edge_indices.len() / 2
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::cube()
    }
}

/// Faces are wound clockwise seen from outside, so the outward normal is the
/// negated cross product of the first two edges
fn outward_normal(face: &[usize; 4]) -> Vector3<f32> {
    let v0 = Vector3::from(VERTICES[face[0]]);
    let v1 = Vector3::from(VERTICES[face[1]]);
    let v2 = Vector3::from(VERTICES[face[2]]);
    -(v1 - v0).cross(v2 - v0).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = GeometryData::cube();
        assert_eq!(cube.face_vertices.len(), 24); // 6 faces * 4 corners
        assert_eq!(cube.face_indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.edge_vertices.len(), 8);
        assert_eq!(cube.line_count(), 12);
    }

    #[test]
    fn test_indices_in_range() {
        let cube = GeometryData::cube();
        assert!(cube
            .face_indices
            .iter()
            .all(|&i| (i as usize) < cube.face_vertices.len()));
        assert!(cube
            .edge_indices
            .iter()
            .all(|&i| (i as usize) < cube.edge_vertices.len()));
    }

    #[test]
    fn test_normals_point_outward() {
        let cube = GeometryData::cube();
        for face in cube.face_vertices.chunks(4) {
            let normal = Vector3::from(face[0].normal);
            let center = face
                .iter()
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, v| acc + Vector3::from(v.position))
                / 4.0;
            // Face centers of a ±1 cube are the unit axis points, equal to the normal
            assert!((center - normal).magnitude() < 1e-6, "{:?} vs {:?}", center, normal);
            assert!(face.iter().all(|v| v.normal == face[0].normal));
        }
    }

    #[test]
    fn test_faces_carry_their_color_and_cycle_tex_coords() {
        let cube = GeometryData::cube();
        for (face_index, face) in cube.face_vertices.chunks(4).enumerate() {
            for (slot, vertex) in face.iter().enumerate() {
                assert_eq!(vertex.color, FACE_COLORS[face_index]);
                assert_eq!(vertex.tex_coords, TEX_COORDS[slot]);
            }
        }
    }

    #[test]
    fn test_edges_join_adjacent_corners() {
        // Every edge of a ±1 cube spans exactly one axis with length 2
        for [a, b] in EDGES {
            let d = Vector3::from(VERTICES[a as usize]) - Vector3::from(VERTICES[b as usize]);
            assert!((d.magnitude() - 2.0).abs() < 1e-6);
        }
    }
}
