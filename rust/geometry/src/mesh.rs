// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use ifc_index_core::FaceGroup;
use nalgebra::Point3;

/// Self-contained triangle mesh of one or more elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Owning element of each vertex
    pub express_ids: Vec<u32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
    /// Index runs drawn with one material each
    pub groups: Vec<FaceGroup>,
}

/// A mesh paired with the materials its groups refer to.
///
/// `geometry.groups[i].material_index` is a valid index into `materials`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMesh<M> {
    pub geometry: Mesh,
    pub materials: Vec<M>,
}

impl<M> ExtractedMesh<M> {
    /// Material drawn by a group of the geometry
    pub fn group_material(&self, group: &FaceGroup) -> Option<&M> {
        self.materials.get(group.material_index as usize)
    }
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            express_ids: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
            groups: Vec::new(),
        }
    }

    /// Append a vertex copied from a flat position buffer
    #[inline]
    pub fn push_vertex(&mut self, position: &[f32], express_id: u32) {
        self.positions.extend_from_slice(&position[..3]);
        self.express_ids.push(express_id);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.bounds(), (Point3::origin(), Point3::origin()));
    }

    #[test]
    fn test_push_vertex() {
        let mut mesh = Mesh::with_capacity(1, 0);
        mesh.push_vertex(&[1.0, 2.0, 3.0, 9.0], 42);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.express_ids, vec![42]);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = Mesh::new();
        mesh.push_vertex(&[-1.0, 4.0, 0.5], 1);
        mesh.push_vertex(&[3.0, -2.0, 2.5], 1);
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(-1.0, -2.0, 0.5));
        assert_eq!(max, Point3::new(3.0, 4.0, 2.5));
    }

    #[test]
    fn test_group_material_lookup() {
        let mesh = ExtractedMesh {
            geometry: Mesh {
                groups: vec![FaceGroup::new(0, 3, 1), FaceGroup::new(3, 3, 5)],
                ..Mesh::default()
            },
            materials: vec!["steel", "paint"],
        };
        assert_eq!(mesh.group_material(&mesh.geometry.groups[0]), Some(&"paint"));
        assert_eq!(mesh.group_material(&mesh.geometry.groups[1]), None);
    }
}
