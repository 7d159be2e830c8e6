// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smooth vertex normals from the mesh's own triangulation.

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};

#[inline]
fn vertex(positions: &[f32], i: usize) -> Point3<f64> {
    Point3::new(
        positions[i * 3] as f64,
        positions[i * 3 + 1] as f64,
        positions[i * 3 + 2] as f64,
    )
}

/// Recompute `mesh.normals` by accumulating unnormalized face normals
/// (area-weighted) on every vertex a triangle references.
///
/// Vertices touched only by degenerate triangles, or by none, get a zero
/// normal. A trailing partial triangle in `indices` is ignored.
pub fn calculate_normals(mesh: &mut Mesh) {
    let vertex_count = mesh.vertex_count();
    mesh.normals.clear();
    if vertex_count == 0 {
        return;
    }

    let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

    for tri in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }

        let v0 = vertex(&mesh.positions, i0);
        let v1 = vertex(&mesh.positions, i1);
        let v2 = vertex(&mesh.positions, i2);

        let normal = (v1 - v0).cross(&(v2 - v0));

        normals[i0] += normal;
        normals[i1] += normal;
        normals[i2] += normal;
    }

    mesh.normals.reserve(vertex_count * 3);
    for normal in normals {
        let normalized = normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        mesh.normals.push(normalized.x as f32);
        mesh.normals.push(normalized.y as f32);
        mesh.normals.push(normalized.z as f32);
    }
}
