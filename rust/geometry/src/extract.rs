// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-element mesh extraction.
//!
//! A subset shares its attribute buffers with the whole model, so its index
//! values address the full model. Extraction copies only the referenced
//! vertices into a compact mesh owned by the caller.

use crate::error::{Error, Result};
use crate::mesh::{ExtractedMesh, Mesh};
use crate::normals::calculate_normals;
use ifc_index_core::{ExpressId, FaceGroup, IfcEngine, ModelId, SubsetLease, SubsetView, SUBSET_SLOT};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Extract the geometry of one element using the reserved subset slot.
///
/// Returns `Ok(None)` when the element has no triangulated geometry. The
/// temporary subset is removed before returning on every path.
pub fn extract_mesh<E: IfcEngine>(
    engine: &mut E,
    model: ModelId,
    express_id: ExpressId,
) -> Result<Option<ExtractedMesh<E::Material>>> {
    extract_mesh_in_slot(engine, model, express_id, SUBSET_SLOT)
}

/// Same as [`extract_mesh`], leasing the subset slot named `slot`
pub fn extract_mesh_in_slot<E: IfcEngine>(
    engine: &mut E,
    model: ModelId,
    express_id: ExpressId,
    slot: &str,
) -> Result<Option<ExtractedMesh<E::Material>>> {
    let lease = SubsetLease::acquire(engine, model, &[express_id], slot)?;
    let rebuilt = lease
        .view()
        .map_err(Error::from)
        .and_then(|view| rebuild_subset(&view));

    // A rebuild failure takes precedence over a removal failure
    let released = lease.release();
    let mesh = rebuilt?;
    released?;

    match &mesh {
        Some(mesh) => tracing::debug!(
            model,
            express_id,
            vertices = mesh.geometry.vertex_count(),
            triangles = mesh.geometry.triangle_count(),
            groups = mesh.geometry.groups.len(),
            "Extracted element mesh"
        ),
        None => tracing::debug!(model, express_id, "Element has no triangulated geometry"),
    }

    Ok(mesh)
}

/// Rebuild a compact mesh from a subset view.
///
/// - empty groups are dropped; each surviving group gets the next material
///   slot, so two groups drawing the same original material yield two
///   entries in the materials list
/// - vertices are numbered in the order the index buffer first references them
/// - normals are computed from the rebuilt triangulation
pub fn rebuild_subset<M: Clone>(view: &SubsetView<'_, M>) -> Result<Option<ExtractedMesh<M>>> {
    let Some(index) = view.index else {
        return Ok(None);
    };

    let mut groups = Vec::with_capacity(view.groups.len());
    let mut materials = Vec::with_capacity(view.groups.len());
    for group in view.groups.iter().filter(|g| !g.is_empty()) {
        let material = view
            .materials
            .get(group.material_index as usize)
            .ok_or_else(|| {
                Error::MalformedSubset(format!(
                    "group at {} uses material slot {} but only {} materials exist",
                    group.start,
                    group.material_index,
                    view.materials.len()
                ))
            })?;
        groups.push(FaceGroup {
            material_index: materials.len() as u32,
            ..*group
        });
        materials.push(material.clone());
    }

    let vertex_count = view.vertex_count();
    let mut remap: FxHashMap<u32, u32> = FxHashMap::default();
    let mut mesh = Mesh::with_capacity(0, index.len());

    for &raw in index {
        let compacted = match remap.entry(raw) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => {
                let i = raw as usize;
                if i >= vertex_count {
                    return Err(Error::MalformedSubset(format!(
                        "index {} is past the {} shared vertices",
                        raw, vertex_count
                    )));
                }
                let next = mesh.vertex_count() as u32;
                mesh.push_vertex(&view.positions[i * 3..i * 3 + 3], view.express_ids[i]);
                *slot.insert(next)
            }
        };
        mesh.indices.push(compacted);
    }

    mesh.groups = groups;
    calculate_normals(&mut mesh);

    Ok(Some(ExtractedMesh {
        geometry: mesh,
        materials,
    }))
}
