// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use ifc_index_core::{
    Error as CoreError, ExpressId, FaceGroup, IfcEngine, MemoryEngine, MemoryModel, ModelGeometry,
    ModelId, Result as CoreResult, SubsetView, TypeCode, SUBSET_SLOT,
};
use ifc_index_geometry::{extract_mesh, extract_mesh_in_slot, Error};
use std::future::Future;

/// A slab (element 1, two groups) next to a wall (element 2, one group).
/// The slab's second group shares the wall's material.
fn site() -> ModelGeometry<&'static str> {
    ModelGeometry {
        positions: vec![
            // slab, z = 0
            0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 4.0, 4.0, 0.0, 0.0, 4.0, 0.0, //
            // wall, x = 10
            10.0, 0.0, 0.0, 10.0, 3.0, 0.0, 10.0, 3.0, 2.0, 10.0, 0.0, 2.0,
        ],
        express_ids: vec![1, 1, 1, 1, 2, 2, 2, 2],
        index: vec![
            0, 1, 2, // slab, concrete
            4, 5, 6, 4, 6, 7, // wall, plaster
            0, 2, 3, // slab, plaster
        ],
        groups: vec![
            FaceGroup::new(0, 3, 0),
            FaceGroup::new(3, 6, 1),
            FaceGroup::new(9, 3, 1),
        ],
        materials: vec!["concrete", "plaster"],
    }
}

fn load(geometry: ModelGeometry<&'static str>) -> (MemoryEngine<&'static str, ()>, ModelId) {
    let mut engine = MemoryEngine::new();
    let model = engine.load(MemoryModel::new(geometry));
    (engine, model)
}

#[test]
fn test_wall_extracted_from_shared_buffers() {
    let (mut engine, model) = load(site());

    let mesh = extract_mesh(&mut engine, model, 2).unwrap().unwrap();
    let geometry = &mesh.geometry;

    assert_eq!(geometry.vertex_count(), 4);
    assert_eq!(geometry.triangle_count(), 2);
    assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(geometry.express_ids, vec![2, 2, 2, 2]);
    assert_eq!(geometry.positions[..3], [10.0f32, 0.0, 0.0]);
    assert_eq!(geometry.groups, vec![FaceGroup::new(0, 6, 0)]);
    assert_eq!(mesh.materials, vec!["plaster"]);

    for n in geometry.normals.chunks_exact(3) {
        assert_relative_eq!(n[0], 1.0f32, epsilon = 1e-6);
        assert_relative_eq!(n[1], 0.0f32, epsilon = 1e-6);
        assert_relative_eq!(n[2], 0.0f32, epsilon = 1e-6);
    }

    let (min, max) = geometry.bounds();
    assert_eq!((min.x, min.y, min.z), (10.0, 0.0, 0.0));
    assert_eq!((max.x, max.y, max.z), (10.0, 3.0, 2.0));

    assert!(!engine.has_subset(model, SUBSET_SLOT));
}

#[test]
fn test_slab_keeps_group_to_material_correspondence() {
    let (mut engine, model) = load(site());

    let mesh = extract_mesh(&mut engine, model, 1).unwrap().unwrap();

    // The wall's group is empty in the slab's subset and disappears
    assert_eq!(mesh.geometry.groups.len(), 2);
    assert_eq!(mesh.materials, vec!["concrete", "plaster"]);
    for group in &mesh.geometry.groups {
        assert!(mesh.group_material(group).is_some());
    }
    assert_eq!(mesh.geometry.vertex_count(), 4);
    assert!(mesh
        .geometry
        .indices
        .iter()
        .all(|&i| (i as usize) < mesh.geometry.vertex_count()));
}

#[test]
fn test_repeated_extraction_reuses_slot() {
    let (mut engine, model) = load(site());

    // Element 3 has no geometry: no mesh, but the slot is still released
    assert!(extract_mesh(&mut engine, model, 3).unwrap().is_none());
    assert!(!engine.has_subset(model, SUBSET_SLOT));
    assert_eq!(engine.removed_subsets(), 1);

    assert!(extract_mesh(&mut engine, model, 1).unwrap().is_some());
    assert!(extract_mesh(&mut engine, model, 2).unwrap().is_some());
    assert_eq!(engine.removed_subsets(), 3);
}

#[test]
fn test_other_slots_untouched() {
    let (mut engine, model) = load(site());
    engine.create_subset(model, &[1], false, "highlight").unwrap();

    extract_mesh_in_slot(&mut engine, model, 2, "index").unwrap();

    assert!(engine.has_subset(model, "highlight"));
    assert!(!engine.has_subset(model, "index"));
}

#[test]
fn test_malformed_subset_still_released() {
    let mut geometry = site();
    geometry.groups[1].material_index = 7;
    let (mut engine, model) = load(geometry);

    let err = extract_mesh(&mut engine, model, 2).unwrap_err();
    assert!(matches!(err, Error::MalformedSubset(_)));
    assert!(!engine.has_subset(model, SUBSET_SLOT));
}

#[test]
fn test_unknown_model_is_engine_failure() {
    let (mut engine, _) = load(site());
    let err = extract_mesh(&mut engine, 5, 1).unwrap_err();
    assert!(matches!(err, Error::CoreError(CoreError::Engine(_))));
    assert_eq!(engine.removed_subsets(), 0);
}

/// Engine whose subset removal always fails
struct StickySubsets(MemoryEngine<&'static str, ()>);

impl IfcEngine for StickySubsets {
    type Material = &'static str;
    type PropertySet = ();

    fn create_subset(
        &mut self,
        model: ModelId,
        ids: &[ExpressId],
        remove_previous: bool,
        custom_id: &str,
    ) -> CoreResult<()> {
        self.0.create_subset(model, ids, remove_previous, custom_id)
    }

    fn subset(&self, model: ModelId, custom_id: &str) -> CoreResult<SubsetView<'_, &'static str>> {
        self.0.subset(model, custom_id)
    }

    fn remove_subset(&mut self, _model: ModelId, custom_id: &str) -> CoreResult<()> {
        Err(CoreError::engine(format!("cannot remove '{}'", custom_id)))
    }

    fn get_all_items_of_type(
        &self,
        model: ModelId,
        type_code: TypeCode,
        flatten_nested_sets: bool,
    ) -> impl Future<Output = CoreResult<Vec<ExpressId>>> {
        self.0.get_all_items_of_type(model, type_code, flatten_nested_sets)
    }

    fn get_property_sets(
        &self,
        model: ModelId,
        express_id: ExpressId,
    ) -> impl Future<Output = CoreResult<Vec<()>>> {
        self.0.get_property_sets(model, express_id)
    }
}

#[test]
fn test_removal_failure_propagates() {
    let (inner, model) = load(site());
    let mut engine = StickySubsets(inner);

    let err = extract_mesh(&mut engine, model, 2).unwrap_err();
    assert!(err.to_string().contains("cannot remove"));
}
