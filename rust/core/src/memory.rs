// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory engine over pre-tessellated model buffers.
//!
//! Useful when the host already holds the triangulated model (e.g. geometry
//! streamed from a server) and for exercising extraction without a full IFC
//! engine. Subsets are built like a viewer engine builds them: one subset
//! group per model group, in model order, each holding the triangles whose
//! first vertex belongs to a selected element. Groups that end up without
//! triangles are kept with a zero count.

use crate::engine::{ExpressId, FaceGroup, IfcEngine, ModelId, SubsetView, TypeCode};
use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Triangulated geometry of a whole model
#[derive(Debug, Clone, Default)]
pub struct ModelGeometry<M> {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Owning element of each vertex
    pub express_ids: Vec<u32>,
    /// Triangle indices into `positions`/`express_ids`
    pub index: Vec<u32>,
    pub groups: Vec<FaceGroup>,
    pub materials: Vec<M>,
}

/// A model ready to be loaded: geometry, type tables and property sets
#[derive(Debug, Clone)]
pub struct MemoryModel<M, P> {
    geometry: ModelGeometry<M>,
    items_by_type: FxHashMap<TypeCode, Vec<ExpressId>>,
    property_sets: FxHashMap<ExpressId, Vec<P>>,
}

impl<M, P> MemoryModel<M, P> {
    pub fn new(geometry: ModelGeometry<M>) -> Self {
        Self {
            geometry,
            items_by_type: FxHashMap::default(),
            property_sets: FxHashMap::default(),
        }
    }

    /// Register `express_id` as an element of `type_code`
    pub fn with_item(mut self, type_code: TypeCode, express_id: ExpressId) -> Self {
        self.items_by_type
            .entry(type_code)
            .or_default()
            .push(express_id);
        self
    }

    /// Attach a property set to an element
    pub fn with_property_set(mut self, express_id: ExpressId, property_set: P) -> Self {
        self.property_sets
            .entry(express_id)
            .or_default()
            .push(property_set);
        self
    }
}

#[derive(Debug)]
struct Subset {
    index: Option<Vec<u32>>,
    groups: Vec<FaceGroup>,
}

#[derive(Debug)]
struct LoadedModel<M, P> {
    model: MemoryModel<M, P>,
    subsets: FxHashMap<String, Subset>,
}

/// [`IfcEngine`] backed by in-memory models
#[derive(Debug)]
pub struct MemoryEngine<M, P> {
    models: FxHashMap<ModelId, LoadedModel<M, P>>,
    next_model_id: ModelId,
    removed_subsets: usize,
}

impl<M, P> Default for MemoryEngine<M, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P> MemoryEngine<M, P> {
    pub fn new() -> Self {
        Self {
            models: FxHashMap::default(),
            next_model_id: 0,
            removed_subsets: 0,
        }
    }

    /// Load a model, returning its ID
    pub fn load(&mut self, model: MemoryModel<M, P>) -> ModelId {
        let id = self.next_model_id;
        self.next_model_id += 1;
        self.models.insert(
            id,
            LoadedModel {
                model,
                subsets: FxHashMap::default(),
            },
        );
        id
    }

    /// Check whether a subset named `custom_id` currently exists
    pub fn has_subset(&self, model: ModelId, custom_id: &str) -> bool {
        self.models
            .get(&model)
            .is_some_and(|m| m.subsets.contains_key(custom_id))
    }

    /// Number of successful subset removals since creation
    pub fn removed_subsets(&self) -> usize {
        self.removed_subsets
    }

    fn loaded(&self, model: ModelId) -> Result<&LoadedModel<M, P>> {
        self.models
            .get(&model)
            .ok_or_else(|| Error::engine(format!("Model {} is not loaded", model)))
    }

    fn loaded_mut(&mut self, model: ModelId) -> Result<&mut LoadedModel<M, P>> {
        self.models
            .get_mut(&model)
            .ok_or_else(|| Error::engine(format!("Model {} is not loaded", model)))
    }
}

/// Select the triangles of `ids` out of the model's groups
fn build_subset<M>(geometry: &ModelGeometry<M>, ids: &[ExpressId]) -> Result<Subset> {
    let selected: FxHashSet<ExpressId> = ids.iter().copied().collect();
    let mut index = Vec::new();
    let mut groups = Vec::with_capacity(geometry.groups.len());

    for group in &geometry.groups {
        let start = group.start as usize;
        let end = start + group.count as usize;
        let run = geometry.index.get(start..end).ok_or_else(|| {
            Error::engine(format!(
                "Group {}..{} exceeds index buffer of length {}",
                start,
                end,
                geometry.index.len()
            ))
        })?;

        let subset_start = index.len();
        for tri in run.chunks_exact(3) {
            let owner = geometry.express_ids.get(tri[0] as usize).ok_or_else(|| {
                Error::engine(format!("Index {} has no express ID attribute", tri[0]))
            })?;
            if selected.contains(owner) {
                index.extend_from_slice(tri);
            }
        }

        groups.push(FaceGroup::new(
            subset_start as u32,
            (index.len() - subset_start) as u32,
            group.material_index,
        ));
    }

    Ok(Subset {
        index: (!index.is_empty()).then_some(index),
        groups,
    })
}

impl<M: Clone, P: Clone> IfcEngine for MemoryEngine<M, P> {
    type Material = M;
    type PropertySet = P;

    fn create_subset(
        &mut self,
        model: ModelId,
        ids: &[ExpressId],
        remove_previous: bool,
        custom_id: &str,
    ) -> Result<()> {
        let loaded = self.loaded_mut(model)?;
        if loaded.subsets.contains_key(custom_id) && !remove_previous {
            return Err(Error::engine(format!(
                "Subset '{}' already exists on model {}",
                custom_id, model
            )));
        }
        let subset = build_subset(&loaded.model.geometry, ids)?;
        loaded.subsets.insert(custom_id.to_string(), subset);
        Ok(())
    }

    fn subset(&self, model: ModelId, custom_id: &str) -> Result<SubsetView<'_, M>> {
        let loaded = self.loaded(model)?;
        let subset = loaded.subsets.get(custom_id).ok_or_else(|| {
            Error::engine(format!("Subset '{}' does not exist on model {}", custom_id, model))
        })?;
        let geometry = &loaded.model.geometry;
        Ok(SubsetView {
            positions: &geometry.positions,
            express_ids: &geometry.express_ids,
            index: subset.index.as_deref(),
            groups: &subset.groups,
            materials: &geometry.materials,
        })
    }

    fn remove_subset(&mut self, model: ModelId, custom_id: &str) -> Result<()> {
        let loaded = self.loaded_mut(model)?;
        if loaded.subsets.remove(custom_id).is_none() {
            return Err(Error::engine(format!(
                "Subset '{}' does not exist on model {}",
                custom_id, model
            )));
        }
        self.removed_subsets += 1;
        Ok(())
    }

    /// Memory models have no nested sets; `flatten_nested_sets` has no effect
    async fn get_all_items_of_type(
        &self,
        model: ModelId,
        type_code: TypeCode,
        _flatten_nested_sets: bool,
    ) -> Result<Vec<ExpressId>> {
        let loaded = self.loaded(model)?;
        Ok(loaded
            .model
            .items_by_type
            .get(&type_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_property_sets(&self, model: ModelId, express_id: ExpressId) -> Result<Vec<P>> {
        let loaded = self.loaded(model)?;
        Ok(loaded
            .model
            .property_sets
            .get(&express_id)
            .cloned()
            .unwrap_or_default())
    }
}
