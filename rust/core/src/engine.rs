// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Query surface of the IFC engine that owns the loaded models.
//!
//! The engine keeps every model's geometry in shared buffers. A *subset* is a
//! named, engine-managed selection over those buffers: it carries its own index
//! buffer and face groups, but the position and express ID attributes are the
//! model's own arrays, so subset indices point into the full model.

use crate::error::Result;
use std::future::Future;

/// Identifier of a model loaded in the engine
pub type ModelId = u32;

/// Identifier of an element within a model
pub type ExpressId = u32;

/// IFC entity type code (e.g. `IFCWALL`)
pub type TypeCode = u32;

/// A contiguous run of an index buffer drawn with one material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceGroup {
    /// First index in the index buffer
    pub start: u32,
    /// Number of indices (three per triangle)
    pub count: u32,
    /// Slot in the accompanying materials list
    pub material_index: u32,
}

impl FaceGroup {
    /// Create a new face group
    #[inline]
    pub fn new(start: u32, count: u32, material_index: u32) -> Self {
        Self {
            start,
            count,
            material_index,
        }
    }

    /// Group has no triangles assigned
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.count as usize / 3
    }
}

/// Borrowed, read-only view of a subset's geometry.
///
/// `index` values address `positions` (three floats per vertex) and
/// `express_ids` (one per vertex) of the whole model, not a compacted range.
#[derive(Debug, Clone, Copy)]
pub struct SubsetView<'a, M> {
    pub positions: &'a [f32],
    pub express_ids: &'a [u32],
    /// `None` when the subset has no triangulated geometry
    pub index: Option<&'a [u32]>,
    pub groups: &'a [FaceGroup],
    pub materials: &'a [M],
}

impl<M> SubsetView<'_, M> {
    /// Number of vertices addressable through the shared attributes
    #[inline]
    pub fn vertex_count(&self) -> usize {
        (self.positions.len() / 3).min(self.express_ids.len())
    }
}

/// Capabilities consumed from the IFC engine.
///
/// Subset creation and removal mutate engine state keyed by
/// `(model, custom_id)`; callers must not interleave two subsets under the same
/// name on one model. Enumeration and property queries are read-only and may
/// suspend.
pub trait IfcEngine {
    /// Material attached to a face group
    type Material: Clone;
    /// Opaque property set record
    type PropertySet;

    /// Create (or replace, when `remove_previous` is set) the subset named
    /// `custom_id` selecting the geometry of `ids`
    fn create_subset(
        &mut self,
        model: ModelId,
        ids: &[ExpressId],
        remove_previous: bool,
        custom_id: &str,
    ) -> Result<()>;

    /// Geometry of the subset named `custom_id`
    fn subset(&self, model: ModelId, custom_id: &str) -> Result<SubsetView<'_, Self::Material>>;

    /// Release the subset named `custom_id`
    fn remove_subset(&mut self, model: ModelId, custom_id: &str) -> Result<()>;

    /// All elements of one type
    fn get_all_items_of_type(
        &self,
        model: ModelId,
        type_code: TypeCode,
        flatten_nested_sets: bool,
    ) -> impl Future<Output = Result<Vec<ExpressId>>>;

    /// Property sets attached to one element
    fn get_property_sets(
        &self,
        model: ModelId,
        express_id: ExpressId,
    ) -> impl Future<Output = Result<Vec<Self::PropertySet>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_group_counts() {
        let group = FaceGroup::new(6, 9, 2);
        assert!(!group.is_empty());
        assert_eq!(group.triangle_count(), 3);
        assert!(FaceGroup::new(9, 0, 0).is_empty());
    }

    #[test]
    fn test_view_vertex_count_uses_shorter_attribute() {
        let positions = [0.0f32; 12];
        let express_ids = [1u32, 1, 1];
        let view: SubsetView<'_, ()> = SubsetView {
            positions: &positions,
            express_ids: &express_ids,
            index: None,
            groups: &[],
            materials: &[],
        };
        assert_eq!(view.vertex_count(), 3);
    }
}
