// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exclusive leases over a named subset slot.

use crate::engine::{ExpressId, IfcEngine, ModelId, SubsetView};
use crate::error::Result;

/// Slot name reserved for temporary per-element subsets.
///
/// Callers creating their own subsets on the same model must use another name,
/// or their subset is replaced and then removed by mesh extraction.
pub const SUBSET_SLOT: &str = "GetMesh_CustomID";

/// Exclusive hold on one subset slot of one model.
///
/// Acquiring creates the subset (replacing any previous one under the same
/// name). The subset is removed exactly once: by [`SubsetLease::release`],
/// which reports removal errors, or on drop, which can only log them.
pub struct SubsetLease<'e, E: IfcEngine> {
    engine: &'e mut E,
    model: ModelId,
    slot: &'e str,
    released: bool,
}

impl<'e, E: IfcEngine> SubsetLease<'e, E> {
    /// Create the subset selecting `ids` under `slot`
    pub fn acquire(
        engine: &'e mut E,
        model: ModelId,
        ids: &[ExpressId],
        slot: &'e str,
    ) -> Result<Self> {
        engine.create_subset(model, ids, true, slot)?;
        Ok(Self {
            engine,
            model,
            slot,
            released: false,
        })
    }

    /// Geometry of the leased subset
    pub fn view(&self) -> Result<SubsetView<'_, E::Material>> {
        self.engine.subset(self.model, self.slot)
    }

    #[inline]
    pub fn model(&self) -> ModelId {
        self.model
    }

    #[inline]
    pub fn slot(&self) -> &str {
        self.slot
    }

    /// Remove the subset, propagating any engine error
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.engine.remove_subset(self.model, self.slot)
    }
}

impl<E: IfcEngine> Drop for SubsetLease<'_, E> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.engine.remove_subset(self.model, self.slot) {
            tracing::warn!(
                model = self.model,
                slot = self.slot,
                error = %err,
                "Failed to remove subset while dropping lease"
            );
        }
    }
}
