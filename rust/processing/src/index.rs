// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-keyed element index.
//!
//! Elements of the requested types are enumerated concurrently per type, then
//! processed strictly one after another: every element's mesh is extracted
//! through the same subset slot, which two extractions must never hold at once.

use crate::config::Config;
use crate::error::Result;
use crate::key::{IndexKey, KeyFn};
use futures_util::future::try_join_all;
use ifc_index_core::{ExpressId, IfcEngine, ModelId, TypeCode};
use ifc_index_geometry::{extract_mesh_in_slot, ExtractedMesh};
use rustc_hash::FxHashMap;

/// An indexed element and its mesh
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<M> {
    pub express_id: ExpressId,
    /// `None` for elements without triangulated geometry
    pub mesh: Option<ExtractedMesh<M>>,
}

/// Application key -> indexed element
pub type PropertyIndex<M> = FxHashMap<IndexKey, IndexEntry<M>>;

/// Counters collected while building an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Element occurrences visited (an element listed under two types counts twice)
    pub elements: usize,
    pub property_sets: usize,
    /// Entries inserted, including ones that replaced an earlier entry
    pub entries_written: usize,
    pub keys_overwritten: usize,
    pub keys_skipped: usize,
    pub meshes_missing: usize,
}

/// Builds [`PropertyIndex`]es against one engine
#[derive(Debug, Clone)]
pub struct PropertyIndexBuilder {
    config: Config,
}

impl Default for PropertyIndexBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl PropertyIndexBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index every element of `types` under the keys `key_fn` derives from its
    /// property sets. Later entries replace earlier ones with the same key.
    pub async fn build<E, K>(
        &self,
        engine: &mut E,
        model: ModelId,
        types: &[TypeCode],
        key_fn: K,
    ) -> Result<PropertyIndex<E::Material>>
    where
        E: IfcEngine,
        K: KeyFn<E::PropertySet>,
    {
        let (index, _) = self.build_with_stats(engine, model, types, key_fn).await?;
        Ok(index)
    }

    /// Same as [`build`](Self::build), also returning build counters
    pub async fn build_with_stats<E, K>(
        &self,
        engine: &mut E,
        model: ModelId,
        types: &[TypeCode],
        mut key_fn: K,
    ) -> Result<(PropertyIndex<E::Material>, IndexStats)>
    where
        E: IfcEngine,
        K: KeyFn<E::PropertySet>,
    {
        let express_ids = self.collect_elements(engine, model, types).await?;
        tracing::info!(
            model,
            types = types.len(),
            elements = express_ids.len(),
            "Building property index"
        );

        let mut index = PropertyIndex::default();
        let mut stats = IndexStats::default();

        for express_id in express_ids {
            let property_sets = engine.get_property_sets(model, express_id).await?;
            stats.elements += 1;
            tracing::debug!(
                express_id,
                property_sets = property_sets.len(),
                "Indexing element"
            );

            for property_set in &property_sets {
                stats.property_sets += 1;

                let key = match key_fn.derive(property_set).await? {
                    Some(key) if key.is_usable() => key,
                    _ => {
                        stats.keys_skipped += 1;
                        continue;
                    }
                };

                let mesh = extract_mesh_in_slot(engine, model, express_id, &self.config.subset_slot)?;
                if mesh.is_none() {
                    stats.meshes_missing += 1;
                }

                stats.entries_written += 1;
                if let Some(previous) = index.insert(key, IndexEntry { express_id, mesh }) {
                    stats.keys_overwritten += 1;
                    tracing::debug!(
                        express_id,
                        replaced = previous.express_id,
                        "Index key reused, keeping the later element"
                    );
                }
            }
        }

        tracing::info!(
            model,
            entries = index.len(),
            elements = stats.elements,
            property_sets = stats.property_sets,
            skipped = stats.keys_skipped,
            overwritten = stats.keys_overwritten,
            without_mesh = stats.meshes_missing,
            "Property index complete"
        );

        Ok((index, stats))
    }

    /// Enumerate all types at once; results are concatenated in `types` order
    /// and duplicates are kept.
    async fn collect_elements<E: IfcEngine>(
        &self,
        engine: &E,
        model: ModelId,
        types: &[TypeCode],
    ) -> Result<Vec<ExpressId>> {
        let flatten = self.config.flatten_nested_sets;
        let per_type = try_join_all(
            types
                .iter()
                .map(|&type_code| engine.get_all_items_of_type(model, type_code, flatten)),
        )
        .await?;
        Ok(per_type.into_iter().flatten().collect())
    }
}

/// Build an index with the default configuration.
///
/// See [`PropertyIndexBuilder::build`].
pub async fn build_index<E, K>(
    engine: &mut E,
    model: ModelId,
    types: &[TypeCode],
    key_fn: K,
) -> Result<PropertyIndex<E::Material>>
where
    E: IfcEngine,
    K: KeyFn<E::PropertySet>,
{
    PropertyIndexBuilder::default()
        .build(engine, model, types, key_fn)
        .await
}
