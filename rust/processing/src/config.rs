// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Index builder configuration loaded from environment variables.

use ifc_index_core::SUBSET_SLOT;

/// Index builder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Subset slot leased for per-element mesh extraction.
    pub subset_slot: String,
    /// Ask the engine to flatten nested sets when enumerating types.
    pub flatten_nested_sets: bool,
}

impl Config {
    /// Built-in defaults, ignoring the environment.
    pub fn new() -> Self {
        Self {
            subset_slot: SUBSET_SLOT.to_string(),
            flatten_nested_sets: false,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            subset_slot: lookup("IFC_INDEX_SUBSET_SLOT")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| SUBSET_SLOT.into()),
            flatten_nested_sets: lookup("IFC_INDEX_FLATTEN_NESTED_SETS")
                .unwrap_or_else(|| "false".into())
                .trim()
                .parse()
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
