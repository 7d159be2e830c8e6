// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-keyed element indexes for IFC viewers.
//!
//! Maps application keys, derived from element property sets by a
//! caller-supplied strategy, to the element and its extracted mesh.
//!
//! ```rust,ignore
//! use ifc_index_processing::{build_index, IndexKey};
//!
//! let index = build_index(&mut engine, model, &[IFCDOOR, IFCWINDOW], |pset: &PropertySet| {
//!     let key = pset.reference().map(IndexKey::from);
//!     async move { Ok(key) }
//! })
//! .await?;
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod key;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{build_index, IndexEntry, IndexStats, PropertyIndex, PropertyIndexBuilder};
pub use key::{IndexKey, KeyFn};

pub use ifc_index_core::SUBSET_SLOT;
