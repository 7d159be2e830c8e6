// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Index Core
//!
//! The narrow query surface through which element indexing talks to an IFC
//! engine, plus scoped management of the engine's named subset slots.
//!
//! ## Overview
//!
//! - **Engine surface**: [`IfcEngine`] covers subset creation/removal, element
//!   enumeration by type and property set retrieval
//! - **Subset views**: [`SubsetView`] borrows a subset's geometry from the
//!   engine's shared model buffers
//! - **Slot leases**: [`SubsetLease`] guarantees a temporary subset is removed
//!   exactly once, whatever the outcome of the work done with it
//! - **In-memory engine**: [`MemoryEngine`] serves pre-tessellated models
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_index_core::{SubsetLease, SUBSET_SLOT};
//!
//! let lease = SubsetLease::acquire(&mut engine, model, &[express_id], SUBSET_SLOT)?;
//! let view = lease.view()?;
//! println!("{} groups", view.groups.len());
//! drop(view);
//! lease.release()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for [`FaceGroup`]

pub mod engine;
pub mod error;
pub mod memory;
pub mod subset;

pub use engine::{ExpressId, FaceGroup, IfcEngine, ModelId, SubsetView, TypeCode};
pub use error::{BoxError, Error, Result};
pub use memory::{MemoryEngine, MemoryModel, ModelGeometry};
pub use subset::{SubsetLease, SUBSET_SLOT};
