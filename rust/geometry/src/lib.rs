// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Index Geometry
//!
//! Extracts standalone per-element meshes from engine subsets, using
//! nalgebra for normal computation.

pub mod error;
pub mod extract;
pub mod mesh;
pub mod normals;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use extract::{extract_mesh, extract_mesh_in_slot, rebuild_subset};
pub use mesh::{ExtractedMesh, Mesh};
pub use normals::calculate_normals;
