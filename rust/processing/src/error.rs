// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for index building.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure aborts the whole build; no partial index is returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ifc_index_core::Error),

    #[error(transparent)]
    Geometry(#[from] ifc_index_geometry::Error),
}
