// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh extraction
#[derive(Error, Debug)]
pub enum Error {
    /// The subset references data its view does not contain
    #[error("Malformed subset: {0}")]
    MalformedSubset(String),

    #[error("Engine error: {0}")]
    CoreError(#[from] ifc_index_core::Error),
}
