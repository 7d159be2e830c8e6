// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Boxed error raised by an engine or a caller-supplied callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for engine queries
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the IFC engine or by index key derivation
#[derive(Error, Debug)]
pub enum Error {
    /// Enumeration, property retrieval or subset creation/removal failed.
    /// Always fatal to the current call.
    #[error("Engine failure: {0}")]
    Engine(#[source] BoxError),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(#[source] BoxError),
}

impl Error {
    /// Wrap any engine-side error (or message)
    pub fn engine(err: impl Into<BoxError>) -> Self {
        Error::Engine(err.into())
    }

    /// Wrap an error raised while deriving an index key
    pub fn key_derivation(err: impl Into<BoxError>) -> Self {
        Error::KeyDerivation(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_keeps_source_message() {
        let err = Error::engine("model 7 is not loaded");
        assert_eq!(err.to_string(), "Engine failure: model 7 is not loaded");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_key_derivation_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.csv");
        let err = Error::key_derivation(io);
        assert!(matches!(err, Error::KeyDerivation(_)));
        assert!(err.to_string().contains("catalog.csv"));
    }
}
