// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application keys and the strategy that derives them from property sets.

use ifc_index_core::Result;
use std::fmt;
use std::future::Future;

/// Application-defined index key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum IndexKey {
    Text(String),
    Number(i64),
}

impl IndexKey {
    /// Empty text and zero mean "no key"
    #[inline]
    pub fn is_usable(&self) -> bool {
        match self {
            IndexKey::Text(s) => !s.is_empty(),
            IndexKey::Number(n) => *n != 0,
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Text(s) => f.write_str(s),
            IndexKey::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for IndexKey {
    fn from(s: String) -> Self {
        IndexKey::Text(s)
    }
}

impl From<&str> for IndexKey {
    fn from(s: &str) -> Self {
        IndexKey::Text(s.to_string())
    }
}

impl From<i64> for IndexKey {
    fn from(n: i64) -> Self {
        IndexKey::Number(n)
    }
}

impl From<u32> for IndexKey {
    fn from(n: u32) -> Self {
        IndexKey::Number(n.into())
    }
}

/// Derives an index key from one property set.
///
/// Derivation may suspend (e.g. to look a code up in another data source).
/// `Ok(None)`, or a key that is not [usable](IndexKey::is_usable), skips the
/// property set. Errors abort the build.
pub trait KeyFn<P> {
    fn derive(&mut self, property_set: &P) -> impl Future<Output = Result<Option<IndexKey>>>;
}

impl<P, F, Fut> KeyFn<P> for F
where
    F: FnMut(&P) -> Fut,
    Fut: Future<Output = Result<Option<IndexKey>>>,
{
    fn derive(&mut self, property_set: &P) -> impl Future<Output = Result<Option<IndexKey>>> {
        self(property_set)
    }
}
