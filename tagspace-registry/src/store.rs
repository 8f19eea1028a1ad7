//! The registry store and its immutable snapshots.
//!
//! The live map is published through an [`ArcSwap`]. Writers build the next
//! snapshot from the current one and install it with a compare-and-swap, so
//! concurrent writers serialize and readers never observe a half-applied
//! mutation. Every read operation loads one snapshot at entry and computes
//! over it alone.

use crate::error::RegistryResult;
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tagspace_model::Payload;
use tagspace_types::CompoundIdentity;
use tracing::debug;

/// Result of [`Registry::exists`].
///
/// `matches` compares the stored payload with the expected one and is only
/// meaningful when `exists` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Existence {
    pub exists: bool,
    pub matches: bool,
}

/// An immutable view of the registry at one point in time.
///
/// Entries keep insertion order: overwriting an identity keeps its original
/// position, removing one keeps the order of the rest.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) entries: IndexMap<CompoundIdentity, Payload>,
}

impl Snapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&CompoundIdentity, &Payload)> {
        self.entries.iter()
    }

    /// Iterates identities in insertion order.
    pub fn identities(&self) -> impl Iterator<Item = &CompoundIdentity> {
        self.entries.keys()
    }

    #[must_use]
    pub fn fetch(&self, identity: &CompoundIdentity) -> Option<&Payload> {
        self.entries.get(identity)
    }

    #[must_use]
    pub fn exists(&self, identity: &CompoundIdentity, expected: &Payload) -> Existence {
        let stored = self.entries.get(identity);
        Existence {
            exists: stored.is_some(),
            matches: stored == Some(expected),
        }
    }
}

/// The single-process identity registry.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Registry {
    snap: ArcSwap<Snapshot>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snap.load_full()
    }

    /// Registers `payload` under `identity`, overwriting any previous payload.
    ///
    /// The identity is validated before the store is touched; on failure the
    /// registry is unchanged.
    pub fn register<I>(&self, identity: I, payload: Payload) -> RegistryResult<CompoundIdentity>
    where
        I: TryInto<CompoundIdentity>,
        tagspace_types::Error: From<I::Error>,
    {
        let identity = identity.try_into().map_err(tagspace_types::Error::from)?;
        let previous = self.snap.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.entries.insert(identity.clone(), payload.clone());
            next
        });
        debug!(
            identity = %identity,
            overwrote = previous.entries.contains_key(&identity),
            "registered identity"
        );
        Ok(identity)
    }

    /// Returns the payload stored under `identity`.
    #[must_use]
    pub fn fetch(&self, identity: &CompoundIdentity) -> Option<Payload> {
        self.snap.load().fetch(identity).cloned()
    }

    /// Reports whether `identity` is registered and whether its payload equals `expected`.
    #[must_use]
    pub fn exists(&self, identity: &CompoundIdentity, expected: &Payload) -> Existence {
        self.snap.load().exists(identity, expected)
    }

    /// Removes `identity`. No-op when absent.
    pub fn remove(&self, identity: &CompoundIdentity) {
        if !self.snap.load().entries.contains_key(identity) {
            return;
        }
        self.snap.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.entries.shift_remove(identity);
            next
        });
        debug!(identity = %identity, "removed identity");
    }

    /// Drops every entry.
    pub fn reset_all(&self) {
        self.snap.store(Arc::new(Snapshot::default()));
        debug!("registry reset");
    }

    /// All registered identities, in insertion order.
    #[must_use]
    pub fn all_identities(&self) -> Vec<CompoundIdentity> {
        self.snap.load().identities().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snap.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snap.load().is_empty()
    }
}
