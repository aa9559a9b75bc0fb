//! Revisions

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

/// Identity of an aggregate's state at a point in time.
///
/// `origin` is unique per aggregate instance and `version` increases on every
/// state-changing mutation, so two equal revisions always describe the same
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Revision {
    origin: u64,
    version: u64,
}

impl Revision {
    /// A revision for a freshly created aggregate.
    pub fn initial() -> Self {
        Self {
            origin: NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed),
            version: 0,
        }
    }

    /// Advances the version in place.
    pub fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Returns the mutation counter
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_revisions_are_distinct() {
        assert_ne!(Revision::initial(), Revision::initial());
    }

    #[test]
    fn bump_changes_revision() {
        let mut revision = Revision::initial();
        let before = revision;

        revision.bump();

        assert_ne!(before, revision);
        assert_eq!(revision.version(), 1);
    }
}
