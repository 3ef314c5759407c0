//! Snapshot index over status records.
//!
//! A [`StatusManager`] is built once per store snapshot and never mutated:
//! readers share it freely across threads without locking, and when the
//! store changes the caller fetches a new snapshot and builds a new manager.
//! Rebuilding trades memory for the elimination of stale-cache and
//! concurrent-mutation hazards.
//!
//! Representation is the caller's ordered sequence plus an id → position
//! map. The sequence is kept exactly as supplied — rank is a field on the
//! records, not a sort applied here.

use std::collections::HashMap;
use std::slice;

use crate::doc::Ref;
use crate::model::Status;

/// Immutable point-in-time query surface over a status snapshot.
#[derive(Debug, Clone, Default)]
pub struct StatusManager {
    statuses: Vec<Status>,
    by_id: HashMap<Ref<Status>, usize>,
}

impl StatusManager {
    /// Index a snapshot.
    ///
    /// Duplicate ids should not occur per store invariants; when one does,
    /// the later position wins for [`get`](Self::get) and both records stay
    /// visible to order-preserving queries.
    #[must_use]
    pub fn new(statuses: Vec<Status>) -> Self {
        let mut by_id = HashMap::with_capacity(statuses.len());
        for (position, status) in statuses.iter().enumerate() {
            if let Some(shadowed) = by_id.insert(status.id.clone(), position) {
                tracing::warn!(
                    id = %status.id,
                    shadowed,
                    position,
                    "duplicate status id in snapshot, later record wins"
                );
            }
        }
        tracing::debug!(count = statuses.len(), "status snapshot indexed");
        Self { statuses, by_id }
    }

    /// Look up a status by id. Absence is an expected result, not an error:
    /// snapshots routinely outlive deletions elsewhere.
    #[must_use]
    pub fn get(&self, id: &Ref<Status>) -> Option<&Status> {
        self.by_id
            .get(id)
            .and_then(|&position| self.statuses.get(position))
    }

    /// Statuses satisfying `predicate`, in snapshot order.
    pub fn filter(&self, mut predicate: impl FnMut(&Status) -> bool) -> Vec<&Status> {
        self.statuses
            .iter()
            .filter(|status| predicate(status))
            .collect()
    }

    /// Statuses satisfying a fallible `predicate`, in snapshot order.
    ///
    /// # Errors
    ///
    /// The predicate's error, propagated verbatim: the index knows nothing
    /// about the predicate's failure semantics and adds no wrapping.
    pub fn try_filter<E>(
        &self,
        mut predicate: impl FnMut(&Status) -> Result<bool, E>,
    ) -> Result<Vec<&Status>, E> {
        let mut matched = Vec::new();
        for status in &self.statuses {
            if predicate(status)? {
                matched.push(status);
            }
        }
        Ok(matched)
    }

    /// The snapshot in its original order.
    #[must_use]
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Number of records in the snapshot, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Iterate the snapshot in its original order.
    pub fn iter(&self) -> slice::Iter<'_, Status> {
        self.statuses.iter()
    }
}

impl<'a> IntoIterator for &'a StatusManager {
    type Item = &'a Status;
    type IntoIter = slice::Iter<'a, Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Status>> for StatusManager {
    fn from(statuses: Vec<Status>) -> Self {
        Self::new(statuses)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
