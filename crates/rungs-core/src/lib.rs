//! Ordered workflow-status core.
//!
//! Statuses are named values attached to a schema attribute — workflow
//! states like Open / In Progress / Done — grouped into categories and kept
//! in a total order by dense lexicographic rank keys. This crate is the
//! read/compute side only: an external document store owns the records and
//! performs every write. The core
//!
//! - computes rank keys for inserts and reorders ([`rank`]),
//! - defines the record shapes and their scope invariants ([`model`]),
//! - indexes a snapshot for id lookup and predicate queries ([`manager`]),
//! - merges same-named statuses into display buckets ([`aggregate`]).
//!
//! Every operation is synchronous, side-effect-free, and at most linear in
//! snapshot size. A [`StatusManager`] never changes after construction, so
//! it can be shared across threads without locking; a changed store means a
//! new snapshot and a new manager.

pub mod aggregate;
pub mod doc;
pub mod manager;
pub mod model;
pub mod rank;

pub use aggregate::aggregate;
pub use doc::{Asset, Attribute, DOMAIN_STATUS, Doc, IntlString, Ref, Space, Timestamp};
pub use manager::StatusManager;
pub use model::{CategoryValue, ScopeError, Status, StatusCategory, StatusValue};
pub use rank::{MAX_RANK_LEN, ParseRankError, Rank, RankError};
