//! Record shapes for the status domain.
//!
//! - [`status`] — [`Status`](status::Status) and
//!   [`StatusCategory`](status::StatusCategory) as the store persists them,
//!   plus the derived [`StatusValue`](status::StatusValue) aggregate and the
//!   [`CategoryValue`](status::CategoryValue) grouping key.

pub mod status;

pub use status::{CategoryValue, ScopeError, Status, StatusCategory, StatusValue};
