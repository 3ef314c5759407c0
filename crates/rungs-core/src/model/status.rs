//! Status and category records.
//!
//! These are the shapes the owning store persists under
//! [`DOMAIN_STATUS`](crate::doc::DOMAIN_STATUS). The core reads and
//! validates them; every write goes through the store. Field names follow
//! the store's camelCase wire form.
//!
//! # Invariants (held by the store, assumed here)
//!
//! - Within one `of_attribute` scope, ranks are unique: they induce a strict
//!   total order.
//! - A status's category, when set, classifies values of the same attribute.
//!   [`Status::check_category`] makes this checkable before a write.
//! - Deleting an attribute cascades to its statuses and categories.

use serde::{Deserialize, Serialize};

use crate::doc::{Asset, Attribute, Doc, IntlString, Ref, Space, Timestamp};
use crate::rank::Rank;

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// A named, ranked workflow value attached to a schema attribute.
///
/// Two statuses in the same scope whose names match case-insensitively are
/// the same logical status; the store keeps at most one canonical record per
/// folded name, and [`aggregate`](crate::aggregate::aggregate) merges any
/// duplicates a cross-scope query returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: Ref<Status>,
    pub space: Ref<Space>,
    pub modified_on: Timestamp,
    /// Scope: the attribute this status is a legal value of.
    pub of_attribute: Ref<Attribute>,
    #[serde(default)]
    pub category: Option<Ref<StatusCategory>>,
    pub name: String,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    /// Position key; scope order is string order over ranks.
    pub rank: Rank,
}

impl Status {
    /// Whether `other` is the same logical status: same scope, names equal
    /// under case folding.
    #[must_use]
    pub fn same_name(&self, other: &Status) -> bool {
        self.of_attribute == other.of_attribute
            && self.name.to_lowercase() == other.name.to_lowercase()
    }

    /// Check that `category` classifies values of this status's attribute.
    ///
    /// # Errors
    ///
    /// [`ScopeError::CategoryScopeMismatch`] when the scopes differ; the
    /// pairing must be rejected before it reaches the store.
    pub fn check_category(&self, category: &StatusCategory) -> Result<(), ScopeError> {
        if self.of_attribute == category.of_attribute {
            Ok(())
        } else {
            Err(ScopeError::CategoryScopeMismatch {
                status: self.id.clone(),
                status_scope: self.of_attribute.clone(),
                category: category.id.clone(),
                category_scope: category.of_attribute.clone(),
            })
        }
    }
}

impl Doc for Status {
    fn id(&self) -> &Ref<Self> {
        &self.id
    }

    fn space(&self) -> &Ref<Space> {
        &self.space
    }

    fn modified_on(&self) -> Timestamp {
        self.modified_on
    }
}

/// A display grouping for statuses of one attribute.
///
/// Categories have their own integer `order`, separate from status rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    pub id: Ref<StatusCategory>,
    pub space: Ref<Space>,
    pub modified_on: Timestamp,
    /// The attribute this category classifies values for.
    pub of_attribute: Ref<Attribute>,
    pub icon: Asset,
    pub label: IntlString,
    pub color: u32,
    /// Suggested name for statuses newly created under this category.
    #[serde(default)]
    pub default_status_name: Option<String>,
    /// Category order.
    pub order: u32,
}

impl Doc for StatusCategory {
    fn id(&self) -> &Ref<Self> {
        &self.id
    }

    fn space(&self) -> &Ref<Space> {
        &self.space
    }

    fn modified_on(&self) -> Timestamp {
        self.modified_on
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// A name-merged display bucket: one or more concrete statuses sharing a
/// case-folded name. Recomputed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusValue {
    /// First-seen original casing.
    pub name: String,
    /// The members' common color, unset when they disagree.
    pub color: Option<u32>,
    /// Member records in first-seen order.
    pub values: Vec<Status>,
}

/// Grouping key for category-style columns.
///
/// The store surfaces several shapes here; consumers match exhaustively
/// instead of sniffing an untyped union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValue {
    /// Plain numeric bucket, e.g. a category's `order`.
    Index(u32),
    /// Plain textual bucket.
    Name(String),
    /// No grouping value on the row.
    Absent,
    /// A concrete category record.
    Category(Ref<StatusCategory>),
    /// A name-merged bucket of statuses.
    Merged(StatusValue),
}

impl CategoryValue {
    /// Grouping key for one status row: its category when set.
    #[must_use]
    pub fn of(status: &Status) -> Self {
        status
            .category
            .clone()
            .map_or(Self::Absent, Self::Category)
    }
}

impl From<StatusValue> for CategoryValue {
    fn from(value: StatusValue) -> Self {
        Self::Merged(value)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Scope violations caught before a record shape reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// A status was paired with a category from another attribute.
    #[error(
        "category {category} classifies attribute {category_scope}, \
         but status {status} belongs to attribute {status_scope}"
    )]
    CategoryScopeMismatch {
        status: Ref<Status>,
        status_scope: Ref<Attribute>,
        category: Ref<StatusCategory>,
        category_scope: Ref<Attribute>,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
