//! Contract types shared with the owning document store.
//!
//! The store owns persistence, identity minting, and every write; this crate
//! only consumes the shapes below. They carry no behavior beyond identity and
//! comparison.
//!
//! # Typed references
//!
//! [`Ref<T>`] is an opaque string id tagged with the record type it points
//! at, so a `Ref<Status>` cannot be handed to an API expecting a
//! `Ref<StatusCategory>`. The tag is phantom: two refs with the same id and
//! different tags serialize identically, and the store never sees the tag.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Domain tag the store uses to partition persisted status records.
///
/// Opaque here: the core never routes by domain, it only labels the
/// collection it describes.
pub const DOMAIN_STATUS: &str = "status";

/// Store write time, epoch milliseconds.
pub type Timestamp = u64;

// ---------------------------------------------------------------------------
// Ref
// ---------------------------------------------------------------------------

/// Typed opaque identifier for a record of type `T`.
///
/// Stable for the record's lifetime. Compared, ordered, and hashed by the
/// underlying id alone.
pub struct Ref<T> {
    id: String,
    _type: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    /// Wrap a store-minted id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _type: PhantomData,
        }
    }

    /// The raw id as the store knows it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> PartialOrd for Ref<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ref<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.id).finish()
    }
}

impl<T> fmt::Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl<T> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de, T> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

// ---------------------------------------------------------------------------
// Base record contract and opaque markers
// ---------------------------------------------------------------------------

/// Base contract every stored record satisfies: an identity, a containing
/// space, and the store's last-write time.
pub trait Doc {
    /// The record's own identity.
    fn id(&self) -> &Ref<Self>
    where
        Self: Sized;

    /// The space the record lives in.
    fn space(&self) -> &Ref<Space>;

    /// When the store last wrote the record.
    fn modified_on(&self) -> Timestamp;
}

/// Marker for the containing space a record belongs to. Never instantiated
/// here; only `Ref<Space>` values cross the boundary.
#[derive(Debug, Clone, Copy)]
pub enum Space {}

/// Marker for the schema attribute a status is a legal value of. Name
/// uniqueness and rank ordering are scoped to one attribute.
#[derive(Debug, Clone, Copy)]
pub enum Attribute {}

/// Opaque handle to an icon resource. Resolved by an asset layer elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(pub String);

/// Opaque handle to a translatable label. Resolved by an intl layer
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntlString(pub String);
