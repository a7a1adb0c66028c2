//! Data access traits for browsable items and viewer data.
//!
//! Ranking never talks to storage itself. A request handler reads the
//! candidate batch through [`CatalogueStore`] and the viewer's interests and
//! joined items through [`ViewerStore`], then hands the fully materialised
//! values to the pipeline.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{BrowsableItem, InterestProfile, ItemId, ItemKind, ItemRecord, UserId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SCHEMA_SQL, SqliteStore, SqliteStoreError};

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage failed.
    #[error("store failed to {operation}")]
    Backend {
        /// Description of the failed operation.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A stored record could not be turned into a domain value.
    #[error("stored {kind} {id} is invalid: {reason}")]
    InvalidRecord {
        /// Kind of the offending record.
        kind: ItemKind,
        /// Raw identifier of the offending record.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },
}

/// Read-only access to the browsable catalogue.
///
/// # Examples
///
/// ```rust
/// use clubfeed_core::{
///     BrowsableItem, CatalogueStore, Club, InterestProfile, ItemId, ItemKind, ItemRecord,
///     StoreError,
/// };
///
/// struct OneClub;
///
/// impl CatalogueStore for OneClub {
///     fn items(&self, kind: ItemKind) -> Result<Vec<BrowsableItem<ItemRecord>>, StoreError> {
///         if kind != ItemKind::Club {
///             return Ok(Vec::new());
///         }
///         let club = Club { name: "Chess".into(), description: String::new() };
///         Ok(vec![BrowsableItem::new(ItemId(1), InterestProfile::new(), club.into())])
///     }
/// }
///
/// assert_eq!(OneClub.items(ItemKind::Club).expect("items").len(), 1);
/// assert!(OneClub.items(ItemKind::Post).expect("items").is_empty());
/// ```
pub trait CatalogueStore: Send + Sync {
    /// Return every item of `kind`, each carrying its club's interests.
    fn items(&self, kind: ItemKind) -> Result<Vec<BrowsableItem<ItemRecord>>, StoreError>;
}

/// Read-only access to per-viewer personalisation data.
pub trait ViewerStore: Send + Sync {
    /// Return the viewer's declared interests.
    fn interests(&self, user: UserId) -> Result<InterestProfile, StoreError>;

    /// Return the identifiers of items of `kind` the viewer has joined.
    ///
    /// Clubs are joined through membership; events and posts count as
    /// joined when the viewer belongs to the owning club.
    fn joined_items(&self, user: UserId, kind: ItemKind) -> Result<BTreeSet<ItemId>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, club_item, event_item};
    use rstest::rstest;

    #[rstest]
    fn memory_store_filters_by_kind() {
        let store = MemoryStore::default()
            .with_item(club_item(1, "Jazz", &["Music"]))
            .with_item(event_item(10, 1, "Jam session", &["Music"]));
        let clubs = store.items(ItemKind::Club).expect("clubs");
        let events = store.items(ItemKind::Event).expect("events");
        assert_eq!(clubs.len(), 1);
        assert_eq!(events.len(), 1);
        assert!(store.items(ItemKind::Post).expect("posts").is_empty());
    }

    #[rstest]
    fn memory_store_derives_joined_events_from_membership() {
        let store = MemoryStore::default()
            .with_item(club_item(1, "Jazz", &["Music"]))
            .with_item(event_item(10, 1, "Jam session", &["Music"]))
            .with_item(event_item(11, 2, "Hackathon", &["Tech"]))
            .with_membership(UserId(5), ItemId(1));
        let joined = store
            .joined_items(UserId(5), ItemKind::Event)
            .expect("joined events");
        assert_eq!(joined, BTreeSet::from([ItemId(10)]));
    }

    #[rstest]
    fn unknown_viewer_has_no_interests() {
        let store = MemoryStore::default();
        assert!(store.interests(UserId(1)).expect("interests").is_empty());
    }
}
