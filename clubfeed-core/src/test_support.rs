//! Test-only, in-memory store and helpers used by unit and behaviour tests.

use std::collections::{BTreeSet, HashMap};

use crate::{
    BrowsableItem, CatalogueStore, Club, Event, InterestProfile, ItemId, ItemKind, ItemRecord,
    Post, Shuffler, StoreError, UserId, ViewerStore,
};

/// In-memory store implementing both storage traits.
///
/// Lookups are linear scans; intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    items: Vec<BrowsableItem<ItemRecord>>,
    interests: HashMap<UserId, InterestProfile>,
    memberships: BTreeSet<(UserId, ItemId)>,
}

impl MemoryStore {
    /// Add a catalogue item.
    #[must_use]
    pub fn with_item(mut self, item: BrowsableItem<ItemRecord>) -> Self {
        self.items.push(item);
        self
    }

    /// Record a viewer's interests, replacing any previous set.
    #[must_use]
    pub fn with_interests(mut self, user: UserId, interests: InterestProfile) -> Self {
        self.interests.insert(user, interests);
        self
    }

    /// Record that `user` belongs to `club`.
    #[must_use]
    pub fn with_membership(mut self, user: UserId, club: ItemId) -> Self {
        self.memberships.insert((user, club));
        self
    }

    fn is_member(&self, user: UserId, club: ItemId) -> bool {
        self.memberships.contains(&(user, club))
    }
}

impl CatalogueStore for MemoryStore {
    fn items(&self, kind: ItemKind) -> Result<Vec<BrowsableItem<ItemRecord>>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.payload.kind() == kind)
            .cloned()
            .collect())
    }
}

impl ViewerStore for MemoryStore {
    fn interests(&self, user: UserId) -> Result<InterestProfile, StoreError> {
        Ok(self.interests.get(&user).cloned().unwrap_or_default())
    }

    fn joined_items(&self, user: UserId, kind: ItemKind) -> Result<BTreeSet<ItemId>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.payload.kind() == kind)
            .filter(|item| {
                let club = item.payload.club_id().unwrap_or(item.id);
                self.is_member(user, club)
            })
            .map(|item| item.id)
            .collect())
    }
}

/// `Shuffler` that leaves every list in its input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle<T>(&mut self, items: Vec<T>) -> Vec<T> {
        items
    }
}

/// Build a profile from tag names, panicking on blank names.
#[must_use]
#[expect(clippy::expect_used, reason = "test helper with literal inputs")]
pub fn profile(names: &[&str]) -> InterestProfile {
    InterestProfile::from_names(names.iter().copied()).expect("test tags must not be blank")
}

/// Build a club item.
#[must_use]
pub fn club_item(id: u64, name: &str, interests: &[&str]) -> BrowsableItem<ItemRecord> {
    let club = Club {
        name: name.to_owned(),
        description: String::new(),
    };
    BrowsableItem::new(ItemId(id), profile(interests), club.into())
}

/// Build an event item hosted by `club`.
#[must_use]
pub fn event_item(
    id: u64,
    club: u64,
    title: &str,
    interests: &[&str],
) -> BrowsableItem<ItemRecord> {
    let event = Event {
        club_id: ItemId(club),
        title: title.to_owned(),
        description: String::new(),
        starts_at: "2026-01-01T00:00:00Z".to_owned(),
    };
    BrowsableItem::new(ItemId(id), profile(interests), event.into())
}

/// Build a post item published by `club`.
#[must_use]
pub fn post_item(
    id: u64,
    club: u64,
    title: &str,
    interests: &[&str],
) -> BrowsableItem<ItemRecord> {
    let post = Post {
        club_id: ItemId(club),
        title: title.to_owned(),
        body: String::new(),
        created_at: "2026-01-01T00:00:00Z".to_owned(),
    };
    BrowsableItem::new(ItemId(id), profile(interests), post.into())
}
