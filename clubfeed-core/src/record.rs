//! Domain payloads carried through ranking untouched.
//!
//! Timestamps are kept as the RFC 3339 strings the store holds; nothing in
//! the engine orders by them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ItemId, ItemKind};

/// Display fields of a club.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Club {
    /// Club name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Display fields of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Event {
    /// Hosting club.
    pub club_id: ItemId,
    /// Event title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Start time as stored.
    pub starts_at: String,
}

/// Display fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Post {
    /// Publishing club.
    pub club_id: ItemId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Publication time as stored.
    pub created_at: String,
}

/// Payload of any browsable kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum ItemRecord {
    /// A club.
    Club(Club),
    /// An event.
    Event(Event),
    /// A post.
    Post(Post),
}

impl ItemRecord {
    /// Kind of the wrapped record.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Club(_) => ItemKind::Club,
            Self::Event(_) => ItemKind::Event,
            Self::Post(_) => ItemKind::Post,
        }
    }

    /// Owning club, or `None` for clubs themselves.
    #[must_use]
    pub const fn club_id(&self) -> Option<ItemId> {
        match self {
            Self::Club(_) => None,
            Self::Event(event) => Some(event.club_id),
            Self::Post(post) => Some(post.club_id),
        }
    }
}

impl From<Club> for ItemRecord {
    fn from(club: Club) -> Self {
        Self::Club(club)
    }
}

impl From<Event> for ItemRecord {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<Post> for ItemRecord {
    fn from(post: Post) -> Self {
        Self::Post(post)
    }
}
