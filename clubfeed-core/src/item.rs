//! Browsable items and their per-request annotations.
//!
//! A [`BrowsableItem`] carries only what ranking needs (identifier and
//! interest set) plus an opaque payload the engine never inspects. Ranking
//! turns each one into an [`AnnotatedItem`]; nothing is written back to the
//! caller's records.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{InterestProfile, PercentMatch, Tier};

/// Identifier of a club, event or post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ItemId(pub u64);

/// Identifier of a registered viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct UserId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three kinds of browsable content.
///
/// # Examples
/// ```
/// use clubfeed_core::ItemKind;
///
/// assert_eq!(ItemKind::Event.as_str(), "event");
/// assert_eq!(ItemKind::Event.plural(), "events");
/// assert_eq!("post".parse::<ItemKind>(), Ok(ItemKind::Post));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ItemKind {
    /// A club; carries its own interest tags.
    Club,
    /// An event hosted by a club.
    Event,
    /// A post published by a club.
    Post,
}

/// Error returned when parsing an unknown [`ItemKind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown item kind '{0}'")]
pub struct UnknownItemKind(pub String);

impl ItemKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 3] = [Self::Club, Self::Event, Self::Post];

    /// Singular lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Club => "club",
            Self::Event => "event",
            Self::Post => "post",
        }
    }

    /// Plural lowercase name, used for collection keys and routes.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Club => "clubs",
            Self::Event => "events",
            Self::Post => "posts",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "club" | "clubs" => Ok(Self::Club),
            "event" | "events" => Ok(Self::Event),
            "post" | "posts" => Ok(Self::Post),
            other => Err(UnknownItemKind(other.to_owned())),
        }
    }
}

/// A candidate for ranking.
///
/// # Examples
/// ```
/// use clubfeed_core::{BrowsableItem, InterestProfile, ItemId};
///
/// let interests = InterestProfile::from_names(["Music"]).expect("valid");
/// let item = BrowsableItem::new(ItemId(7), interests, "Jazz Society");
/// assert_eq!(item.id, ItemId(7));
/// assert_eq!(item.payload, "Jazz Society");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsableItem<P> {
    /// Identifier checked against the viewer's joined set.
    pub id: ItemId,
    /// Declared interests (inherited from the owning club).
    pub interests: InterestProfile,
    /// Domain fields the engine passes through untouched.
    pub payload: P,
}

impl<P> BrowsableItem<P> {
    /// Construct a candidate.
    pub const fn new(id: ItemId, interests: InterestProfile, payload: P) -> Self {
        Self {
            id,
            interests,
            payload,
        }
    }

    /// Attach the derived fields, consuming the candidate.
    #[must_use]
    pub fn annotate(self, is_joined: bool, percent_match: PercentMatch) -> AnnotatedItem<P> {
        AnnotatedItem {
            id: self.id,
            interests: self.interests,
            payload: self.payload,
            is_joined,
            percent_match,
        }
    }
}

/// A ranked item with its two per-request derived fields.
///
/// Serialises as the payload's own fields plus `id`, `interests`,
/// `isJoined` and `percentMatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "camelCase")
)]
pub struct AnnotatedItem<P> {
    /// Identifier of the underlying item.
    pub id: ItemId,
    /// Declared interests of the underlying item.
    pub interests: InterestProfile,
    /// Domain fields of the underlying item.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub payload: P,
    /// Whether the viewer has joined this item.
    pub is_joined: bool,
    /// Share of the item's interests the viewer holds.
    pub percent_match: PercentMatch,
}

impl<P> AnnotatedItem<P> {
    /// Tier this item belongs to.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        Tier::classify(self.is_joined, self.percent_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("club", ItemKind::Club)]
    #[case("events", ItemKind::Event)]
    #[case("post", ItemKind::Post)]
    fn parses_singular_and_plural(#[case] raw: &str, #[case] expected: ItemKind) {
        assert_eq!(raw.parse::<ItemKind>(), Ok(expected));
    }

    #[rstest]
    fn parsing_rejects_unknown_kinds() {
        let err = "Club".parse::<ItemKind>().expect_err("case-sensitive");
        assert!(err.to_string().contains("unknown item kind"));
    }

    #[rstest]
    fn annotate_preserves_fields() {
        let interests = InterestProfile::from_names(["Art"]).expect("valid");
        let item = BrowsableItem::new(ItemId(3), interests.clone(), 42_u32);
        let annotated = item.annotate(true, PercentMatch::FULL);
        assert_eq!(annotated.id, ItemId(3));
        assert_eq!(annotated.interests, interests);
        assert_eq!(annotated.payload, 42);
        assert_eq!(annotated.tier(), Tier::Joined);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn annotated_item_flattens_payload() {
        #[derive(Serialize)]
        struct Payload {
            name: &'static str,
        }

        let interests = InterestProfile::from_names(["Music"]).expect("valid");
        let annotated = BrowsableItem::new(ItemId(9), interests, Payload { name: "Band" })
            .annotate(false, PercentMatch::FULL);
        let value = serde_json::to_value(&annotated).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "id": 9,
                "interests": ["Music"],
                "name": "Band",
                "isJoined": false,
                "percentMatch": 100,
            })
        );
    }
}
