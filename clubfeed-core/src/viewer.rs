//! Per-request personalisation state.

use std::collections::BTreeSet;

use crate::{InterestProfile, ItemId};

static NO_INTERESTS: InterestProfile = InterestProfile::new();

/// Who is browsing.
///
/// Built fresh for each request from the auth, interest and membership
/// stores; the ranking engine never persists it.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use clubfeed_core::{InterestProfile, ItemId, ViewerContext};
///
/// let anonymous = ViewerContext::Anonymous;
/// assert!(anonymous.interests().is_empty());
/// assert!(!anonymous.has_joined(ItemId(1)));
///
/// let viewer = ViewerContext::identified(
///     BTreeSet::from([ItemId(1)]),
///     InterestProfile::from_names(["Music"]).expect("valid"),
/// );
/// assert!(viewer.has_joined(ItemId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerContext {
    /// No valid session; no personalisation.
    #[default]
    Anonymous,
    /// A signed-in viewer.
    Identified {
        /// Identifiers of items the viewer has joined.
        joined: BTreeSet<ItemId>,
        /// The viewer's declared interests.
        interests: InterestProfile,
    },
}

impl ViewerContext {
    /// Construct an identified viewer.
    #[must_use]
    pub const fn identified(joined: BTreeSet<ItemId>, interests: InterestProfile) -> Self {
        Self::Identified { joined, interests }
    }

    /// The viewer's interests; empty for anonymous viewers.
    #[must_use]
    pub fn interests(&self) -> &InterestProfile {
        match self {
            Self::Anonymous => &NO_INTERESTS,
            Self::Identified { interests, .. } => interests,
        }
    }

    /// Whether the viewer has joined `id`; always `false` when anonymous.
    #[must_use]
    pub fn has_joined(&self, id: ItemId) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Identified { joined, .. } => joined.contains(&id),
        }
    }

    /// Report whether this is an anonymous viewer.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}
