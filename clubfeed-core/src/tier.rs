//! Coarse display buckets for ranked items.

use std::fmt;

use crate::PercentMatch;

/// The bucket an item is placed into before fine ordering.
///
/// Tiers are derived on every request and never stored.
///
/// # Examples
/// ```
/// use clubfeed_core::{PercentMatch, Tier};
///
/// assert_eq!(Tier::classify(true, PercentMatch::ZERO), Tier::Joined);
/// assert_eq!(Tier::classify(false, PercentMatch::FULL), Tier::Recommended);
/// assert_eq!(Tier::classify(false, PercentMatch::ZERO), Tier::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Items the viewer has already joined.
    Joined,
    /// Unjoined items sharing at least one interest with the viewer.
    Recommended,
    /// Everything else.
    Other,
}

impl Tier {
    /// Classify an item from its derived fields.
    ///
    /// Joined status takes precedence over any relevance score.
    #[must_use]
    pub const fn classify(is_joined: bool, percent_match: PercentMatch) -> Self {
        if is_joined {
            Self::Joined
        } else if percent_match.is_positive() {
            Self::Recommended
        } else {
            Self::Other
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::Recommended => "recommended",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
