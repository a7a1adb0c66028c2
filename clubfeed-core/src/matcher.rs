//! Relevance between an item's interests and a viewer's.
//!
//! The `Matcher` trait assigns a [`PercentMatch`](crate::PercentMatch) to an
//! item given a viewer's [`InterestProfile`](crate::InterestProfile).

use crate::{InterestProfile, PercentMatch};

/// Calculate how relevant an item is to a viewer.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so a single matcher
/// can serve concurrent requests. The method is infallible; implementers
/// must return [`PercentMatch::ZERO`] when the item declares no interests.
///
/// # Examples
///
/// ```rust
/// use clubfeed_core::{InterestProfile, Matcher, PercentMatch};
///
/// struct AnyShared;
///
/// impl Matcher for AnyShared {
///     fn percent_match(&self, item: &InterestProfile, viewer: &InterestProfile) -> PercentMatch {
///         if item.overlap(viewer) > 0 {
///             PercentMatch::FULL
///         } else {
///             PercentMatch::ZERO
///         }
///     }
/// }
///
/// let item = InterestProfile::from_names(["Art", "Tech"]).expect("valid");
/// let viewer = InterestProfile::from_names(["Tech"]).expect("valid");
/// assert_eq!(AnyShared.percent_match(&item, &viewer), PercentMatch::FULL);
/// ```
pub trait Matcher: Send + Sync {
    /// Return the relevance of `item` to `viewer`.
    fn percent_match(&self, item: &InterestProfile, viewer: &InterestProfile) -> PercentMatch;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn percent_match(&self, item: &InterestProfile, viewer: &InterestProfile) -> PercentMatch {
        (**self).percent_match(item, viewer)
    }
}
