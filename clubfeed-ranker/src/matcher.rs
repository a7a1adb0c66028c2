//! Overlap-based interest matching.

use clubfeed_core::{InterestProfile, Matcher, PercentMatch};

/// Scores an item by the share of its interests the viewer also declares.
///
/// The denominator is the item's interest count, so an item tagged only
/// with things the viewer likes scores 100 regardless of how many other
/// interests the viewer has. Items with no interests score 0.
///
/// # Examples
/// ```
/// use clubfeed_core::{InterestProfile, Matcher};
/// use clubfeed_ranker::OverlapMatcher;
///
/// let item = InterestProfile::from_names(["Music", "Art", "Tech"]).expect("valid");
/// let viewer = InterestProfile::from_names(["Music", "Art"]).expect("valid");
/// assert_eq!(OverlapMatcher.percent_match(&item, &viewer).value(), 66);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlapMatcher;

impl Matcher for OverlapMatcher {
    fn percent_match(&self, item: &InterestProfile, viewer: &InterestProfile) -> PercentMatch {
        PercentMatch::from_ratio(item.overlap(viewer), item.len())
    }
}
