//! Interest profiles: unordered sets of [`InterestTag`]s.
//!
//! A profile belongs either to a viewer or to an item (inherited from the
//! owning club). Insertion order is irrelevant and duplicates collapse.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{InterestTag, InterestTagError};

/// A set of interest tags.
///
/// # Examples
/// ```
/// use clubfeed_core::{InterestProfile, InterestTag};
///
/// # fn main() -> Result<(), clubfeed_core::InterestTagError> {
/// let profile = InterestProfile::new()
///     .with_tag(InterestTag::new("Music")?)
///     .with_tag(InterestTag::new("Music")?)
///     .with_tag(InterestTag::new("Tech")?);
/// assert_eq!(profile.len(), 2);
/// assert!(profile.contains("Tech"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct InterestProfile {
    tags: BTreeSet<InterestTag>,
}

impl InterestProfile {
    /// Construct an empty profile.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: BTreeSet::new(),
        }
    }

    /// Build a profile from raw tag names.
    ///
    /// # Errors
    /// Returns [`InterestTagError`] for the first blank name.
    ///
    /// # Examples
    /// ```
    /// use clubfeed_core::InterestProfile;
    ///
    /// let profile = InterestProfile::from_names(["Art", "Business"]).expect("valid names");
    /// assert_eq!(profile.len(), 2);
    /// assert!(InterestProfile::from_names([""]).is_err());
    /// ```
    pub fn from_names<I, S>(names: I) -> Result<Self, InterestTagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(InterestTag::new).collect()
    }

    /// Add a tag. Returns `false` when it was already present.
    pub fn insert(&mut self, tag: InterestTag) -> bool {
        self.tags.insert(tag)
    }

    /// Add a tag while returning `self` for chaining.
    #[must_use]
    pub fn with_tag(mut self, tag: InterestTag) -> Self {
        self.insert(tag);
        self
    }

    /// Report whether the profile holds a tag with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Report whether the profile holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the tags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &InterestTag> {
        self.tags.iter()
    }

    /// Count the tags shared with `other`.
    ///
    /// # Examples
    /// ```
    /// use clubfeed_core::InterestProfile;
    ///
    /// let club = InterestProfile::from_names(["Music", "Tech", "Art"]).expect("valid");
    /// let viewer = InterestProfile::from_names(["Music", "Tech"]).expect("valid");
    /// assert_eq!(club.overlap(&viewer), 2);
    /// ```
    #[must_use]
    pub fn overlap(&self, other: &Self) -> usize {
        // Walk the smaller set and probe the larger one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .tags
            .iter()
            .filter(|tag| large.tags.contains(*tag))
            .count()
    }
}

impl FromIterator<InterestTag> for InterestProfile {
    fn from_iter<I: IntoIterator<Item = InterestTag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl Extend<InterestTag> for InterestProfile {
    fn extend<I: IntoIterator<Item = InterestTag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}

impl<'a> IntoIterator for &'a InterestProfile {
    type Item = &'a InterestTag;
    type IntoIter = std::collections::btree_set::Iter<'a, InterestTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile(names: &[&str]) -> InterestProfile {
        InterestProfile::from_names(names.iter().copied()).expect("valid names")
    }

    #[rstest]
    fn duplicates_collapse() {
        let tags = profile(&["Music", "Music", "Tech"]);
        assert_eq!(tags.len(), 2);
    }

    #[rstest]
    fn insertion_order_is_irrelevant() {
        assert_eq!(profile(&["Art", "Tech"]), profile(&["Tech", "Art"]));
    }

    #[rstest]
    #[case(&["Music", "Tech", "Art"], &["Music", "Tech"], 2)]
    #[case(&["Art", "Business"], &["Music", "Tech"], 0)]
    #[case(&[], &["Music"], 0)]
    #[case(&["Music"], &[], 0)]
    #[case(&["music"], &["Music"], 0)]
    fn overlap_counts_shared_tags(
        #[case] left: &[&str],
        #[case] right: &[&str],
        #[case] expected: usize,
    ) {
        let a = profile(left);
        let b = profile(right);
        assert_eq!(a.overlap(&b), expected);
        assert_eq!(b.overlap(&a), expected);
    }

    #[rstest]
    fn insert_reports_novelty() {
        let mut tags = InterestProfile::new();
        assert!(tags.insert(InterestTag::new("Art").expect("valid")));
        assert!(!tags.insert(InterestTag::new("Art").expect("valid")));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_sorted_array() {
        let json = serde_json::to_string(&profile(&["Tech", "Art"])).expect("serialise");
        assert_eq!(json, r#"["Art","Tech"]"#);
    }
}
