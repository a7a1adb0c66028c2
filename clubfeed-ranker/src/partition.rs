//! Annotation and tier assignment.

use clubfeed_core::{AnnotatedItem, BrowsableItem, Matcher, Tier, ViewerContext};

/// Items of one browse batch, split by tier.
///
/// Each vector keeps the relative input order of its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<P> {
    /// Items the viewer has joined.
    pub joined: Vec<AnnotatedItem<P>>,
    /// Unjoined items with a positive match.
    pub recommended: Vec<AnnotatedItem<P>>,
    /// Everything else.
    pub other: Vec<AnnotatedItem<P>>,
}

impl<P> Default for Partition<P> {
    fn default() -> Self {
        Self {
            joined: Vec::new(),
            recommended: Vec::new(),
            other: Vec::new(),
        }
    }
}

impl<P> Partition<P> {
    /// Total number of items across all tiers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.joined.len() + self.recommended.len() + self.other.len()
    }

    /// Whether every tier is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items assigned to `tier`.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[AnnotatedItem<P>] {
        match tier {
            Tier::Joined => &self.joined,
            Tier::Recommended => &self.recommended,
            Tier::Other => &self.other,
        }
    }

    /// Split into `(joined, recommended, other)`.
    #[must_use]
    pub fn into_tiers(
        self,
    ) -> (
        Vec<AnnotatedItem<P>>,
        Vec<AnnotatedItem<P>>,
        Vec<AnnotatedItem<P>>,
    ) {
        (self.joined, self.recommended, self.other)
    }

    fn push(&mut self, item: AnnotatedItem<P>) {
        match item.tier() {
            Tier::Joined => self.joined.push(item),
            Tier::Recommended => self.recommended.push(item),
            Tier::Other => self.other.push(item),
        }
    }
}

/// Annotates candidates for one viewer and sorts them into tiers.
///
/// Anonymous viewers need no special handling: their interest profile is
/// empty and their joined set is empty, so every item scores 0 and lands in
/// [`Tier::Other`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TierPartitioner<M> {
    matcher: M,
}

impl<M: Matcher> TierPartitioner<M> {
    /// Build a partitioner around `matcher`.
    #[must_use]
    pub const fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// The matcher used to compute `percent_match`.
    #[must_use]
    pub const fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Derive `is_joined` and `percent_match` for a single candidate.
    #[must_use]
    pub fn annotate<P>(&self, item: BrowsableItem<P>, viewer: &ViewerContext) -> AnnotatedItem<P> {
        let is_joined = viewer.has_joined(item.id);
        let percent_match = self
            .matcher
            .percent_match(&item.interests, viewer.interests());
        item.annotate(is_joined, percent_match)
    }

    /// Annotate every candidate and assign it to exactly one tier.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use clubfeed_core::{BrowsableItem, InterestProfile, ItemId, ViewerContext};
    /// use clubfeed_ranker::{OverlapMatcher, TierPartitioner};
    ///
    /// let music = InterestProfile::from_names(["Music"]).expect("valid");
    /// let viewer = ViewerContext::identified(BTreeSet::from([ItemId(1)]), music.clone());
    /// let items = vec![
    ///     BrowsableItem::new(ItemId(1), music.clone(), ()),
    ///     BrowsableItem::new(ItemId(2), music, ()),
    ///     BrowsableItem::new(ItemId(3), InterestProfile::new(), ()),
    /// ];
    ///
    /// let partition = TierPartitioner::new(OverlapMatcher).partition(items, &viewer);
    /// assert_eq!(partition.joined.len(), 1);
    /// assert_eq!(partition.recommended.len(), 1);
    /// assert_eq!(partition.other.len(), 1);
    /// ```
    #[must_use]
    pub fn partition<P, I>(&self, items: I, viewer: &ViewerContext) -> Partition<P>
    where
        I: IntoIterator<Item = BrowsableItem<P>>,
    {
        let mut partition = Partition::default();
        for item in items {
            partition.push(self.annotate(item, viewer));
        }
        partition
    }
}
