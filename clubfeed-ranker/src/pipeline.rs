//! End-to-end browse ranking.

use clubfeed_core::{AnnotatedItem, BrowsableItem, Matcher, Shuffler, ViewerContext};

use crate::{OverlapMatcher, Partition, RandomShuffler, TierPartitioner};

/// Caller-controlled knobs for one browse.
///
/// # Examples
/// ```
/// use clubfeed_ranker::BrowseOptions;
///
/// let options = BrowseOptions::default().with_limit(20).including_joined(true);
/// assert_eq!(options.limit, 20);
/// assert!(options.include_joined);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BrowseOptions {
    /// Maximum number of items returned; `0` means unlimited.
    pub limit: usize,
    /// Whether joined items lead the list or are left out.
    pub include_joined: bool,
}

impl BrowseOptions {
    /// Set the size cap.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Choose whether joined items are returned.
    #[must_use]
    pub const fn including_joined(mut self, include_joined: bool) -> Self {
        self.include_joined = include_joined;
        self
    }

    const fn cap(&self) -> Option<usize> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }
}

/// Ranks a candidate batch into the final browse order.
///
/// The output is `joined ++ recommended ++ other` (or `recommended ++ other`
/// when joined items are excluded), truncated to the requested limit.
/// Joined and other items are shuffled independently; recommended items are
/// stably sorted by descending `percent_match`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankingPipeline<M = OverlapMatcher> {
    partitioner: TierPartitioner<M>,
}

impl<M: Matcher> RankingPipeline<M> {
    /// Build a pipeline scoring with `matcher`.
    #[must_use]
    pub const fn new(matcher: M) -> Self {
        Self {
            partitioner: TierPartitioner::new(matcher),
        }
    }

    /// Annotate, tier, order and cap `items` for `viewer`.
    ///
    /// An empty batch yields an empty list. The result never exceeds
    /// `options.limit` items when a limit is set, and is never padded.
    pub fn browse<P, I, S>(
        &self,
        items: I,
        viewer: &ViewerContext,
        options: &BrowseOptions,
        shuffler: &mut S,
    ) -> Vec<AnnotatedItem<P>>
    where
        I: IntoIterator<Item = BrowsableItem<P>>,
        S: Shuffler,
    {
        let partition = self.partitioner.partition(items, viewer);
        log::debug!(
            "browse partitioned {} items: joined={} recommended={} other={} limit={} include_joined={}",
            partition.len(),
            partition.joined.len(),
            partition.recommended.len(),
            partition.other.len(),
            options.limit,
            options.include_joined,
        );
        assemble(partition, options, shuffler)
    }
}

fn assemble<P, S: Shuffler>(
    partition: Partition<P>,
    options: &BrowseOptions,
    shuffler: &mut S,
) -> Vec<AnnotatedItem<P>> {
    let (joined, mut recommended, other) = partition.into_tiers();
    recommended.sort_by(|left, right| right.percent_match.cmp(&left.percent_match));

    let leading = if options.include_joined {
        shuffler.shuffle(joined)
    } else {
        Vec::new()
    };
    let trailing = shuffler.shuffle(other);

    let mut ranked = Vec::with_capacity(leading.len() + recommended.len() + trailing.len());
    ranked.extend(leading);
    ranked.extend(recommended);
    ranked.extend(trailing);
    if let Some(limit) = options.cap() {
        ranked.truncate(limit);
    }
    ranked
}

/// Rank `items` with [`OverlapMatcher`] and a fresh entropy-seeded shuffler.
///
/// # Examples
/// ```
/// use clubfeed_core::{BrowsableItem, InterestProfile, ItemId, ViewerContext};
/// use clubfeed_ranker::{BrowseOptions, browse};
///
/// let items = (1..=5).map(|id| BrowsableItem::new(ItemId(id), InterestProfile::new(), id));
/// let ranked = browse(items, &ViewerContext::Anonymous, &BrowseOptions::default().with_limit(3));
/// assert_eq!(ranked.len(), 3);
/// assert!(ranked.iter().all(|item| !item.is_joined && item.percent_match.value() == 0));
/// ```
#[must_use]
pub fn browse<P, I>(items: I, viewer: &ViewerContext, options: &BrowseOptions) -> Vec<AnnotatedItem<P>>
where
    I: IntoIterator<Item = BrowsableItem<P>>,
{
    RankingPipeline::new(OverlapMatcher).browse(
        items,
        viewer,
        options,
        &mut RandomShuffler::from_entropy(),
    )
}
