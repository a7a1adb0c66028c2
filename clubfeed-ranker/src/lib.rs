//! Ranking engine for Clubfeed browse pages.
//!
//! Given a batch of candidate items and a [`ViewerContext`], the engine
//! annotates every item with `is_joined` and `percent_match`, splits the
//! batch into three tiers and assembles the final list:
//!
//! - **Joined** items are shuffled and shown first when requested.
//! - **Recommended** items (positive interest overlap) are ordered by
//!   `percent_match`, highest first, keeping input order between ties.
//! - **Other** items are shuffled and shown last.
//!
//! The engine is a pure transformation over values it owns. Storage reads,
//! identity and transport happen elsewhere; randomness is injected through
//! the [`Shuffler`](clubfeed_core::Shuffler) seam so a seeded
//! [`RandomShuffler`] makes a browse reproducible.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use clubfeed_core::{BrowsableItem, InterestProfile, ItemId, ViewerContext};
//! use clubfeed_ranker::{BrowseOptions, OverlapMatcher, RandomShuffler, RankingPipeline};
//!
//! let music = InterestProfile::from_names(["Music"]).expect("valid tags");
//! let items = vec![
//!     BrowsableItem::new(ItemId(1), music.clone(), "Jazz Society"),
//!     BrowsableItem::new(ItemId(2), InterestProfile::new(), "Chess Club"),
//! ];
//! let viewer = ViewerContext::identified(BTreeSet::new(), music);
//!
//! let ranked = RankingPipeline::new(OverlapMatcher).browse(
//!     items,
//!     &viewer,
//!     &BrowseOptions::default(),
//!     &mut RandomShuffler::seeded(7),
//! );
//! assert_eq!(ranked[0].payload, "Jazz Society");
//! assert_eq!(ranked[0].percent_match.value(), 100);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod matcher;
mod partition;
mod pipeline;
mod shuffle;

pub use matcher::OverlapMatcher;
pub use partition::{Partition, TierPartitioner};
pub use pipeline::{BrowseOptions, RankingPipeline, browse};
pub use shuffle::RandomShuffler;
