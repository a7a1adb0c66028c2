//! Facade crate for the Clubfeed browse ranking engine.
//!
//! This crate re-exports the core domain types and the ranking pipeline, and
//! exposes the SQLite store behind a feature flag.

#![forbid(unsafe_code)]

pub use clubfeed_core::{
    AnnotatedItem, BrowsableItem, CatalogueStore, Club, Event, InterestProfile, InterestTag,
    InterestTagError, ItemId, ItemKind, ItemRecord, Matcher, PercentMatch, Post, Shuffler,
    StoreError, Tier, UserId, ViewerContext, ViewerStore,
};

#[cfg(feature = "store-sqlite")]
pub use clubfeed_core::{SqliteStore, SqliteStoreError};

#[cfg(feature = "test-support")]
pub use clubfeed_core::test_support;

pub use clubfeed_ranker::{
    BrowseOptions, OverlapMatcher, Partition, RandomShuffler, RankingPipeline, TierPartitioner,
    browse,
};
