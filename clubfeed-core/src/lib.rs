//! Core domain types for the Clubfeed browse engine.
//!
//! These models describe what ranking consumes (interest tags, viewer
//! context, candidate items) and what it produces (annotated items sorted
//! into tiers). Constructors that can receive bad input return `Result`
//! to surface it early. The [`Matcher`] and [`Shuffler`] traits are the
//! seams the ranking engine is generic over; [`store`] holds the read-only
//! storage traits request handlers use to gather inputs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod item;
mod matcher;
mod percent;
mod profile;
mod record;
mod shuffler;
pub mod store;
mod tag;
mod tier;
mod viewer;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use item::{AnnotatedItem, BrowsableItem, ItemId, ItemKind, UnknownItemKind, UserId};
pub use matcher::Matcher;
pub use percent::{PercentMatch, PercentMatchError};
pub use profile::InterestProfile;
pub use record::{Club, Event, ItemRecord, Post};
pub use shuffler::Shuffler;
pub use store::{CatalogueStore, StoreError, ViewerStore};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteStore, SqliteStoreError};
pub use tag::{InterestTag, InterestTagError};
pub use tier::Tier;
pub use viewer::ViewerContext;
