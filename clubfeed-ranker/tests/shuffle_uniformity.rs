//! Statistical check that joined-tier and other-tier items are spread
//! uniformly.
//!
//! A fixed seed keeps the test deterministic; the thresholds are wide enough
//! that a fair shuffle passes for essentially any seed while a biased one
//! (for example a comparator-driven sort) fails.

use std::collections::BTreeSet;

use clubfeed_core::{BrowsableItem, InterestProfile, ItemId, Tier, ViewerContext};
use clubfeed_ranker::{BrowseOptions, OverlapMatcher, RandomShuffler, RankingPipeline};
use rstest::rstest;

const ITEMS: usize = 10;
const EXPECTED_PER_CELL: u64 = 1_000;
const RUNS: u64 = EXPECTED_PER_CELL * 10;
/// Roughly five standard deviations of a Binomial(10 000, 0.1) count.
const CELL_TOLERANCE: u64 = 150;
/// Upper bound on the sum of squared deviations across all cells.
const SQUARED_DEVIATION_BOUND: u64 = 200 * EXPECTED_PER_CELL;

fn batch() -> Vec<BrowsableItem<usize>> {
    (0..ITEMS)
        .map(|index| BrowsableItem::new(item_id(index), InterestProfile::new(), index))
        .collect()
}

fn item_id(index: usize) -> ItemId {
    ItemId(u64::try_from(index).unwrap_or(u64::MAX))
}

/// Viewer who has joined every item in [`batch`].
fn member_of_all() -> ViewerContext {
    let joined: BTreeSet<_> = (0..ITEMS).map(item_id).collect();
    ViewerContext::identified(joined, InterestProfile::new())
}

fn occupancy(seed: u64, viewer: &ViewerContext, tier: Tier) -> [[u64; ITEMS]; ITEMS] {
    let pipeline = RankingPipeline::new(OverlapMatcher);
    let options = BrowseOptions::default().including_joined(true);
    let mut shuffler = RandomShuffler::seeded(seed);
    let items = batch();
    let mut counts = [[0_u64; ITEMS]; ITEMS];

    for _ in 0..RUNS {
        let ranked = pipeline.browse(items.clone(), viewer, &options, &mut shuffler);
        assert_eq!(ranked.len(), ITEMS);
        assert!(ranked.iter().all(|item| item.tier() == tier));
        for (position, item) in ranked.iter().enumerate() {
            if let Some(cell) = counts
                .get_mut(position)
                .and_then(|row| row.get_mut(item.payload))
            {
                *cell += 1;
            }
        }
    }
    counts
}

fn assert_uniform(counts: &[[u64; ITEMS]; ITEMS]) {
    let mut squared_deviation = 0_u64;

    for (position, row) in counts.iter().enumerate() {
        assert_eq!(row.iter().sum::<u64>(), RUNS, "position {position} row total");
        for (item, &count) in row.iter().enumerate() {
            let deviation = count.abs_diff(EXPECTED_PER_CELL);
            assert!(
                deviation <= CELL_TOLERANCE,
                "item {item} took position {position} {count} times"
            );
            squared_deviation += deviation * deviation;
        }
    }

    assert!(
        squared_deviation <= SQUARED_DEVIATION_BOUND,
        "squared deviation {squared_deviation} exceeds {SQUARED_DEVIATION_BOUND}"
    );
}

#[rstest]
#[case(7)]
#[case(1_234_567)]
fn other_items_occupy_every_position_equally_often(#[case] seed: u64) {
    assert_uniform(&occupancy(seed, &ViewerContext::Anonymous, Tier::Other));
}

#[rstest]
#[case(7)]
#[case(1_234_567)]
fn joined_items_occupy_every_position_equally_often(#[case] seed: u64) {
    assert_uniform(&occupancy(seed, &member_of_all(), Tier::Joined));
}
