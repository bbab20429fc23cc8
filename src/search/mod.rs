//! Arrangement search.
//!
//! Explores the orderings of the own roster to find one that wins a majority
//! of rounds against a fixed enemy roster.

pub mod arrangement;

pub use arrangement::{
    find_winning_arrangement, for_each_permutation, permutations, replay, search,
    ArrangementResult, Order, Round, SearchOutcome, SearchStats, MAJORITY, PERMUTATION_COUNT,
};
