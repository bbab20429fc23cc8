//! Exhaustive arrangement search.
//!
//! Enumerates every ordering of the own roster in canonical order (depth-first
//! selection without replacement, lowest unused index first) and returns the
//! first one that wins a majority of the five rounds against the enemy
//! roster. With five slots there are only 120 candidates, so the search is
//! brute force on purpose: it never misses a winning arrangement.

use std::ops::ControlFlow;

use serde::Serialize;

use crate::army::roster::{Roster, ROSTER_SIZE};
use crate::army::unit::UnitGroup;
use crate::resolve::battle::{resolve, RoundOutcome};

/// Wins needed out of `ROSTER_SIZE` rounds.
pub const MAJORITY: usize = ROSTER_SIZE / 2 + 1;

/// Number of orderings of a full roster (5!).
pub const PERMUTATION_COUNT: usize = 120;

/// An index ordering: slot `i` is taken by own group `order[i]`.
pub type Order = [usize; ROSTER_SIZE];

/// One slot-to-slot confrontation and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub own: UnitGroup,
    pub enemy: UnitGroup,
    pub outcome: RoundOutcome,
}

/// A winning arrangement of the own roster and the full round ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementResult {
    /// The own roster in the order it should be fielded.
    pub arrangement: Roster,
    /// Indices into the original own roster that produced `arrangement`.
    pub order: Order,
    pub rounds: [Round; ROSTER_SIZE],
}

impl ArrangementResult {
    /// Returns the number of rounds with the given outcome.
    pub fn count(&self, outcome: RoundOutcome) -> usize {
        self.rounds.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn wins(&self) -> usize {
        self.count(RoundOutcome::Win)
    }

    pub fn draws(&self) -> usize {
        self.count(RoundOutcome::Draw)
    }

    pub fn losses(&self) -> usize {
        self.count(RoundOutcome::Loss)
    }
}

/// Work done by one search, reported via `info` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Orderings examined, including the winning one.
    pub candidates: u64,
    /// Calls made to the battle resolver.
    pub resolutions: u64,
}

/// Result of a search: the winning arrangement, if any, and search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub result: Option<ArrangementResult>,
    pub stats: SearchStats,
}

/// Visits every ordering of `0..ROSTER_SIZE` in canonical order until `visit`
/// breaks.
pub fn for_each_permutation<F>(mut visit: F) -> ControlFlow<()>
where
    F: FnMut(&Order) -> ControlFlow<()>,
{
    let mut path = [0usize; ROSTER_SIZE];
    let mut used = [false; ROSTER_SIZE];
    backtrack(0, &mut path, &mut used, &mut visit)
}

fn backtrack<F>(
    depth: usize,
    path: &mut Order,
    used: &mut [bool; ROSTER_SIZE],
    visit: &mut F,
) -> ControlFlow<()>
where
    F: FnMut(&Order) -> ControlFlow<()>,
{
    if depth == ROSTER_SIZE {
        return visit(path);
    }
    for i in 0..ROSTER_SIZE {
        if used[i] {
            continue;
        }
        used[i] = true;
        path[depth] = i;
        let flow = backtrack(depth + 1, path, used, visit);
        used[i] = false;
        flow?;
    }
    ControlFlow::Continue(())
}

/// Returns all orderings in canonical order.
pub fn permutations() -> Vec<Order> {
    let mut all = Vec::with_capacity(PERMUTATION_COUNT);
    let _ = for_each_permutation(|order| {
        all.push(*order);
        ControlFlow::Continue(())
    });
    all
}

/// Scores one candidate ordering. Returns the five outcomes if it reaches a
/// majority, or `None` as soon as a majority is out of reach.
fn score_candidate(
    own: &Roster,
    enemy: &Roster,
    order: &Order,
    stats: &mut SearchStats,
) -> Option<[RoundOutcome; ROSTER_SIZE]> {
    let mut outcomes = [RoundOutcome::Loss; ROSTER_SIZE];
    let mut wins = 0;
    for slot in 0..ROSTER_SIZE {
        let outcome = resolve(&own[order[slot]], &enemy[slot]);
        stats.resolutions += 1;
        outcomes[slot] = outcome;
        if outcome == RoundOutcome::Win {
            wins += 1;
        }
        let remaining = ROSTER_SIZE - slot - 1;
        if wins + remaining < MAJORITY {
            return None;
        }
    }
    (wins >= MAJORITY).then_some(outcomes)
}

/// Plays `arrangement` slot by slot against `enemy` and returns the ledger.
pub fn replay(arrangement: &Roster, enemy: &Roster) -> [Round; ROSTER_SIZE] {
    std::array::from_fn(|slot| Round {
        own: arrangement[slot].clone(),
        enemy: enemy[slot].clone(),
        outcome: resolve(&arrangement[slot], &enemy[slot]),
    })
}

/// Runs the search and reports statistics alongside the result.
pub fn search(own: &Roster, enemy: &Roster) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut result = None;

    let _ = for_each_permutation(|order| {
        stats.candidates += 1;
        match score_candidate(own, enemy, order, &mut stats) {
            Some(outcomes) => {
                let arrangement = own.permuted(order);
                let rounds = std::array::from_fn(|slot| Round {
                    own: arrangement[slot].clone(),
                    enemy: enemy[slot].clone(),
                    outcome: outcomes[slot],
                });
                result = Some(ArrangementResult {
                    arrangement,
                    order: *order,
                    rounds,
                });
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    });

    SearchOutcome { result, stats }
}

/// Returns the first arrangement of `own` (in canonical order) that wins at
/// least three of five rounds against `enemy`, or `None` if no ordering does.
pub fn find_winning_arrangement(own: &Roster, enemy: &Roster) -> Option<ArrangementResult> {
    search(own, enemy).result
}
