//! Best-first search over board rotations.
//!
//! The frontier is a min-heap keyed on the heuristic score, with ties
//! broken by insertion order. A board is expanded at most once per search:
//! when it is popped again later, through any route, it is dropped. The
//! search therefore returns *a* route to the goal, not necessarily the
//! shortest one.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashSet},
    fmt,
    time::{Duration, Instant},
};

use tracing::{debug, info, trace};

use crate::{board::Board, heuristic, route::Route};

/// Priority given to the starting board. Any value works since it is the
/// only entry when it is popped.
const SEED_PRIORITY: f64 = 1.0;

/// How many expansions pass between progress logs.
const PROGRESS_INTERVAL: usize = 10_000;

/// Optional bounds on a single search. The default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// The bound that stopped a search early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Expansions(usize),
    Time(Duration),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Expansions(n) => write!(f, "expansion limit of {}", n),
            Limit::Time(d) => write!(f, "time limit of {:.3}s", d.as_secs_f64()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub route: Route,
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// Every reachable board was expanded without meeting the goal.
    Exhausted,
    Stopped(Limit),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Distinct boards expanded, i.e. the visited set's final size.
    pub expanded: usize,
    /// Entries pushed onto the frontier, the seed included.
    pub generated: usize,
    /// Entries popped after their board had already been expanded.
    pub discarded: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

struct Entry {
    score: f64,
    seq: u64,
    board: Board,
    route: Route,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, score: f64, board: Board, route: Route) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            score,
            seq,
            board,
            route,
        }));
    }

    fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Searches for a route from `start` to the sorted board.
pub fn solve(start: Board, limits: &SearchLimits) -> SearchReport {
    solve_with(start, limits, |_| {})
}

/// Like [`solve`], calling `on_expand` with every board as it is expanded.
pub fn solve_with<F>(start: Board, limits: &SearchLimits, mut on_expand: F) -> SearchReport
where
    F: FnMut(&Board),
{
    let started = Instant::now();
    let mut stats = SearchStats::default();
    let mut visited = HashSet::new();
    let mut frontier = Frontier::default();

    info!(?limits, start = ?start.cells(), "search started");

    frontier.push(SEED_PRIORITY, start, Route::new());
    stats.generated += 1;

    let outcome = loop {
        let Some(entry) = frontier.pop() else {
            break Outcome::Exhausted;
        };
        if visited.contains(&entry.board) {
            stats.discarded += 1;
            continue;
        }
        if let Some(limit) = exceeded(limits, stats.expanded, started) {
            break Outcome::Stopped(limit);
        }

        visited.insert(entry.board);
        stats.expanded += 1;
        on_expand(&entry.board);
        trace!(score = entry.score, depth = entry.route.len(), "expanding");

        if entry.board.is_goal() {
            break Outcome::Solved(Solution {
                route: entry.route,
                board: entry.board,
            });
        }

        if stats.expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                expanded = stats.expanded,
                frontier = frontier.len(),
                score = entry.score,
                depth = entry.route.len(),
                "search progress"
            );
        }

        for (next, mv) in entry.board.successors() {
            let route = entry.route.extended(mv);
            let score = heuristic::score(&next, route.len());
            frontier.push(score, next, route);
            stats.generated += 1;
        }
    };

    stats.elapsed = started.elapsed();
    match &outcome {
        Outcome::Solved(solution) => info!(
            moves = solution.route.len(),
            expanded = stats.expanded,
            generated = stats.generated,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "solved"
        ),
        Outcome::Exhausted => info!(
            expanded = stats.expanded,
            generated = stats.generated,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "frontier exhausted"
        ),
        Outcome::Stopped(limit) => info!(
            expanded = stats.expanded,
            generated = stats.generated,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "stopped at {}",
            limit
        ),
    }

    SearchReport { outcome, stats }
}

fn exceeded(limits: &SearchLimits, expanded: usize, started: Instant) -> Option<Limit> {
    if let Some(max) = limits.max_expansions {
        if expanded >= max {
            return Some(Limit::Expansions(max));
        }
    }
    if let Some(limit) = limits.time_limit {
        if started.elapsed() >= limit {
            return Some(Limit::Time(limit));
        }
    }
    None
}
