use super::{
    error::{SolverError, SolverResult},
    heuristic::Heuristic,
    path::reconstruct_tour,
    state::{OpenEntry, SearchState},
};
use crate::{
    travelling_salesman::{CitySet, Tour, MAX_CITIES},
    HashMap,
};
use logging_timer::time;
use std::collections::BinaryHeap;
use tsp_challenges::travelling_salesman::DistanceMatrix;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Tour),
    /// The open set ran dry without closing a tour of positive cost. An
    /// incomplete matrix (infinite or NaN entries) gets here, as does one
    /// whose cheapest closure costs zero.
    NoTour,
    /// The expansion budget ran out before a tour was proven optimal.
    Aborted { expansions: u64 },
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: u64,
    pub pushed: u64,
    pub stale_discarded: u64,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Exact TSP solver running A* over `(current city, visited set)` states.
///
/// The solver only holds the matrix and the start city; every call to
/// [`TspAStar::solve`] builds its own open set and cost tables, so one solver
/// can be reused. The state space has `N * 2^N` states and the search is
/// exponential in the worst case.
pub struct TspAStar<'a> {
    dist: &'a DistanceMatrix,
    start: usize,
    all_cities: CitySet,
    heuristic: Heuristic<'a>,
}

impl<'a> TspAStar<'a> {
    pub fn new(dist: &'a DistanceMatrix, start: usize) -> SolverResult<Self> {
        let num_cities = dist.len();
        if start >= num_cities {
            return Err(SolverError::InvalidStart { start, num_cities });
        }
        if num_cities > MAX_CITIES {
            return Err(SolverError::TooManyCities {
                num_cities,
                max: MAX_CITIES,
            });
        }
        if dist.has_negative_or_non_finite() {
            log::warn!("distance matrix has negative or non-finite entries; optimality is not guaranteed");
        }
        if !dist.is_symmetric() {
            log::warn!("distance matrix is asymmetric; the MST bound is read directionally and may overestimate");
        }
        Ok(Self {
            dist,
            start,
            all_cities: CitySet::full(num_cities),
            heuristic: Heuristic::new(dist, start),
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn num_cities(&self) -> usize {
        self.dist.len()
    }

    pub fn heuristic(&self) -> &Heuristic<'a> {
        &self.heuristic
    }

    pub fn initial_state(&self) -> SearchState {
        SearchState {
            current: self.start,
            visited: CitySet::single(self.start),
        }
    }

    pub fn solve(&self) -> SearchOutcome {
        self.solve_with_budget(None).outcome
    }

    #[time]
    pub fn solve_with_budget(&self, max_expansions: Option<u64>) -> SearchReport {
        if self.num_cities() == 1 {
            return SearchReport {
                outcome: SearchOutcome::Found(Tour::trivial(self.start)),
                stats: SearchStats::default(),
            };
        }

        let initial = self.initial_state();
        let mut frontier = Frontier::new(&self.heuristic);
        frontier.best_g.insert(initial, 0.0);
        frontier.push(0.0, initial);

        while let Some(OpenEntry { g, state, .. }) = frontier.open.pop() {
            if frontier.best_g.get(&state).is_some_and(|&best| best < g) {
                frontier.stats.stale_discarded += 1;
                continue;
            }

            if self.is_goal(state, g) {
                let route = reconstruct_tour(&frontier.parents, state);
                log::debug!("tour closed with cost {} ({:?})", g, frontier.stats);
                return SearchReport {
                    outcome: SearchOutcome::Found(Tour { cost: g, route }),
                    stats: frontier.stats,
                };
            }

            if max_expansions.is_some_and(|max| frontier.stats.expansions >= max) {
                log::debug!("expansion budget exhausted ({:?})", frontier.stats);
                return SearchReport {
                    outcome: SearchOutcome::Aborted {
                        expansions: frontier.stats.expansions,
                    },
                    stats: frontier.stats,
                };
            }
            frontier.stats.expansions += 1;

            let remaining = state.visited.complement_in(self.all_cities);
            if !remaining.is_empty() {
                for next in remaining.iter() {
                    let to = SearchState {
                        current: next,
                        visited: state.visited.with(next),
                    };
                    frontier.relax(state, to, g + self.dist.dist(state.current, next));
                }
            } else if state.current != self.start {
                let to = SearchState {
                    current: self.start,
                    visited: state.visited,
                };
                frontier.relax(state, to, g + self.dist.dist(state.current, self.start));
            }
        }

        log::debug!("open set exhausted without a tour ({:?})", frontier.stats);
        SearchReport {
            outcome: SearchOutcome::NoTour,
            stats: frontier.stats,
        }
    }

    /// Every city visited and back at the start with a positive cost. A
    /// closure of cost zero is expanded like any other state and, having no
    /// transitions, never completes; single-city instances are answered up
    /// front.
    fn is_goal(&self, state: SearchState, g: f64) -> bool {
        state.visited == self.all_cities && state.current == self.start && g > 0.0
    }
}

/// Per-search bookkeeping: open set, best known cost per state and the parent
/// links of every improved state.
struct Frontier<'h, 'a> {
    heuristic: &'h Heuristic<'a>,
    open: BinaryHeap<OpenEntry>,
    best_g: HashMap<SearchState, f64>,
    parents: HashMap<SearchState, SearchState>,
    stats: SearchStats,
}

impl<'h, 'a> Frontier<'h, 'a> {
    fn new(heuristic: &'h Heuristic<'a>) -> Self {
        Self {
            heuristic,
            open: BinaryHeap::new(),
            best_g: HashMap::default(),
            parents: HashMap::default(),
            stats: SearchStats::default(),
        }
    }

    fn push(&mut self, g: f64, state: SearchState) {
        let h = self.heuristic.estimate(state.current, state.visited);
        self.open.push(OpenEntry::new(g, h, state));
        self.stats.pushed += 1;
    }

    /// Records `to` as reached through `from` if `new_g` strictly beats the
    /// best cost known for it.
    fn relax(&mut self, from: SearchState, to: SearchState, new_g: f64) {
        let best = self.best_g.get(&to).copied().unwrap_or(f64::INFINITY);
        if new_g < best {
            self.best_g.insert(to, new_g);
            self.parents.insert(to, from);
            self.push(new_g, to);
        }
    }
}
