// Exact solver: A* over (city, visited set) states, bounded below by an MST
// over the unvisited cities plus the cheapest entry and return edges.

mod error;
mod heuristic;
mod mst;
mod params;
mod path;
mod search;
mod state;

pub use error::*;
pub use heuristic::Heuristic;
pub use mst::mst_cost;
pub use params::Params;
pub use path::reconstruct_tour;
pub use search::*;
pub use state::*;

use anyhow::{anyhow, Result};
use logging_timer::time;
use serde_json::{Map, Value};
use tsp_challenges::travelling_salesman::*;

#[time]
pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Option<Solution>> {
    let params = Params::initialize(hyperparameters);
    let solver = TspAStar::new(&challenge.distance_matrix, challenge.start)?;
    let report = solver.solve_with_budget(params.max_expansions);
    log::info!(
        "astar_mst: {} cities, {} expansions, {} pushed, {} stale",
        challenge.num_cities(),
        report.stats.expansions,
        report.stats.pushed,
        report.stats.stale_discarded
    );

    match report.outcome {
        SearchOutcome::Found(tour) => Ok(Some(tour.into())),
        SearchOutcome::NoTour => Ok(None),
        SearchOutcome::Aborted { expansions } => Err(anyhow!(
            "Search aborted after {} expansions without proving an optimal tour",
            expansions
        )),
    }
}

pub fn help() {
    println!("A* search with an MST lower bound. Exact, exponential in the number of cities.");
    println!("Hyperparameters:");
    println!("  max_expansions  abort after this many state expansions (default: unlimited)");
}
