mod city_set;
pub use city_set::*;

pub mod astar_mst;
pub mod brute_force;

use serde::{Deserialize, Serialize};
use tsp_challenges::travelling_salesman::Solution;

/// An optimal closed tour: `route` begins and ends at the start city.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tour {
    pub cost: f64,
    pub route: Vec<usize>,
}

impl Tour {
    /// The tour of a single-city instance.
    pub fn trivial(start: usize) -> Self {
        Self {
            cost: 0.0,
            route: vec![start],
        }
    }
}

impl From<Tour> for Solution {
    fn from(tour: Tour) -> Self {
        Solution {
            route: tour.route,
            cost: tour.cost,
        }
    }
}
