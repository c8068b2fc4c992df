mod matrix;
pub use matrix::*;

use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};
use std::collections::HashSet;

/// Relative tolerance used when comparing a claimed tour cost to the recomputed one.
pub const COST_TOLERANCE: f64 = 1e-6;

/// Generated cities sit on the integer grid `0..=GRID_SIZE` in both axes.
pub const GRID_SIZE: i32 = 1000;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Difficulty {
    pub num_cities: usize,
    #[serde(default)]
    pub asymmetric: bool,
}

impl From<Vec<i32>> for Difficulty {
    /// A missing or negative city count becomes zero, which instance
    /// generation rejects.
    fn from(arr: Vec<i32>) -> Self {
        Self {
            num_cities: arr.first().map_or(0, |&n| n.max(0) as usize),
            asymmetric: arr.get(1).is_some_and(|&a| a != 0),
        }
    }
}

impl From<Difficulty> for Vec<i32> {
    fn from(d: Difficulty) -> Self {
        vec![d.num_cities as i32, d.asymmetric as i32]
    }
}

/// A closed tour: `route` starts and ends at the start city.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Solution {
    pub route: Vec<usize>,
    pub cost: f64,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            route: Vec::new(),
            cost: 0.0,
        }
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub difficulty: Difficulty,
    pub start: usize,
    #[serde(default)]
    pub node_positions: Vec<(i32, i32)>,
    pub distance_matrix: DistanceMatrix,
}

impl Challenge {
    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        if difficulty.num_cities < 1 {
            return Err(anyhow!("Number of cities must be at least 1"));
        }
        let grid_points = ((GRID_SIZE + 1) as usize).pow(2);
        if difficulty.num_cities > grid_points {
            return Err(anyhow!(
                "Number of cities ({}) exceeds the {} distinct grid positions",
                difficulty.num_cities,
                grid_points
            ));
        }
        let mut rng = SmallRng::from_seed(*seed);
        let num_cities = difficulty.num_cities;

        let mut node_positions: Vec<(i32, i32)> = Vec::with_capacity(num_cities);
        let mut node_positions_set: HashSet<(i32, i32)> = HashSet::with_capacity(num_cities);
        while node_positions.len() < num_cities {
            let pos = (rng.gen_range(0..=GRID_SIZE), rng.gen_range(0..=GRID_SIZE));
            if node_positions_set.insert(pos) {
                node_positions.push(pos);
            }
        }

        let mut rows: Vec<Vec<f64>> = node_positions
            .iter()
            .map(|&from| {
                node_positions
                    .iter()
                    .map(|&to| {
                        let dx = (from.0 - to.0) as f64;
                        let dy = (from.1 - to.1) as f64;
                        dx.hypot(dy)
                    })
                    .collect()
            })
            .collect();

        if difficulty.asymmetric {
            for (i, row) in rows.iter_mut().enumerate() {
                for (j, d) in row.iter_mut().enumerate() {
                    if i != j {
                        *d *= rng.gen_range(1.0..1.5);
                    }
                }
            }
        }

        Ok(Self {
            seed: *seed,
            difficulty: *difficulty,
            start: 0,
            node_positions,
            distance_matrix: DistanceMatrix::new(rows)?,
        })
    }

    /// Wraps a matrix loaded from elsewhere. The start city must index a row.
    pub fn from_matrix(distance_matrix: DistanceMatrix, start: usize) -> Result<Self> {
        let num_cities = distance_matrix.len();
        if start >= num_cities {
            return Err(anyhow!(
                "Start city ({}) is out of range for {} cities",
                start,
                num_cities
            ));
        }
        Ok(Self {
            seed: [0; 32],
            difficulty: Difficulty {
                num_cities,
                asymmetric: !distance_matrix.is_symmetric(),
            },
            start,
            node_positions: Vec::new(),
            distance_matrix,
        })
    }

    pub fn num_cities(&self) -> usize {
        self.distance_matrix.len()
    }

    pub fn calc_tour_cost(&self, solution: &Solution) -> Result<f64> {
        calc_tour_cost(&self.distance_matrix, &solution.route)
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        let n = self.num_cities();
        let route = &solution.route;
        // A single city has nothing to close
        if n == 1 && route.as_slice() == [self.start] {
            return self.check_cost(solution);
        }
        if route.len() != n + 1 {
            return Err(anyhow!(
                "Route length ({}) must be number of cities plus one ({})",
                route.len(),
                n + 1
            ));
        }
        if route[0] != self.start || route[n] != self.start {
            return Err(anyhow!(
                "Route must start and end at city {} (got {} .. {})",
                self.start,
                route[0],
                route[n]
            ));
        }
        if route.iter().any(|&city| city >= n) {
            return Err(anyhow!("Route contains invalid cities"));
        }
        let visited = route[..n].iter().cloned().collect::<HashSet<usize>>();
        if visited.len() != n {
            return Err(anyhow!("Route contains duplicate cities"));
        }

        self.check_cost(solution)
    }

    fn check_cost(&self, solution: &Solution) -> Result<()> {
        let actual = self.calc_tour_cost(solution)?;
        if (actual - solution.cost).abs() > COST_TOLERANCE * actual.abs().max(1.0) {
            return Err(anyhow!(
                "Claimed cost ({}) does not match route cost ({})",
                solution.cost,
                actual
            ));
        }
        log::info!(
            "Tour over {} cities verified with cost {}",
            self.num_cities(),
            actual
        );
        Ok(())
    }
}

/// Sum of the directed edges along `route`, taken in order. The route is
/// expected to already repeat the start city at the end.
pub fn calc_tour_cost(distance_matrix: &DistanceMatrix, route: &[usize]) -> Result<f64> {
    if route.is_empty() {
        return Err(anyhow!("Route is empty"));
    }
    if route.iter().any(|&city| city >= distance_matrix.len()) {
        return Err(anyhow!("Route contains invalid cities"));
    }
    Ok(route
        .windows(2)
        .map(|w| distance_matrix.dist(w[0], w[1]))
        .sum::<f64>())
}
