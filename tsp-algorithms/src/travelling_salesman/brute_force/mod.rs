// Exhaustive depth-first enumeration of every visiting order. Serves as the
// ground truth the A* solver is checked against on small instances.

use super::{CitySet, Tour};
use anyhow::{anyhow, Result};
use logging_timer::time;
use serde_json::{Map, Value};
use tsp_challenges::travelling_salesman::*;

/// Largest instance the enumeration accepts; (N-1)! orderings grow fast.
pub const MAX_CITIES: usize = 12;

struct Enumerator<'a> {
    dist: &'a DistanceMatrix,
    start: usize,
    all_cities: CitySet,
    route: Vec<usize>,
    best: Option<Tour>,
}

impl<'a> Enumerator<'a> {
    fn new(dist: &'a DistanceMatrix, start: usize) -> Self {
        Self {
            dist,
            start,
            all_cities: CitySet::full(dist.len()),
            route: Vec::with_capacity(dist.len() + 1),
            best: None,
        }
    }

    /// Whether a (partial) cost can no longer lead to a strictly cheaper tour.
    fn beaten(&self, cost: f64) -> bool {
        !cost.is_finite() || self.best.as_ref().is_some_and(|b| cost >= b.cost)
    }

    /// Extends the route ending at `current` with every unvisited city in
    /// ascending order, pruning as soon as a partial cost reaches the best
    /// complete tour. Earlier tours win ties.
    fn descend(&mut self, current: usize, visited: CitySet, cost: f64) {
        if visited == self.all_cities {
            let total = cost + self.dist.dist(current, self.start);
            if !self.beaten(total) {
                let mut route = self.route.clone();
                route.push(self.start);
                self.best = Some(Tour { cost: total, route });
            }
            return;
        }

        for next in visited.complement_in(self.all_cities).iter() {
            let next_cost = cost + self.dist.dist(current, next);
            if self.beaten(next_cost) {
                continue;
            }
            self.route.push(next);
            self.descend(next, visited.with(next), next_cost);
            self.route.pop();
        }
    }
}

fn check_size(dist: &DistanceMatrix) -> Result<()> {
    if dist.len() > MAX_CITIES {
        return Err(anyhow!(
            "Brute force is limited to {} cities (got {})",
            MAX_CITIES,
            dist.len()
        ));
    }
    Ok(())
}

/// Cheapest closed tour from `start`, or `None` when every ordering has an
/// infinite or NaN cost.
pub fn solve_tour(dist: &DistanceMatrix, start: usize) -> Result<Option<Tour>> {
    check_size(dist)?;
    if start >= dist.len() {
        return Err(anyhow!("Start city ({}) is out of range", start));
    }
    if dist.len() == 1 {
        return Ok(Some(Tour::trivial(start)));
    }
    let mut search = Enumerator::new(dist, start);
    search.route.push(start);
    search.descend(start, CitySet::single(start), 0.0);
    Ok(search.best)
}

/// Cheapest cost of visiting every city outside `visited` from `current`
/// and then returning to `start`.
pub fn best_completion(
    dist: &DistanceMatrix,
    start: usize,
    current: usize,
    visited: CitySet,
) -> Result<Option<f64>> {
    check_size(dist)?;
    let mut search = Enumerator::new(dist, start);
    search.route.push(current);
    search.descend(current, visited.with(current), 0.0);
    Ok(search.best.map(|t| t.cost))
}

#[time]
pub fn solve_challenge(
    challenge: &Challenge,
    _hyperparameters: &Option<Map<String, Value>>,
) -> Result<Option<Solution>> {
    Ok(solve_tour(&challenge.distance_matrix, challenge.start)?.map(Solution::from))
}

pub fn help() {
    println!("Exhaustive enumeration of every tour. Exact, limited to {} cities.", MAX_CITIES);
}
