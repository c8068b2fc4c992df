use super::mst::mst_cost;
use crate::travelling_salesman::CitySet;
use tsp_challenges::travelling_salesman::DistanceMatrix;

/// Lower bound on the cost of finishing a partial tour.
///
/// The estimate adds the MST over the unvisited cities to the cheapest edge
/// from `current` into them and the cheapest edge between the start and them.
/// On a symmetric matrix with nonnegative entries the sum never overestimates
/// the true completion cost.
pub struct Heuristic<'a> {
    dist: &'a DistanceMatrix,
    start: usize,
    all_cities: CitySet,
}

impl<'a> Heuristic<'a> {
    pub fn new(dist: &'a DistanceMatrix, start: usize) -> Self {
        Self {
            dist,
            start,
            all_cities: CitySet::full(dist.len()),
        }
    }

    pub fn estimate(&self, current: usize, visited: CitySet) -> f64 {
        let remaining: Vec<usize> = visited.complement_in(self.all_cities).iter().collect();
        if remaining.is_empty() {
            return self.dist.dist(current, self.start);
        }

        let mst = mst_cost(self.dist, &remaining);
        let min_from_current = remaining
            .iter()
            .map(|&j| self.dist.dist(current, j))
            .fold(f64::INFINITY, f64::min);
        let min_from_start = remaining
            .iter()
            .map(|&j| self.dist.dist(self.start, j))
            .fold(f64::INFINITY, f64::min);

        mst + min_from_current + min_from_start
    }
}
