use crate::travelling_salesman::CitySet;
use std::cmp::Ordering;

/// A node of the augmented search graph: where the salesman stands and which
/// cities have been visited so far (always including the start city).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub current: usize,
    pub visited: CitySet,
}

/// Open set entry keyed by `(f, g, current, visited)`, smallest first.
#[derive(Debug, Copy, Clone)]
pub struct OpenEntry {
    pub f: f64,
    pub g: f64,
    pub state: SearchState,
}

impl OpenEntry {
    pub fn new(g: f64, h: f64, state: SearchState) -> Self {
        Self { f: g + h, g, state }
    }

    /// Lexicographic ascending comparison of the priority key.
    pub fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| self.state.current.cmp(&other.state.current))
            .then_with(|| self.state.visited.cmp(&other.state.visited))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the maximum
        other.key_cmp(self)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}
