use super::state::SearchState;
use crate::HashMap;

/// Follows parent links back from `goal` to the initial state and returns the
/// visited cities in travel order, start city at both ends.
pub fn reconstruct_tour(
    parents: &HashMap<SearchState, SearchState>,
    goal: SearchState,
) -> Vec<usize> {
    let mut route = vec![goal.current];
    let mut state = goal;
    while let Some(&prev) = parents.get(&state) {
        route.push(prev.current);
        state = prev;
    }
    route.reverse();
    route
}
