use tsp_challenges::travelling_salesman::DistanceMatrix;

/// Weight of a minimum spanning tree over `nodes`, grown with Prim's method
/// from `nodes[0]`.
///
/// Edges are read in the direction tree node -> candidate, i.e.
/// `dist[in_tree][out_of_tree]`, without symmetrising. On an asymmetric
/// matrix the result therefore depends on which endpoint joined the tree
/// first.
///
/// Runs in O(k^2) for k nodes: every out-of-tree node keeps the cheapest link
/// seen from the tree so far, refreshed each time a node joins.
pub fn mst_cost(dist: &DistanceMatrix, nodes: &[usize]) -> f64 {
    let Some((&root, rest)) = nodes.split_first() else {
        return 0.0;
    };
    if rest.is_empty() {
        return 0.0;
    }

    let mut out_of_tree: Vec<usize> = rest.to_vec();
    let mut link: Vec<f64> = out_of_tree.iter().map(|&v| dist.dist(root, v)).collect();
    let mut total = 0.0;

    while !out_of_tree.is_empty() {
        let mut best: Option<usize> = None;
        let mut best_cost = f64::INFINITY;
        for (k, &cost) in link.iter().enumerate() {
            if cost < best_cost {
                best_cost = cost;
                best = Some(k);
            }
        }
        let Some(k) = best else {
            // Only reachable when every remaining link is infinite or NaN,
            // i.e. the matrix is missing edges.
            log::warn!(
                "no finite edge reaches {} remaining cities; MST bound falls back to 0",
                out_of_tree.len()
            );
            return 0.0;
        };

        total += best_cost;
        let joined = out_of_tree.swap_remove(k);
        link.swap_remove(k);
        for (v, cost) in out_of_tree.iter().zip(link.iter_mut()) {
            let d = dist.dist(joined, *v);
            if d < *cost {
                *cost = d;
            }
        }
    }

    total
}
