use tsp_algorithms::travelling_salesman::{brute_force::*, CitySet, Tour};
use tsp_challenges::travelling_salesman::*;

fn four_cities() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
    .unwrap()
}

#[test]
fn test_four_city_example() {
    let tour = solve_tour(&four_cities(), 0).unwrap().unwrap();
    // first of the two optimal orientations in lexicographic order
    assert_eq!(
        tour,
        Tour {
            cost: 80.0,
            route: vec![0, 1, 3, 2, 0]
        }
    );
}

#[test]
fn test_single_city() {
    let matrix = DistanceMatrix::new(vec![vec![0.0]]).unwrap();
    assert_eq!(solve_tour(&matrix, 0).unwrap(), Some(Tour::trivial(0)));
}

#[test]
fn test_asymmetric_instance() {
    // 0 -> 1 -> 2 -> 0 costs 3, the reverse costs 30
    let matrix = DistanceMatrix::new(vec![
        vec![0.0, 1.0, 10.0],
        vec![10.0, 0.0, 1.0],
        vec![1.0, 10.0, 0.0],
    ])
    .unwrap();
    let tour = solve_tour(&matrix, 0).unwrap().unwrap();
    assert_eq!(tour.route, vec![0, 1, 2, 0]);
    assert_eq!(tour.cost, 3.0);
}

#[test]
fn test_best_completion() {
    let matrix = four_cities();
    assert_eq!(
        best_completion(&matrix, 0, 0, CitySet::single(0)).unwrap(),
        Some(80.0)
    );
    // from 1 with {0, 1} done: 1 -> 3 -> 2 -> 0
    assert_eq!(
        best_completion(&matrix, 0, 1, CitySet(0b0011)).unwrap(),
        Some(70.0)
    );
    assert_eq!(
        best_completion(&matrix, 0, 3, CitySet::full(4)).unwrap(),
        Some(20.0)
    );
}

#[test]
fn test_no_finite_tour() {
    let inf = f64::INFINITY;
    let matrix = DistanceMatrix::new(vec![vec![0.0, inf], vec![1.0, 0.0]]).unwrap();
    assert_eq!(solve_tour(&matrix, 0).unwrap(), None);
}

#[test]
fn test_rejects_large_instances() {
    let matrix = DistanceMatrix::new(vec![vec![1.0; MAX_CITIES + 1]; MAX_CITIES + 1]).unwrap();
    assert!(solve_tour(&matrix, 0).is_err());
    assert!(solve_tour(&four_cities(), 4).is_err());
}

#[test]
fn test_solve_challenge() {
    let challenge = Challenge::from_matrix(four_cities(), 2).unwrap();
    let solution = solve_challenge(&challenge, &None).unwrap().unwrap();
    assert_eq!(solution.cost, 80.0);
    assert_eq!(solution.route.first(), Some(&2));
    assert!(challenge.verify_solution(&solution).is_ok());
}
