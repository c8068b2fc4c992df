use std::path::Path;
use tsp_challenges::{travelling_salesman::*, BUILD_TIME_PATH};

fn four_cities() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
    .unwrap()
}

fn seed(n: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[0] = n;
    seed
}

#[test]
fn test_load_matrix_file() {
    let path = Path::new(BUILD_TIME_PATH).join("tests/data/four_cities.txt");
    let matrix = DistanceMatrix::load(path).unwrap();
    assert_eq!(matrix, four_cities());
    assert_eq!(matrix.len(), 4);
    assert_eq!(matrix.dist(1, 3), 25.0);
    assert_eq!(matrix.row(2), &[15.0, 35.0, 0.0, 30.0]);
    assert!(matrix.is_symmetric());
}

#[test]
fn test_load_missing_file() {
    let path = Path::new(BUILD_TIME_PATH).join("tests/data/does_not_exist.txt");
    assert!(matches!(
        DistanceMatrix::load(path),
        Err(MatrixError::Io(_))
    ));
}

#[test]
fn test_display_parses_back() {
    let matrix = DistanceMatrix::new(vec![vec![0.0, 2.5], vec![1.25, 0.0]]).unwrap();
    let text = matrix.to_string();
    assert_eq!(text, "2\n0 2.5\n1.25 0\n");
    assert_eq!(text.parse::<DistanceMatrix>().unwrap(), matrix);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        "".parse::<DistanceMatrix>(),
        Err(MatrixError::MissingSize)
    ));
    assert!(matches!(
        "# only a comment\n".parse::<DistanceMatrix>(),
        Err(MatrixError::MissingSize)
    ));
    assert!(matches!(
        "three\n".parse::<DistanceMatrix>(),
        Err(MatrixError::InvalidSize(s)) if s == "three"
    ));
    assert!(matches!(
        "2\n0 1\n".parse::<DistanceMatrix>(),
        Err(MatrixError::RowCountMismatch {
            expected: 2,
            found: 1
        })
    ));
    assert!(matches!(
        "2\n0 1\n1 0 4\n".parse::<DistanceMatrix>(),
        Err(MatrixError::RowLengthMismatch {
            line: 3,
            expected: 2,
            found: 3
        })
    ));
    assert!(matches!(
        "2\n0 x\n1 0\n".parse::<DistanceMatrix>(),
        Err(MatrixError::InvalidNumber { line: 2, token }) if token == "x"
    ));
    assert!(matches!(
        "0\n".parse::<DistanceMatrix>(),
        Err(MatrixError::Empty)
    ));
}

#[test]
fn test_new_rejects_malformed_rows() {
    assert!(matches!(
        DistanceMatrix::new(vec![]),
        Err(MatrixError::Empty)
    ));
    assert!(matches!(
        DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]),
        Err(MatrixError::NotSquare {
            row: 1,
            expected: 2,
            found: 1
        })
    ));
}

#[test]
fn test_matrix_json() {
    let matrix: DistanceMatrix = serde_json::from_str("[[0.0, 3.0], [4.0, 0.0]]").unwrap();
    assert_eq!(matrix.dist(0, 1), 3.0);
    assert!(!matrix.is_symmetric());
    assert_eq!(
        serde_json::to_string(&matrix).unwrap(),
        "[[0.0,3.0],[4.0,0.0]]"
    );
    assert!(serde_json::from_str::<DistanceMatrix>("[[0.0, 3.0]]").is_err());
}

#[test]
fn test_negative_entries_are_reported_not_rejected() {
    let matrix = DistanceMatrix::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap();
    assert!(matrix.has_negative_or_non_finite());
    let matrix = DistanceMatrix::new(vec![vec![0.0, f64::INFINITY], vec![1.0, 0.0]]).unwrap();
    assert!(matrix.has_negative_or_non_finite());
    assert!(!four_cities().has_negative_or_non_finite());
}

#[test]
fn test_difficulty_from_vec() {
    let difficulty = Difficulty::from(vec![7, 1]);
    assert_eq!(
        difficulty,
        Difficulty {
            num_cities: 7,
            asymmetric: true
        }
    );
    assert!(!Difficulty::from(vec![7]).asymmetric);
    assert_eq!(Vec::<i32>::from(difficulty), vec![7, 1]);
    assert_eq!(Difficulty::from(Vec::<i32>::new()).num_cities, 0);
    assert_eq!(Difficulty::from(vec![-3, 1]).num_cities, 0);
}

#[test]
fn test_generate_instance_is_seeded() {
    let difficulty = Difficulty {
        num_cities: 8,
        asymmetric: false,
    };
    let a = Challenge::generate_instance(&seed(1), &difficulty).unwrap();
    let b = Challenge::generate_instance(&seed(1), &difficulty).unwrap();
    let c = Challenge::generate_instance(&seed(2), &difficulty).unwrap();

    assert_eq!(a.distance_matrix, b.distance_matrix);
    assert_eq!(a.node_positions, b.node_positions);
    assert_ne!(a.node_positions, c.node_positions);
    assert_eq!(a.num_cities(), 8);
    assert_eq!(a.start, 0);
    assert!(a.distance_matrix.is_symmetric());
    assert!((0..8).all(|i| a.distance_matrix.dist(i, i) == 0.0));

    let unique: std::collections::HashSet<_> = a.node_positions.iter().collect();
    assert_eq!(unique.len(), 8);
}

#[test]
fn test_generate_asymmetric_instance() {
    let difficulty = Difficulty {
        num_cities: 5,
        asymmetric: true,
    };
    let challenge = Challenge::generate_instance(&seed(3), &difficulty).unwrap();
    let matrix = &challenge.distance_matrix;
    assert!(!matrix.is_symmetric());
    assert!(!matrix.has_negative_or_non_finite());
    assert!((0..5).all(|i| matrix.dist(i, i) == 0.0));
}

#[test]
fn test_generate_instance_rejects_zero_cities() {
    let difficulty = Difficulty {
        num_cities: 0,
        asymmetric: false,
    };
    assert!(Challenge::generate_instance(&seed(0), &difficulty).is_err());
    assert!(Challenge::generate_instance(&seed(0), &Difficulty::from(vec![-5])).is_err());
}

#[test]
fn test_generate_instance_rejects_more_cities_than_grid_positions() {
    let difficulty = Difficulty {
        num_cities: ((GRID_SIZE + 1) * (GRID_SIZE + 1)) as usize + 1,
        asymmetric: false,
    };
    assert!(Challenge::generate_instance(&seed(0), &difficulty).is_err());
}

#[test]
fn test_challenge_json() {
    let difficulty = Difficulty {
        num_cities: 4,
        asymmetric: false,
    };
    let challenge = Challenge::generate_instance(&seed(9), &difficulty).unwrap();
    let json = serde_json::to_string(&challenge).unwrap();
    let parsed: Challenge = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.distance_matrix, challenge.distance_matrix);
    assert_eq!(parsed.difficulty, challenge.difficulty);
}

#[test]
fn test_from_matrix() {
    let challenge = Challenge::from_matrix(four_cities(), 2).unwrap();
    assert_eq!(challenge.start, 2);
    assert_eq!(challenge.difficulty.num_cities, 4);
    assert!(!challenge.difficulty.asymmetric);
    assert!(Challenge::from_matrix(four_cities(), 4).is_err());
}

#[test]
fn test_calc_tour_cost() {
    let matrix = four_cities();
    assert_eq!(calc_tour_cost(&matrix, &[0, 1, 3, 2, 0]).unwrap(), 80.0);
    assert_eq!(calc_tour_cost(&matrix, &[0, 2, 3, 1, 0]).unwrap(), 80.0);
    assert_eq!(calc_tour_cost(&matrix, &[0, 1, 2, 3, 0]).unwrap(), 95.0);
    assert_eq!(calc_tour_cost(&matrix, &[3]).unwrap(), 0.0);
    assert!(calc_tour_cost(&matrix, &[]).is_err());
    assert!(calc_tour_cost(&matrix, &[0, 4, 0]).is_err());
}

#[test]
fn test_verify_solution() {
    let challenge = Challenge::from_matrix(four_cities(), 0).unwrap();
    let valid = Solution {
        route: vec![0, 1, 3, 2, 0],
        cost: 80.0,
    };
    assert!(challenge.verify_solution(&valid).is_ok());

    let too_short = Solution {
        route: vec![0, 1, 3, 0],
        cost: 65.0,
    };
    assert!(challenge.verify_solution(&too_short).is_err());

    let wrong_start = Solution {
        route: vec![1, 0, 2, 3, 1],
        cost: 80.0,
    };
    assert!(challenge.verify_solution(&wrong_start).is_err());

    let duplicate = Solution {
        route: vec![0, 1, 1, 2, 0],
        cost: 60.0,
    };
    assert!(challenge.verify_solution(&duplicate).is_err());

    let out_of_range = Solution {
        route: vec![0, 1, 7, 2, 0],
        cost: 80.0,
    };
    assert!(challenge.verify_solution(&out_of_range).is_err());

    let wrong_cost = Solution {
        route: vec![0, 1, 3, 2, 0],
        cost: 79.0,
    };
    assert!(challenge.verify_solution(&wrong_cost).is_err());
}

#[test]
fn test_verify_single_city() {
    let matrix = DistanceMatrix::new(vec![vec![0.0]]).unwrap();
    let challenge = Challenge::from_matrix(matrix, 0).unwrap();
    let closed = Solution {
        route: vec![0, 0],
        cost: 0.0,
    };
    assert!(challenge.verify_solution(&closed).is_ok());
    let bare = Solution {
        route: vec![0],
        cost: 0.0,
    };
    assert!(challenge.verify_solution(&bare).is_ok());
    let wrong_cost = Solution {
        route: vec![0],
        cost: 1.0,
    };
    assert!(challenge.verify_solution(&wrong_cost).is_err());
}

#[test]
fn test_empty_solution_is_rejected() {
    let challenge = Challenge::from_matrix(four_cities(), 0).unwrap();
    let empty = Solution::new();
    assert!(empty.route.is_empty());
    assert_eq!(empty, Solution::default());
    assert!(challenge.verify_solution(&empty).is_err());
    assert!(challenge.calc_tour_cost(&empty).is_err());
}

#[test]
fn test_solution_from_map() {
    let map = serde_json::json!({ "route": [0, 2, 1, 0], "cost": 12.5 });
    let solution = Solution::try_from(map.as_object().unwrap().clone()).unwrap();
    assert_eq!(solution.route, vec![0, 2, 1, 0]);
    assert_eq!(solution.cost, 12.5);
}
