use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use serde_json::{Map, Value};
use std::{fs, io::Read, path::PathBuf};
use tsp_algorithms::travelling_salesman::{astar_mst, brute_force};
use tsp_challenges::travelling_salesman::*;

const ALGORITHMS: [&str; 2] = ["astar_mst", "brute_force"];

fn cli() -> Command {
    Command::new("tsp-runtime")
        .about("Solves, generates or verifies travelling salesman instances")
        .arg_required_else_help(true)
        .arg(
            arg!(-v --verbose "Log search statistics (overrides RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("solve")
                .about("Computes an optimal tour")
                .arg(
                    arg!(<MATRIX> "Distance matrix text file, challenge json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--start [START] "Start city (default: 0, or the challenge's start)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Which solver to run")
                        .default_value("astar_mst")
                        .value_parser(ALGORITHMS),
                )
                .arg(
                    arg!(--max_expansions [MAX_EXPANSIONS] "Abort the search after this many expansions")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a seeded random instance")
                .arg(
                    arg!(<NUM_CITIES> "Number of cities")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(<SEED> "Seed value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--asymmetric "Perturb each direction of every edge independently")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the challenge will be saved to this file path (default stdout)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution")
                .arg(
                    arg!(<MATRIX> "Distance matrix text file, challenge json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--start [START] "Start city (default: 0, or the challenge's start)")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_logger(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            required::<String>(sub_m, "MATRIX")?,
            sub_m.get_one::<usize>("start").copied(),
            required::<String>(sub_m, "algorithm")?,
            sub_m.get_one::<u64>("max_expansions").copied(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            required::<usize>(sub_m, "NUM_CITIES")?,
            required::<u64>(sub_m, "SEED")?,
            sub_m.get_flag("asymmetric"),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            required::<String>(sub_m, "MATRIX")?,
            required::<String>(sub_m, "SOLUTION")?,
            sub_m.get_one::<usize>("start").copied(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    }
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.target(env_logger::Target::Stderr);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing argument {}", id))
}

pub fn solve(
    matrix: String,
    start: Option<usize>,
    algorithm: String,
    max_expansions: Option<u64>,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let challenge = load_challenge(&matrix, start)?;

    let mut hyperparameters = Map::new();
    if let Some(max_expansions) = max_expansions {
        hyperparameters.insert("max_expansions".to_string(), Value::from(max_expansions));
    }
    let hyperparameters = Some(hyperparameters);

    macro_rules! dispatch_algorithm {
        ( $( $algo:ident ),+ $(,)? ) => {{
            match algorithm.as_str() {
                $(
                    stringify!($algo) => $algo::solve_challenge(&challenge, &hyperparameters)?,
                )+
                _ => return Err(anyhow!("Unsupported algorithm '{}'", algorithm)),
            }
        }};
    }

    let solution = dispatch_algorithm!(astar_mst, brute_force);

    match solution {
        None => println!("No valid tour found"),
        Some(solution) => {
            println!("Best tour cost: {}", solution.cost);
            println!("Tour: {}", format_route(&solution.route));
            if let Some(path) = output_file {
                fs::write(&path, serde_json::to_string_pretty(&solution)?)
                    .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
            }
        }
    }
    Ok(())
}

pub fn generate_instance(
    num_cities: usize,
    seed: u64,
    asymmetric: bool,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let mut seed_bytes = [0u8; 32];
    seed_bytes[..8].copy_from_slice(&seed.to_le_bytes());
    let challenge = Challenge::generate_instance(
        &seed_bytes,
        &Difficulty {
            num_cities,
            asymmetric,
        },
    )?;

    let json = serde_json::to_string_pretty(&challenge)?;
    match output_file {
        Some(path) => fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?,
        None => println!("{}", json),
    }
    Ok(())
}

pub fn verify_solution(matrix: String, solution: String, start: Option<usize>) -> Result<()> {
    if matrix == "-" && solution == "-" {
        return Err(anyhow!("MATRIX and SOLUTION cannot both be read from stdin"));
    }
    let challenge = load_challenge(&matrix, start)?;
    let solution = load_solution(&solution)?;
    challenge
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("Solution is valid");
    Ok(())
}

fn format_route(route: &[usize]) -> String {
    route
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
    Ok(buffer)
}

fn load_challenge(matrix: &str, start: Option<usize>) -> Result<Challenge> {
    if matrix.ends_with(".json") {
        let json = fs::read_to_string(matrix)
            .map_err(|e| anyhow!("Failed to read challenge file {}: {}", matrix, e))?;
        let challenge: Challenge = serde_json::from_str(&json)
            .map_err(|e| anyhow!("Failed to parse challenge: {}", e))?;
        return match start {
            Some(start) => Challenge::from_matrix(challenge.distance_matrix, start),
            None => Ok(challenge),
        };
    }

    let distance_matrix = if matrix == "-" {
        read_stdin()?.parse::<DistanceMatrix>()?
    } else {
        DistanceMatrix::load(matrix)
            .map_err(|e| anyhow!("Failed to load distance matrix {}: {}", matrix, e))?
    };
    Challenge::from_matrix(distance_matrix, start.unwrap_or(0))
}

fn load_solution(solution: &str) -> Result<Solution> {
    let solution = if solution == "-" {
        read_stdin()?
    } else if solution.ends_with(".json") {
        fs::read_to_string(solution)
            .map_err(|e| anyhow!("Failed to read solution file {}: {}", solution, e))?
    } else {
        solution.to_string()
    };

    serde_json::from_str::<Solution>(&solution).map_err(|e| anyhow!("Failed to parse solution: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_rejects_two_stdin_inputs() {
        let err = verify_solution("-".to_string(), "-".to_string(), None).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_format_route() {
        assert_eq!(format_route(&[0, 2, 1, 0]), "0 -> 2 -> 1 -> 0");
        assert_eq!(format_route(&[3]), "3");
    }
}
