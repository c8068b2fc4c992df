use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("start city {start} is out of range for {num_cities} cities")]
    InvalidStart { start: usize, num_cities: usize },
    #[error("{num_cities} cities exceed the visited-set capacity of {max}")]
    TooManyCities { num_cities: usize, max: usize },
}

pub type SolverResult<T> = std::result::Result<T, SolverError>;
