use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("distance matrix must have at least one city")]
    Empty,
    #[error("row {row} has {found} entries, expected {expected} (matrix must be NxN)")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("missing city count on the first line")]
    MissingSize,
    #[error("invalid city count '{0}'")]
    InvalidSize(String),
    #[error("expected {expected} matrix rows after the city count, found {found}")]
    RowCountMismatch { expected: usize, found: usize },
    #[error("line {line} has {found} entries, expected {expected}")]
    RowLengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },
}

pub type MatrixResult<T> = std::result::Result<T, MatrixError>;

/// Square table of directed travel costs, `dist(i, j)` being the cost of
/// moving from city `i` to city `j`.
///
/// Entries are expected to be nonnegative and finite. This is not enforced:
/// negative weights silently break the admissibility of lower bounds built on
/// top of the matrix.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix(Vec<Vec<f64>>);

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let n = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(MatrixError::NotSquare {
                row,
                expected: n,
                found: r.len(),
            });
        }
        Ok(Self(rows))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> MatrixResult<Self> {
        fs::read_to_string(path)?.parse()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn dist(&self, from: usize, to: usize) -> f64 {
        self.0[from][to]
    }

    pub fn row(&self, city: usize) -> &[f64] {
        &self.0[city]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.0[i][j] == self.0[j][i]))
    }

    pub fn has_negative_or_non_finite(&self) -> bool {
        self.0
            .iter()
            .flatten()
            .any(|&d| !d.is_finite() || d < 0.0)
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        Self::new(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.0
    }
}

/// Plain-text layout: the city count `N` on its own line followed by `N` rows
/// of `N` whitespace-separated numbers. Blank lines and `#` comments are
/// skipped.
impl FromStr for DistanceMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> MatrixResult<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        let (size_line, row_lines) = lines.split_first().ok_or(MatrixError::MissingSize)?;
        let n = size_line
            .parse::<usize>()
            .map_err(|_| MatrixError::InvalidSize(size_line.to_string()))?;
        if row_lines.len() != n {
            return Err(MatrixError::RowCountMismatch {
                expected: n,
                found: row_lines.len(),
            });
        }

        let mut rows = Vec::with_capacity(n);
        for (i, line) in row_lines.iter().enumerate() {
            // 1-based, counting the size line
            let line_no = i + 2;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != n {
                return Err(MatrixError::RowLengthMismatch {
                    line: line_no,
                    expected: n,
                    found: tokens.len(),
                });
            }
            let row = tokens
                .iter()
                .map(|t| {
                    t.parse::<f64>().map_err(|_| MatrixError::InvalidNumber {
                        line: line_no,
                        token: t.to_string(),
                    })
                })
                .collect::<MatrixResult<Vec<f64>>>()?;
            rows.push(row);
        }
        Self::new(rows)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.len())?;
        for row in &self.0 {
            let cells: Vec<String> = row.iter().map(|d| d.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
