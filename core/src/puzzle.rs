use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker used in the flat grid for a blocked (unfillable) cell.
pub const BLOCK: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSize {
    pub cols: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clues {
    #[serde(default)]
    pub across: Vec<String>,
    #[serde(default)]
    pub down: Vec<String>,
}

/// Crossword definition as delivered by the game server. Immutable once
/// loaded; a manual refresh replaces the whole value, never patches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub size: PuzzleSize,
    pub grid: Vec<String>,
    pub gridnums: Vec<u32>,
    #[serde(default)]
    pub clues: Clues,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
}

impl Puzzle {
    /// Decodes the JSON puzzle document and validates its shape. Unknown
    /// fields (solution arrays and the like) are ignored.
    pub fn parse(raw: &str) -> Result<Self, PuzzleError> {
        let puzzle: Puzzle = serde_json::from_str(raw).map_err(PuzzleError::Decode)?;
        puzzle.check_shape().map_err(PuzzleError::Shape)?;
        Ok(puzzle)
    }

    /// Saturates on hostile `size` values; `check_shape` rejects those
    /// before any validated puzzle reaches this path.
    pub fn cell_count(&self) -> usize {
        self.size.cols.saturating_mul(self.size.rows)
    }

    pub fn is_block(&self, index: usize) -> bool {
        self.grid
            .get(index)
            .map(|cell| cell == BLOCK)
            .unwrap_or(false)
    }

    pub fn check_shape(&self) -> Result<(), DataContractError> {
        let expected = self
            .size
            .cols
            .checked_mul(self.size.rows)
            .ok_or(DataContractError::GridShape {
                cols: self.size.cols,
                rows: self.size.rows,
                grid_len: self.grid.len(),
            })?;
        if self.grid.len() != expected {
            return Err(DataContractError::GridShape {
                cols: self.size.cols,
                rows: self.size.rows,
                grid_len: self.grid.len(),
            });
        }
        if self.gridnums.len() != expected {
            return Err(DataContractError::GridnumsLength {
                expected,
                found: self.gridnums.len(),
            });
        }
        Ok(())
    }

    /// An answer snapshot must carry exactly one entry per grid cell.
    pub fn check_snapshot(&self, answers: &[String]) -> Result<(), DataContractError> {
        let expected = self.cell_count();
        if answers.len() != expected {
            return Err(DataContractError::SnapshotLength {
                expected,
                found: answers.len(),
            });
        }
        Ok(())
    }
}

/// Shape violations in upstream data. These signal an inconsistency in the
/// server's payload and are never repaired locally; the offending update is
/// dropped and the prior state kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataContractError {
    SnapshotLength {
        expected: usize,
        found: usize,
    },
    GridShape {
        cols: usize,
        rows: usize,
        grid_len: usize,
    },
    GridnumsLength {
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DataContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataContractError::SnapshotLength { expected, found } => {
                write!(
                    f,
                    "answer snapshot has {found} cells, puzzle has {expected}"
                )
            }
            DataContractError::GridShape {
                cols,
                rows,
                grid_len,
            } => {
                write!(f, "grid has {grid_len} cells, size says {cols}x{rows}")
            }
            DataContractError::GridnumsLength { expected, found } => {
                write!(f, "gridnums has {found} entries, expected {expected}")
            }
        }
    }
}

impl std::error::Error for DataContractError {}

#[derive(Debug)]
pub enum PuzzleError {
    Decode(serde_json::Error),
    Shape(DataContractError),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Decode(err) => write!(f, "malformed puzzle document: {err}"),
            PuzzleError::Shape(err) => write!(f, "inconsistent puzzle document: {err}"),
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PuzzleError::Decode(err) => Some(err),
            PuzzleError::Shape(err) => Some(err),
        }
    }
}
