//! Grid levels whose walls open and close with the parity of the clock.
//!
//! Cell codes: `""` open, `"w"` permanent wall, `"e"` wall at even times,
//! `"o"` wall at odd times. The clock reads 0 on the start cell and advances
//! by one per step; a step stays put or moves to a 4-neighbor, and the cell
//! occupied after the step must be free at the new time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cgraph_core::{breadth_first, GraphError, GraphResult};

/// `(row, column)`.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Open,
    Wall,
    EvenWall,
    OddWall,
}

impl Cell {
    pub fn from_code(code: &str) -> GraphResult<Self> {
        match code {
            "" => Ok(Cell::Open),
            "w" => Ok(Cell::Wall),
            "e" => Ok(Cell::EvenWall),
            "o" => Ok(Cell::OddWall),
            other => Err(GraphError::invalid_grid(format!("unknown cell code {other:?}"))),
        }
    }

    /// Whether the cell is blocked at `time`.
    pub fn blocks_at(self, time: usize) -> bool {
        match self {
            Cell::Open => false,
            Cell::Wall => true,
            Cell::EvenWall => time % 2 == 0,
            Cell::OddWall => time % 2 == 1,
        }
    }
}

/// Search state: only the parity of the clock matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridState {
    position: Position,
    odd: bool,
}

// Stay first, then up, down, left, right.
const OFFSETS: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// A rectangular level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLevel {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl GridLevel {
    /// Parse rows of cell codes. All rows must have the same length.
    pub fn parse<S: AsRef<str>>(rows: &[Vec<S>]) -> GraphResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GraphError::invalid_grid(format!(
                    "row {r} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            for code in row {
                cells.push(Cell::from_code(code.as_ref())?);
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, (r, c): Position) -> Option<Cell> {
        if r < self.rows && c < self.cols {
            Some(self.cells[r * self.cols + c])
        } else {
            None
        }
    }

    /// Shortest sequence of positions, one per time step, from `start` to
    /// `dest`. Empty if `dest` cannot be reached.
    pub fn solve(&self, start: Position, dest: Position) -> GraphResult<Vec<Position>> {
        self.require_in_bounds("start", start)?;
        self.require_in_bounds("destination", dest)?;

        let root = GridState {
            position: start,
            odd: false,
        };
        let outcome = breadth_first(root, |s| s.position == dest, |s| self.successors(*s));

        debug!(
            rows = self.rows,
            cols = self.cols,
            expanded = outcome.expanded,
            found = outcome.path.is_some(),
            "Grid search finished"
        );

        Ok(outcome
            .path
            .map(|states| states.into_iter().map(|s| s.position).collect())
            .unwrap_or_default())
    }

    /// Whether `path` steps only between equal or adjacent cells and never
    /// occupies a blocked cell. The first position is not checked.
    pub fn is_valid_path(&self, path: &[Position]) -> bool {
        path.windows(2).enumerate().all(|(i, pair)| {
            let (a, b) = (pair[0], pair[1]);
            let distance = a.0.abs_diff(b.0) + a.1.abs_diff(b.1);
            distance <= 1 && self.cell(b).is_some_and(|cell| !cell.blocks_at(i + 1))
        })
    }

    fn successors(&self, state: GridState) -> Vec<GridState> {
        let odd = !state.odd;
        let arrival = usize::from(odd);
        let (r, c) = state.position;
        OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let position = (r.checked_add_signed(dr)?, c.checked_add_signed(dc)?);
                let cell = self.cell(position)?;
                (!cell.blocks_at(arrival)).then_some(GridState { position, odd })
            })
            .collect()
    }

    fn require_in_bounds(&self, what: &str, position: Position) -> GraphResult<()> {
        if self.cell(position).is_some() {
            Ok(())
        } else {
            Err(GraphError::invalid_grid(format!(
                "{what} {position:?} is outside the {}x{} grid",
                self.rows, self.cols
            )))
        }
    }
}

/// Parse `level` and solve it from `start` to `dest`.
pub fn solve_level<S: AsRef<str>>(
    level: &[Vec<S>],
    start: Position,
    dest: Position,
) -> GraphResult<Vec<Position>> {
    GridLevel::parse(level)?.solve(start, dest)
}
