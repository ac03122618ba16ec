use derive_more::Display;
use indoc::indoc;
use thiserror::Error;

use crate::float_cost::FloatCost;
use crate::problems::clamp_probability;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 80;

pub type GridCost = FloatCost;

/// Every move costs the same, diagonals included.
pub const STEP_COST: f64 = 1.0;

/// A 20x20 maze with three walls between the corners.
pub const DEMO_MAZE: &str = indoc! {"
    S...................
    ....................
    ....................
    ....................
    .........#..........
    .........#..........
    .........#..........
    .........#..........
    .........#..........
    ##########..........
    ....................
    ....................
    ....................
    ....................
    ....................
    ....................
    .........###########
    ....................
    ....................
    ...................G
"};

/// A cell coordinate. Rows grow southwards.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({row},{col})")]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}
impl State for GridCell {}

impl GridCell {
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one move away, if coordinates don't underflow.
    #[inline(always)]
    pub fn offset(&self, m: Move) -> Option<GridCell> {
        let (dr, dc) = m.delta();
        Some(GridCell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Whether both cells touch, including diagonally.
    #[inline(always)]
    pub fn is_adjacent(&self, other: &GridCell) -> bool {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col)) == 1
    }
}

impl From<(usize, usize)> for GridCell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Move {
    #[display("→")]
    East,
    #[display("↓")]
    South,
    #[display("↑")]
    North,
    #[display("←")]
    West,
    #[display("↘")]
    SouthEast,
    #[display("↙")]
    SouthWest,
    #[display("↗")]
    NorthEast,
    #[display("↖")]
    NorthWest,
}

impl Move {
    /// Exploration order. Orthogonal moves first.
    pub const ALL: [Move; 8] = [
        Move::East,
        Move::South,
        Move::North,
        Move::West,
        Move::SouthEast,
        Move::SouthWest,
        Move::NorthEast,
        Move::NorthWest,
    ];

    /// `(rows, cols)` displacement.
    #[rustfmt::skip]
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Move::East      => ( 0,  1),
            Move::South     => ( 1,  0),
            Move::North     => (-1,  0),
            Move::West      => ( 0, -1),
            Move::SouthEast => ( 1,  1),
            Move::SouthWest => ( 1, -1),
            Move::NorthEast => (-1,  1),
            Move::NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(&self) -> bool {
        let (dr, dc) = self.delta();
        dr != 0 && dc != 0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Empty grid")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell {0} is outside the grid")]
    OutOfBounds(GridCell),
}

/// A rectangular occupancy grid.
///
/// Cells are vertices of an implicit 8-connected graph. Neighbours are
/// generated on demand, never materialised.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    blocked: Vec<bool>,
}

impl Grid {
    /// Builds a grid from rows of `blocked` flags.
    pub fn new(blocked: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let rows = blocked.len();
        let cols = blocked.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, found)) = blocked
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != cols)
        {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found,
            });
        }

        Ok(Self {
            rows,
            cols,
            blocked: blocked.into_iter().flatten().collect(),
        })
    }

    /// A grid without walls.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::new(vec![vec![false; cols]; rows])
    }

    /// A reproducible random grid, each cell blocked with `wall_probability`.
    ///
    /// Probabilities outside `[0, 1]` are clamped, and `NaN` counts as `0`.
    pub fn random<R: rand::Rng>(
        r: &mut R,
        rows: usize,
        cols: usize,
        wall_probability: f64,
    ) -> Result<Self, GridError> {
        let wall_probability = clamp_probability(wall_probability);
        let blocked = (0..rows)
            .map(|_| (0..cols).map(|_| r.random_bool(wall_probability)).collect())
            .collect();
        Self::new(blocked)
    }

    /// `(rows, cols)`
    #[inline(always)]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline(always)]
    pub fn in_bounds(&self, cell: &GridCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Out of bounds cells count as blocked.
    #[inline(always)]
    pub fn is_blocked(&self, cell: &GridCell) -> bool {
        !self.in_bounds(cell) || self.blocked[self.index(cell)]
    }

    pub fn set_blocked(&mut self, cell: GridCell, blocked: bool) -> Result<(), GridError> {
        if !self.in_bounds(&cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        let i = self.index(&cell);
        self.blocked[i] = blocked;
        Ok(())
    }

    #[inline(always)]
    fn index(&self, cell: &GridCell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.row * self.cols + cell.col
    }
}

impl Space<GridCell, GridCost> for Grid {
    #[inline(always)]
    fn contains(&self, s: &GridCell) -> bool {
        self.in_bounds(s)
    }

    /// Gets the unblocked neighbours of a given cell, in [`Move::ALL`] order.
    fn neighbours(&self, s: &GridCell) -> Neighbours<GridCell, GridCost> {
        Move::ALL
            .iter()
            .filter_map(|m| s.offset(*m))
            .filter(|n| !self.is_blocked(n))
            .map(|n| (n, GridCost::new(STEP_COST)))
            .collect()
    }

    #[inline(always)]
    fn cost(&self, from: &GridCell, to: &GridCell) -> Option<GridCost> {
        (from.is_adjacent(to) && !self.is_blocked(to)).then(|| GridCost::new(STEP_COST))
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Grid({}x{}):", self.rows, self.cols)?;
        for row in 0..self.rows.min(MAX_ELEMENTS_DISPLAYED) {
            for col in 0..self.cols.min(MAX_ELEMENTS_DISPLAYED) {
                let blocked = self.blocked[self.index(&GridCell::new(row, col))];
                write!(f, "{}", if blocked { '█' } else { '░' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Grid{:?}", self.dimensions())
    }
}

/// Admissible estimates of the remaining cost between two cells.
pub trait GridHeuristic: std::fmt::Debug {
    fn h(a: &GridCell, b: &GridCell) -> GridCost;
}

/// Straight-line distance.
///
/// Overestimates with unit-cost diagonals, so it isn't admissible here, but
/// it tends to keep the search along the straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl GridHeuristic for EuclideanDistance {
    #[inline(always)]
    fn h(a: &GridCell, b: &GridCell) -> GridCost {
        let dr = a.row.abs_diff(b.row) as f64;
        let dc = a.col.abs_diff(b.col) as f64;
        GridCost::new(dr.hypot(dc))
    }
}

/// The number of king moves. Exact on an empty grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChebyshevDistance;

impl GridHeuristic for ChebyshevDistance {
    #[inline(always)]
    fn h(a: &GridCell, b: &GridCell) -> GridCost {
        let d = a.row.abs_diff(b.row).max(a.col.abs_diff(b.col));
        GridCost::new(d as f64 * STEP_COST)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid character '{ch}' found at ({row},{col})")]
    InvalidCell { ch: char, row: usize, col: usize },
    #[error("More than one '{0}' marker")]
    DuplicateMarker(char),
    #[error("No start ('S') marked")]
    MissingStart,
    #[error("No goal ('G') marked")]
    MissingGoal,
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A grid along with where to start and where to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridProblem {
    grid: Grid,
    start: GridCell,
    goal: GridCell,
}

impl GridProblem {
    pub fn new(grid: Grid, start: GridCell, goal: GridCell) -> Result<Self, GridError> {
        for cell in [start, goal] {
            if !grid.in_bounds(&cell) {
                return Err(GridError::OutOfBounds(cell));
            }
        }
        Ok(Self { grid, start, goal })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> GridCell {
        self.start
    }
    pub fn goal(&self) -> GridCell {
        self.goal
    }

    /// Renders the problem with `path` drawn over it.
    pub fn render_path(&self, path: &[GridCell]) -> String {
        let (rows, cols) = self.grid.dimensions();
        let mut out = String::with_capacity(rows * (cols + 1));
        for row in 0..rows {
            for col in 0..cols {
                let cell = GridCell::new(row, col);
                out.push(if cell == self.start {
                    'S'
                } else if cell == self.goal {
                    'G'
                } else if path.contains(&cell) {
                    '*'
                } else if self.grid.is_blocked(&cell) {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl std::convert::TryFrom<&str> for GridProblem {
    type Error = GridProblemParseError;

    /// Parses `S` (start), `G` (goal), `#`/`█` (wall) and `.`/` `/`░` (open).
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.first().is_none_or(|l| l.is_empty()) {
            return Err(GridProblemParseError::EmptyInput);
        }

        let mut start = None;
        let mut goal = None;
        let mut blocked = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let wall = match ch {
                    '#' | '█' => true,
                    '.' | ' ' | '░' => false,
                    'S' | 'G' => {
                        let marker = if ch == 'S' { &mut start } else { &mut goal };
                        if marker.replace(GridCell::new(row, col)).is_some() {
                            return Err(GridProblemParseError::DuplicateMarker(ch));
                        }
                        false
                    }
                    ch => return Err(GridProblemParseError::InvalidCell { ch, row, col }),
                };
                cells.push(wall);
            }
            blocked.push(cells);
        }

        let start = start.ok_or(GridProblemParseError::MissingStart)?;
        let goal = goal.ok_or(GridProblemParseError::MissingGoal)?;
        Ok(GridProblem::new(Grid::new(blocked)?, start, goal)?)
    }
}

impl std::fmt::Display for GridProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.grid.dimensions();
        writeln!(
            f,
            "GridProblem({rows}x{cols}) (s:{}, g:{}):",
            self.start, self.goal
        )?;
        write!(f, "{}", self.render_path(&[]))
    }
}
