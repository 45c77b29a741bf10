//! `GridWorld`: 4-connected movement over a weighted ASCII map.
//!
//! Map legend: `S` start, `G` goal, `#` wall, `.` open cell, `1`-`9` open
//! cell with that entry cost. `S` and `G` cost 1 to enter. Moving into a
//! cell costs that cell's entry cost.
//!
//! The heuristic is Manhattan distance times the cheapest entry cost on the
//! map, which never overestimates. An optional weight scales it for tests
//! that want an inadmissible estimate.

use std::convert::Infallible;
use std::fmt::Write as _;

use ara_search::{Edge, SearchGraph};

use crate::contract::SearchWorld;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Map parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    #[error("map is empty")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map symbol {symbol:?} at row {row}, col {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    #[error("map must contain exactly one {symbol:?}, found {count}")]
    Marker { symbol: char, count: usize },
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    world_id: String,
    width: usize,
    height: usize,
    /// Row-major entry costs; `None` is a wall.
    costs: Vec<Option<u32>>,
    start: Cell,
    goal: Cell,
    min_cost: f64,
    heuristic_weight: f64,
}

impl GridWorld {
    /// Parse an ASCII map. Leading and trailing blank lines are ignored and
    /// each row is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError`] for empty or ragged maps, unknown symbols,
    /// or a missing/duplicated `S` or `G`.
    pub fn parse(world_id: &str, map: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();

        let mut costs = Vec::with_capacity(width * rows.len());
        let mut starts = Vec::new();
        let mut goals = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cost = match symbol {
                    '#' => None,
                    '.' => Some(1),
                    'S' => {
                        starts.push(Cell { row, col });
                        Some(1)
                    }
                    'G' => {
                        goals.push(Cell { row, col });
                        Some(1)
                    }
                    '1'..='9' => symbol.to_digit(10),
                    _ => return Err(GridParseError::UnknownSymbol { row, col, symbol }),
                };
                costs.push(cost);
            }
        }

        let start = single_marker('S', &starts)?;
        let goal = single_marker('G', &goals)?;
        let min_cost = costs.iter().flatten().copied().min().unwrap_or(1);

        Ok(Self {
            world_id: world_id.to_string(),
            width,
            height: rows.len(),
            costs,
            start,
            goal,
            min_cost: f64::from(min_cost),
            heuristic_weight: 1.0,
        })
    }

    /// A `width × height` map of unit cells split by vertical walls every
    /// `spacing` columns. Gaps alternate between the bottom and top rows, so
    /// the only route from the top-left start to the far corner snakes back
    /// and forth. Costs 2 and 3 are mixed in on a fixed pattern.
    #[must_use]
    pub fn serpentine(width: usize, height: usize, spacing: usize) -> Self {
        let width = width.max(2);
        let height = height.max(2);
        let spacing = spacing.max(2);

        let mut costs = vec![Some(1); width * height];
        for row in 0..height {
            for col in 0..width {
                if (row * 7 + col * 3) % 5 == 0 {
                    costs[row * width + col] = Some(2 + u32::from((row + col) % 2 == 0));
                }
            }
        }
        for (n, col) in (spacing..width - 1).step_by(spacing).enumerate() {
            let gap = if n % 2 == 0 { height - 1 } else { 0 };
            for row in (0..height).filter(|&r| r != gap) {
                costs[row * width + col] = None;
            }
        }
        let start = Cell { row: 0, col: 0 };
        let goal = Cell {
            row: height - 1,
            col: width - 1,
        };
        costs[0] = Some(1);
        costs[width * height - 1] = Some(1);

        Self {
            world_id: format!("grid_serpentine_{width}x{height}_{spacing}"),
            width,
            height,
            costs,
            start,
            goal,
            min_cost: 1.0,
            heuristic_weight: 1.0,
        }
    }

    /// Scale the heuristic by `weight`. Weights above 1 may overestimate.
    #[must_use]
    pub fn with_heuristic_weight(mut self, weight: f64) -> Self {
        self.heuristic_weight = weight;
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn goal_cell(&self) -> Cell {
        self.goal
    }

    /// Entry cost of `cell`, `None` for walls and out-of-range cells.
    #[must_use]
    pub fn cost_at(&self, cell: Cell) -> Option<u32> {
        if cell.row >= self.height || cell.col >= self.width {
            return None;
        }
        self.costs[cell.row * self.width + cell.col]
    }

    /// Render the map back to ASCII, marking `path` cells with `*`.
    #[must_use]
    pub fn render(&self, path: &[Cell]) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Cell { row, col };
                let symbol = if cell == self.start {
                    'S'
                } else if cell == self.goal {
                    'G'
                } else if path.contains(&cell) {
                    '*'
                } else {
                    match self.cost_at(cell) {
                        None => '#',
                        Some(1) => '.',
                        Some(c) => char::from_digit(c, 10).unwrap_or('?'),
                    }
                };
                out.push(symbol);
            }
            let _ = writeln!(out);
        }
        out
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let up = cell.row.checked_sub(1).map(|row| Cell { row, ..cell });
        let left = cell.col.checked_sub(1).map(|col| Cell { col, ..cell });
        let right = Some(Cell {
            col: cell.col + 1,
            ..cell
        });
        let down = Some(Cell {
            row: cell.row + 1,
            ..cell
        });
        [up, left, right, down]
            .into_iter()
            .flatten()
            .filter(|&n| self.cost_at(n).is_some())
    }
}

fn single_marker(symbol: char, found: &[Cell]) -> Result<Cell, GridParseError> {
    match found {
        [cell] => Ok(*cell),
        _ => Err(GridParseError::Marker {
            symbol,
            count: found.len(),
        }),
    }
}

impl SearchGraph for GridWorld {
    type Node = Cell;
    type Error = Infallible;

    fn outgoing_edges(&self, node: &Cell) -> Result<Vec<Edge<Cell>>, Infallible> {
        Ok(self
            .neighbours(*node)
            .filter_map(|n| self.cost_at(n).map(|c| Edge::new(*node, n, f64::from(c))))
            .collect())
    }

    fn key_of(&self, node: &Cell) -> String {
        format!("{},{}", node.row, node.col)
    }

    fn same_node(&self, a: &Cell, b: &Cell) -> bool {
        a == b
    }
}

impl SearchWorld for GridWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn is_goal(&self, node: &Cell) -> bool {
        *node == self.goal
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, node: &Cell) -> Result<f64, Infallible> {
        let distance = node.row.abs_diff(self.goal.row) + node.col.abs_diff(self.goal.col);
        Ok(distance as f64 * self.min_cost * self.heuristic_weight)
    }
}
