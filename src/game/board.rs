use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Computer,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
        }
    }
}

/// The two extreme cells of a detected four-in-a-row, `(row, col)` order.
///
/// `start` is the endpoint reached by the axis's backward expansion (up for
/// vertical, left / up-left / down-left for the other axes), `end` the
/// forward one. The window always spans exactly four cells, even inside a
/// longer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine {
    pub owner: Player,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("no such column")]
    InvalidColumn,
}

/// Axis precedence for the win scan: vertical (downward), horizontal,
/// diagonal ↘ (top-left to bottom-right), diagonal ↗ (bottom-left to
/// top-right). `(dr, dc)` is the forward direction of each axis.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Reset every cell to empty (start of a new round).
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a new piece would occupy in `col`: the lowest empty cell.
    /// `None` if the column is full or out of range. Pure query.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece for `owner` into `col`, returns the row where it landed
    pub fn place(&mut self, col: usize, owner: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }
        match self.landing_row(col) {
            Some(row) => {
                self.cells[row][col] = owner.to_cell();
                Ok(row)
            }
            None => Err(MoveError::ColumnFull),
        }
    }

    /// Clear a single cell back to empty, undoing a speculative placement.
    ///
    /// Callers must only unplace the most recently placed cell of a column,
    /// so the pieces-fall contiguity invariant survives.
    pub fn unplace(&mut self, row: usize, col: usize) {
        debug_assert!(self.cells[row][col] != Cell::Empty, "unplacing an empty cell");
        debug_assert!(
            row == 0 || self.cells[row - 1][col] == Cell::Empty,
            "unplacing below another piece breaks column contiguity"
        );
        self.cells[row][col] = Cell::Empty;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns that still accept a piece, left to right.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Scan for four-in-a-row through the cell just occupied at `(row, col)`.
    ///
    /// Axes are tried in the fixed precedence of [`AXES`]; the first axis
    /// with a qualifying run wins. Returns `None` if the cell is empty or no
    /// axis has a run of four.
    pub fn check_win_at(&self, row: usize, col: usize) -> Option<WinLine> {
        let owner = self.cells[row][col].owner()?;

        for &(dr, dc) in &AXES {
            if let Some((start, end)) = self.axis_window(row, col, dr, dc) {
                return Some(WinLine { owner, start, end });
            }
        }

        None
    }

    /// Four-cell window through `(row, col)` along one axis, if one exists.
    ///
    /// The window is anchored as far backward (against `(dr, dc)`) as the
    /// run allows, up to three cells, and filled forward with the rest.
    fn axis_window(
        &self,
        row: usize,
        col: usize,
        dr: i32,
        dc: i32,
    ) -> Option<((usize, usize), (usize, usize))> {
        let cell = self.cells[row][col];
        let back = self.run_length(row, col, -dr, -dc, cell).min(3);
        let forward = self.run_length(row, col, dr, dc, cell).min(3 - back);
        if back + forward < 3 {
            return None;
        }

        let start = (
            (row as i32 - back as i32 * dr) as usize,
            (col as i32 - back as i32 * dc) as usize,
        );
        let end = (
            (row as i32 + forward as i32 * dr) as usize,
            (col as i32 + forward as i32 * dc) as usize,
        );
        Some((start, end))
    }

    /// Number of contiguous cells equal to `cell` walking from `(row, col)`
    /// exclusive in direction `(dr, dc)`.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0 && r < ROWS as i32 && c >= 0 && c < COLS as i32 {
            if self.cells[r as usize][c as usize] != cell {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
