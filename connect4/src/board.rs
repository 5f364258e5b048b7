//! Grid state: chip placement, column availability and terminal flags.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detect::completes_line;
use crate::error::GameError;

pub const STANDARD_COLUMNS: usize = 7;
pub const STANDARD_ROWS: usize = 6;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chip {
    Player,
    Computer,
}

impl Chip {
    pub fn opponent(self) -> Chip {
        match self {
            Chip::Player => Chip::Computer,
            Chip::Computer => Chip::Player,
        }
    }

    /// Inverse of the `Display` symbol for boards and histories, either case.
    pub fn from_symbol(symbol: char) -> Option<Chip> {
        match symbol.to_ascii_uppercase() {
            'P' => Some(Chip::Player),
            'C' => Some(Chip::Computer),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Chip::Player => 'P',
            Chip::Computer => 'C',
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chip::Player => f.write_str("player"),
            Chip::Computer => f.write_str("computer"),
        }
    }
}

/// Where a chip came to rest. Row 0 is the bottom of the grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

/// A `columns` x `rows` gravity grid.
///
/// Cells are stored column-major so a column's chips are contiguous from
/// row 0 upward. `heights` caches the number of chips in each column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Option<Chip>>,
    heights: Vec<usize>,
    moves_played: usize,
    done: bool,
    winner: Option<Chip>,
}

impl Board {
    /// Creates an empty board. Both dimensions must be non-zero.
    pub fn new(columns: usize, rows: usize) -> Result<Self, GameError> {
        if columns == 0 || rows == 0 {
            return Err(GameError::InvalidDimensions { columns, rows });
        }
        Ok(Self::empty(columns, rows))
    }

    /// The classic 7 x 6 board.
    pub fn standard() -> Self {
        Self::empty(STANDARD_COLUMNS, STANDARD_ROWS)
    }

    fn empty(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
            heights: vec![0; columns],
            moves_played: 0,
            done: false,
            winner: None,
        }
    }

    /// Clears every cell and the terminal flags.
    pub fn initialize(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.heights.iter_mut().for_each(|h| *h = 0);
        self.moves_played = 0;
        self.done = false;
        self.winner = None;
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// The winning side. `None` while the game runs and after a tie.
    pub fn winner(&self) -> Option<Chip> {
        self.winner
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn is_full(&self) -> bool {
        self.moves_played >= self.columns * self.rows
    }

    /// The chip at `(column, row)`, or `None` for an empty or off-grid cell.
    pub fn get(&self, column: usize, row: usize) -> Option<Chip> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells[self.index(column, row)]
    }

    /// Columns whose top cell is still empty, in ascending order.
    pub fn available_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| self.heights[col] < self.rows)
            .collect()
    }

    /// Drops `chip` into `column` and updates the terminal flags.
    ///
    /// A failed drop leaves the board untouched.
    pub fn drop_chip(&mut self, chip: Chip, column: usize) -> Result<Position, GameError> {
        if self.done {
            return Err(GameError::GameOver);
        }
        if column >= self.columns {
            return Err(GameError::ColumnOutOfRange { column });
        }
        let row = self.heights[column];
        if row >= self.rows {
            return Err(GameError::ColumnFull { column });
        }

        let idx = self.index(column, row);
        self.cells[idx] = Some(chip);
        self.heights[column] += 1;
        self.moves_played += 1;

        let position = Position { column, row };
        if completes_line(self, chip, position) {
            self.done = true;
            self.winner = Some(chip);
        } else if self.is_full() {
            self.done = true;
            self.winner = None;
        }
        Ok(position)
    }

    /// Successor board with `chip` dropped into `column`; `self` is unchanged.
    pub fn apply_to_clone(&self, chip: Chip, column: usize) -> Result<Board, GameError> {
        let mut next = self.clone();
        next.drop_chip(chip, column)?;
        Ok(next)
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.columns {
                let symbol = self.get(col, row).map_or('.', Chip::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
