use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::TicTacToeError;

pub const CELLS: usize = 9;

/// Winning combinations: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    InProgress { to_move: Mark },
    Won { winner: Mark, line: [usize; 3] },
    Draw,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Status::InProgress { .. })
    }
}

/// 3x3 board in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty(&self, index: usize) -> bool {
        index < CELLS && self.cells[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&index| self.is_empty(index)).collect()
    }

    /// First completed line for `mark`, in [`LINES`] order.
    pub fn winning_line(&self, mark: Mark) -> Option<[usize; 3]> {
        LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&index| self.cells[index] == Some(mark)))
    }

    /// Empty cell that would complete a line for `mark`.
    pub fn completing_cell(&self, mark: Mark) -> Option<usize> {
        LINES.iter().find_map(|line| {
            let owned = line
                .iter()
                .filter(|&&index| self.cells[index] == Some(mark))
                .count();
            let empty = line.iter().copied().find(|&index| self.cells[index].is_none());
            if owned == 2 { empty } else { None }
        })
    }

    /// Array view for the front end: 0=empty, 1=X, 2=O.
    pub fn to_array(&self) -> [u8; CELLS] {
        self.cells.map(|cell| match cell {
            None => 0,
            Some(Mark::X) => 1,
            Some(Mark::O) => 2,
        })
    }
}

/// One game of tic-tac-toe. X moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    status: Status,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: Status::InProgress { to_move: Mark::X },
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn to_move(&self) -> Option<Mark> {
        match self.status {
            Status::InProgress { to_move } => Some(to_move),
            _ => None,
        }
    }

    /// Places the current mark at `index`.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize) -> Result<Status, TicTacToeError> {
        let mark = self.to_move().ok_or(TicTacToeError::Finished)?;
        if index >= CELLS {
            return Err(TicTacToeError::OutOfBounds { index });
        }
        if !self.board.is_empty(index) {
            return Err(TicTacToeError::Occupied { index });
        }

        self.board.cells[index] = Some(mark);
        self.status = if let Some(line) = self.board.winning_line(mark) {
            info!(?mark, ?line, "line completed");
            Status::Won { winner: mark, line }
        } else if self.board.is_full() {
            info!("board full, draw");
            Status::Draw
        } else {
            Status::InProgress {
                to_move: mark.opponent(),
            }
        };
        Ok(self.status)
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

/// Computer move for `mark`: win if possible, else block, else a random empty cell.
pub fn computer_move<R: Rng + ?Sized>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    let chosen = board
        .completing_cell(mark)
        .or_else(|| board.completing_cell(mark.opponent()))
        .or_else(|| board.empty_cells().choose(rng).copied());
    debug!(?mark, ?chosen, "computer cell chosen");
    chosen
}

/// Running tally across games in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Counts a finished game; unfinished statuses are ignored.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Won { winner: Mark::X, .. } => self.x_wins += 1,
            Status::Won { winner: Mark::O, .. } => self.o_wins += 1,
            Status::Draw => self.draws += 1,
            Status::InProgress { .. } => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
