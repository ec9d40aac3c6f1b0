use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A side in Othello. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let pos = Self { row, col };
        pos.is_on_board().then_some(pos)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_SQUARES {
            return None;
        }
        Some(Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        })
    }

    pub fn is_on_board(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Row-major index (0..=63). Only meaningful for on-board positions.
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn is_corner(&self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// True for any border square, corners included.
    pub fn is_edge(&self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        self.row == 0 || self.row == last || self.col == 0 || self.col == last
    }

    pub fn manhattan_distance(&self, other: &Position) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A playable square together with how many discs it would capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub position: Position,
    pub flip_count: u8,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "lowercase")]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    /// Strictly greater disc count wins; equal counts draw.
    pub fn from_counts(black_count: u8, white_count: u8) -> Self {
        if black_count > white_count {
            Outcome::Winner(Player::Black)
        } else if white_count > black_count {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        }
    }
}

/// Turn manager state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "outcome", rename_all = "snake_case")]
pub enum TurnState {
    BlackToMove,
    WhiteToMove,
    GameOver(Outcome),
}

impl TurnState {
    pub fn to_move(player: Player) -> Self {
        match player {
            Player::Black => TurnState::BlackToMove,
            Player::White => TurnState::WhiteToMove,
        }
    }

    /// The side to move, or `None` once the game is over.
    pub fn current_player(&self) -> Option<Player> {
        match self {
            TurnState::BlackToMove => Some(Player::Black),
            TurnState::WhiteToMove => Some(Player::White),
            TurnState::GameOver(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnState::GameOver(_))
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// 64 cell codes in row-major order: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub state: TurnState,
    pub current_player: Option<Player>,
    pub black_count: u8,
    pub white_count: u8,
    /// Hints for the side to move; empty once the game is over.
    pub legal_moves: Vec<LegalMove>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: u8,
    pub white_count: u8,
}
