use derive_more::{Display, Error};

use crate::types::{Player, Position};

/// A rejected Othello move. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMoveError {
    #[display("({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[display("{position} is already occupied")]
    Occupied { position: Position },
    #[display("{position} does not flip any disc")]
    NoFlips { position: Position },
}

/// A rejected turn-manager request. The game is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("illegal move: {_0}")]
    IllegalMove(IllegalMoveError),
    #[display("game is already over")]
    GameOver,
    #[display("it is not the player's turn ({player} is computer-controlled)")]
    NotYourTurn { player: Player },
    #[display("it is not the computer's turn ({player} is human-controlled)")]
    NotComputerTurn { player: Player },
}

impl From<IllegalMoveError> for GameError {
    fn from(err: IllegalMoveError) -> Self {
        GameError::IllegalMove(err)
    }
}

/// Raw or textual board input that does not describe a valid position.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("black and white bitboards overlap: {overlap:#018x}")]
    Overlap { overlap: u64 },
    #[display("expected 64 cells, found {found}")]
    Shape { found: usize },
    #[display("unexpected character {ch:?} at cell {index}")]
    Cell { ch: char, index: usize },
}

/// A rejected tic-tac-toe placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TicTacToeError {
    #[display("cell {index} is outside the board")]
    OutOfBounds { index: usize },
    #[display("cell {index} is already taken")]
    Occupied { index: usize },
    #[display("game is already finished")]
    Finished,
}
