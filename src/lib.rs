use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod tictactoe;
pub mod types;
pub mod wasm;

pub use ai::{Difficulty, HeuristicSelector, MoveSelector, choose_move};
pub use board::{Board, FlipSet};
pub use config::GameConfig;
pub use error::{BoardError, GameError, IllegalMoveError, TicTacToeError};
pub use game::{Game, MoveReport};
pub use types::{Cell, GameResult, GameSnapshot, LegalMove, Outcome, Player, Position, TurnState};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
