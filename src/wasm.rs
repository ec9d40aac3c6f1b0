use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::Difficulty;
use crate::config::GameConfig;
use crate::game::Game;
use crate::tictactoe::{self, Scoreboard, Status, TicTacToe};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// An Othello game owned by the page.
#[wasm_bindgen]
pub struct OthelloSession {
    game: Game,
}

#[wasm_bindgen]
impl OthelloSession {
    /// `config` may be `undefined` for the defaults (advanced, computer plays white).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, seed: u32) -> Result<OthelloSession, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_err)?
        };
        Ok(Self {
            game: Game::with_seed(config, u64::from(seed)),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.legal_moves())
    }

    /// Human move; resolves to a move report.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let report = self.game.play(row, col).map_err(js_err)?;
        to_js(&report)
    }

    /// Computer move; resolves to a move report, or `null` when it had to pass.
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<JsValue, JsValue> {
        match self.game.play_computer().map_err(js_err)? {
            Some(report) => to_js(&report),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = isComputerTurn)]
    pub fn is_computer_turn(&self) -> bool {
        self.game.is_computer_turn()
    }

    /// Accepts the difficulty select's values, `"basic"` or `"advanced"`.
    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty: Difficulty = difficulty.parse().map_err(js_err)?;
        self.game.set_difficulty(difficulty);
        Ok(())
    }

    /// Final score, or `null` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        match self.game.result() {
            Some(result) => to_js(&result),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }
}

#[derive(Serialize)]
struct TicTacToeView {
    board: [u8; tictactoe::CELLS],
    status: Status,
}

/// A tic-tac-toe table: current game plus the session scoreboard.
#[wasm_bindgen]
pub struct TicTacToeSession {
    game: TicTacToe,
    scores: Scoreboard,
    vs_computer: bool,
    rng: ChaCha8Rng,
}

#[wasm_bindgen]
impl TicTacToeSession {
    /// With `vs_computer` the computer plays O.
    #[wasm_bindgen(constructor)]
    pub fn new(vs_computer: bool, seed: u32) -> TicTacToeSession {
        Self {
            game: TicTacToe::new(),
            scores: Scoreboard::default(),
            vs_computer,
            rng: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&TicTacToeView {
            board: self.game.board().to_array(),
            status: self.game.status(),
        })
    }

    /// Places the current mark; resolves to the new state.
    pub fn place(&mut self, index: usize) -> Result<JsValue, JsValue> {
        if self.vs_computer && self.game.to_move() == Some(tictactoe::Mark::O) {
            return Err(JsValue::from_str("it is the computer's turn"));
        }
        self.apply(index)?;
        self.state()
    }

    /// Lets the computer play the mark on turn; resolves to the new state.
    /// Against the computer only O's turns are accepted.
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<JsValue, JsValue> {
        let mark = self
            .game
            .to_move()
            .ok_or_else(|| JsValue::from_str("game is already finished"))?;
        if self.vs_computer && mark != tictactoe::Mark::O {
            return Err(JsValue::from_str("it is the player's turn"));
        }
        if let Some(index) = tictactoe::computer_move(self.game.board(), mark, &mut self.rng) {
            self.apply(index)?;
        }
        self.state()
    }

    pub fn scoreboard(&self) -> Result<JsValue, JsValue> {
        to_js(&self.scores)
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Clears the scoreboard and starts a new game.
    #[wasm_bindgen(js_name = resetScores)]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        self.game.restart();
    }
}

impl TicTacToeSession {
    fn apply(&mut self, index: usize) -> Result<(), JsValue> {
        let status = self.game.place(index).map_err(js_err)?;
        self.scores.record(status);
        Ok(())
    }
}
