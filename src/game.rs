use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::ai::{Difficulty, HeuristicSelector, MoveSelector};
use crate::board::{Board, FlipSet};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::types::{GameResult, GameSnapshot, LegalMove, Outcome, Player, Position, TurnState};

/// Everything the presentation layer needs after one accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub player: Player,
    pub placed: Position,
    pub flipped: FlipSet,
    /// Contract:
    /// - `Some(p)` when `p` had no legal reply and the mover goes again.
    /// - `None` when the turn passed normally or the game ended.
    pub passed: Option<Player>,
    pub state: TurnState,
    pub black_count: u8,
    pub white_count: u8,
}

/// One Othello game: board, turn state and the computer's move selector.
pub struct Game {
    board: Board,
    state: TurnState,
    config: GameConfig,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            state: TurnState::BlackToMove,
            config,
            selector,
        }
    }

    /// Game whose computer seat draws randomness from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, Box::new(HeuristicSelector::seeded(seed)))
    }

    /// Starts from an arbitrary position with `to_move` on turn.
    ///
    /// Applies the same pass rule as a normal move: if `to_move` cannot play the
    /// opponent moves instead, and if neither can the game is already over.
    pub fn from_board(
        board: Board,
        to_move: Player,
        config: GameConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        let state = if board.has_legal_move(to_move) {
            TurnState::to_move(to_move)
        } else if board.has_legal_move(to_move.opponent()) {
            info!(player = %to_move, "no legal move at setup, passing");
            TurnState::to_move(to_move.opponent())
        } else {
            game_over(&board)
        };

        Self {
            board,
            state,
            config,
            selector,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn current_player(&self) -> Option<Player> {
        self.state.current_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    /// True when the side to move is played by the computer.
    pub fn is_computer_turn(&self) -> bool {
        self.current_player()
            .is_some_and(|player| self.config.is_computer(player))
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        match self.current_player() {
            Some(player) => self.board.legal_moves(player),
            None => Vec::new(),
        }
    }

    /// Human move for the side to move.
    #[instrument(skip(self))]
    pub fn play(&mut self, row: u8, col: u8) -> Result<MoveReport, GameError> {
        let player = self.current_player().ok_or(GameError::GameOver)?;
        if self.config.is_computer(player) {
            warn!(%player, "move submitted during computer turn");
            return Err(GameError::NotYourTurn { player });
        }
        self.apply_move(Position { row, col }, player)
    }

    /// Lets the selector move for a computer-controlled side.
    ///
    /// Returns `Ok(None)` when the selector finds no move; the turn is then
    /// handed over as a pass.
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) -> Result<Option<MoveReport>, GameError> {
        let player = self.current_player().ok_or(GameError::GameOver)?;
        if !self.config.is_computer(player) {
            return Err(GameError::NotComputerTurn { player });
        }

        match self
            .selector
            .select_move(&self.board, player, self.config.difficulty)
        {
            Some(position) => self.apply_move(position, player).map(Some),
            None => {
                info!(%player, "computer has no legal move, passing");
                self.state = if self.board.has_legal_move(player.opponent()) {
                    TurnState::to_move(player.opponent())
                } else if self.board.has_legal_move(player) {
                    warn!(%player, "selector passed with moves left and no reply possible");
                    TurnState::to_move(player)
                } else {
                    game_over(&self.board)
                };
                Ok(None)
            }
        }
    }

    /// Back to the opening position with black to move. Config and selector are kept.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.state = TurnState::BlackToMove;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (black_count, white_count) = self.board.count();
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            state: self.state,
            current_player: self.current_player(),
            black_count,
            white_count,
            legal_moves: self.legal_moves(),
        }
    }

    /// Final score once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            TurnState::GameOver(outcome) => {
                let (black_count, white_count) = self.board.count();
                Some(GameResult {
                    outcome,
                    black_count,
                    white_count,
                })
            }
            _ => None,
        }
    }

    fn apply_move(&mut self, position: Position, player: Player) -> Result<MoveReport, GameError> {
        let flipped = self.board.apply_move(position, player).inspect_err(|err| {
            warn!(%player, %err, "move rejected");
        })?;

        let opponent = player.opponent();
        let mut passed = None;
        self.state = if self.board.has_legal_move(opponent) {
            TurnState::to_move(opponent)
        } else if self.board.has_legal_move(player) {
            info!(player = %opponent, "no legal move, passing");
            passed = Some(opponent);
            TurnState::to_move(player)
        } else {
            game_over(&self.board)
        };

        let (black_count, white_count) = self.board.count();
        debug!(%player, %position, flipped = flipped.len(), state = ?self.state, "move applied");

        Ok(MoveReport {
            player,
            placed: position,
            flipped,
            passed,
            state: self.state,
            black_count,
            white_count,
        })
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn game_over(board: &Board) -> TurnState {
    let (black_count, white_count) = board.count();
    let outcome = Outcome::from_counts(black_count, white_count);
    info!(black_count, white_count, ?outcome, "game over");
    TurnState::GameOver(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::IllegalMoveError;

    struct FixedMoveSelector {
        mv: Option<Position>,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&mut self, _: &Board, _: Player, _: Difficulty) -> Option<Position> {
            self.mv
        }
    }

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn two_player() -> Game {
        Game::with_seed(GameConfig::two_player(), 0)
    }

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::with_seed(GameConfig::default(), 3);
        let state = game.snapshot();

        assert_eq!(state.state, TurnState::BlackToMove);
        assert_eq!(state.current_player, Some(Player::Black));
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.legal_moves.len(), 4);
        assert!(game.result().is_none());
        assert!(!game.is_computer_turn());
    }

    #[test]
    fn accepted_move_reports_flips_and_hands_over_the_turn() {
        let mut game = two_player();

        let report = game.play(2, 3).unwrap();

        assert_eq!(report.player, Player::Black);
        assert_eq!(report.placed, pos(2, 3));
        assert_eq!(report.flipped.as_slice(), &[pos(3, 3)]);
        assert_eq!(report.passed, None);
        assert_eq!(report.state, TurnState::WhiteToMove);
        assert_eq!((report.black_count, report.white_count), (4, 1));
    }

    #[test]
    fn illegal_player_move_returns_error_and_keeps_state() {
        let mut game = two_player();
        let before = *game.board();

        let err = game.play(0, 0).unwrap_err();

        assert_eq!(
            err,
            GameError::IllegalMove(IllegalMoveError::NoFlips { position: pos(0, 0) })
        );
        assert!(err.to_string().contains("illegal move"));
        assert_eq!(*game.board(), before);
        assert_eq!(game.state(), TurnState::BlackToMove);
    }

    #[test]
    fn opponent_without_reply_passes_back_to_mover() {
        // After black takes (0,2) white has nothing to capture, while black can
        // still take (1,1) from (2,1).
        let start = board(
            "
            BW......
            .W......
            ........
            ........
            ........
            ........
            ......WB
            .....W..",
        );
        let mut game = Game::from_board(
            start,
            Player::Black,
            GameConfig::two_player(),
            Box::new(HeuristicSelector::seeded(0)),
        );
        assert_eq!(game.state(), TurnState::BlackToMove);

        let report = game.play(0, 2).unwrap();

        assert_eq!(report.flipped.as_slice(), &[pos(0, 1)]);
        assert_eq!(report.passed, Some(Player::White));
        assert_eq!(report.state, TurnState::BlackToMove);
        assert!(!game.board().has_legal_move(Player::White));
        assert!(game.board().has_legal_move(Player::Black));
    }

    #[test]
    fn full_board_forty_to_twenty_four_is_black_win() {
        let full = board(&format!("{}{}", "B".repeat(40), "W".repeat(24)));

        let game = Game::from_board(
            full,
            Player::Black,
            GameConfig::two_player(),
            Box::new(HeuristicSelector::seeded(0)),
        );

        assert_eq!(game.state(), TurnState::GameOver(Outcome::Winner(Player::Black)));
        assert_eq!(
            game.result(),
            Some(GameResult {
                outcome: Outcome::Winner(Player::Black),
                black_count: 40,
                white_count: 24,
            })
        );
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn equal_counts_end_in_a_draw() {
        let full = board(&format!("{}{}", "B".repeat(32), "W".repeat(32)));

        let game = Game::from_board(
            full,
            Player::White,
            GameConfig::two_player(),
            Box::new(HeuristicSelector::seeded(0)),
        );

        assert_eq!(game.state(), TurnState::GameOver(Outcome::Draw));
    }

    #[test]
    fn last_move_filling_the_board_ends_the_game() {
        let start = board(&format!(".B{}", "W".repeat(62)));
        let mut game = Game::from_board(
            start,
            Player::White,
            GameConfig::default(),
            Box::new(FixedMoveSelector { mv: Some(pos(0, 0)) }),
        );
        assert!(game.is_computer_turn());

        let report = game.play_computer().unwrap().unwrap();

        assert_eq!(report.flipped.as_slice(), &[pos(0, 1)]);
        assert_eq!(report.state, TurnState::GameOver(Outcome::Winner(Player::White)));
        assert_eq!((report.black_count, report.white_count), (0, 64));
        assert_eq!(game.play(0, 0), Err(GameError::GameOver));
        assert_eq!(game.play_computer(), Err(GameError::GameOver));
    }

    #[test]
    fn setup_where_side_to_move_cannot_play_passes_immediately() {
        let start = board(&format!(".B{}", "W".repeat(62)));

        let game = Game::from_board(
            start,
            Player::Black,
            GameConfig::two_player(),
            Box::new(HeuristicSelector::seeded(0)),
        );

        assert_eq!(game.state(), TurnState::WhiteToMove);
    }

    #[test]
    fn human_cannot_move_for_the_computer_and_vice_versa() {
        let mut game = Game::with_seed(GameConfig::default(), 9);

        assert_eq!(
            game.play_computer(),
            Err(GameError::NotComputerTurn { player: Player::Black })
        );
        game.play(2, 3).unwrap();
        assert!(game.is_computer_turn());
        assert_eq!(
            game.play(2, 2),
            Err(GameError::NotYourTurn { player: Player::White })
        );

        let report = game.play_computer().unwrap().unwrap();
        assert_eq!(report.player, Player::White);
        assert_eq!(game.state(), TurnState::BlackToMove);
    }

    #[test]
    fn selector_returning_an_illegal_square_is_rejected() {
        let mut game = Game::new(
            GameConfig::default().with_computer(Some(Player::Black)),
            Box::new(FixedMoveSelector { mv: Some(pos(0, 0)) }),
        );

        let err = game.play_computer().unwrap_err();

        assert!(matches!(err, GameError::IllegalMove(_)));
        assert_eq!(game.state(), TurnState::BlackToMove);
    }

    #[test]
    fn selector_without_a_move_is_treated_as_a_pass() {
        let mut game = Game::new(
            GameConfig::default().with_computer(Some(Player::Black)),
            Box::new(FixedMoveSelector { mv: None }),
        );

        assert_eq!(game.play_computer(), Ok(None));
        assert_eq!(game.state(), TurnState::WhiteToMove);
    }

    #[test]
    fn selector_pass_keeps_the_turn_when_only_the_computer_can_move() {
        let start = board(
            "
            BBB.....
            .W......
            ........
            ........
            ........
            ........
            ......WB
            .....W..",
        );
        let mut game = Game::from_board(
            start,
            Player::Black,
            GameConfig::default().with_computer(Some(Player::Black)),
            Box::new(FixedMoveSelector { mv: None }),
        );
        assert!(!game.board().has_legal_move(Player::White));
        assert!(game.board().has_legal_move(Player::Black));

        assert_eq!(game.play_computer(), Ok(None));

        assert_eq!(game.state(), TurnState::BlackToMove);
        assert!(!game.board().is_terminal());
        assert!(game.result().is_none());
    }

    #[test]
    fn computer_against_computer_runs_to_completion() {
        let mut game = Game::with_seed(
            GameConfig::default()
                .with_computer(Some(Player::Black))
                .with_difficulty(Difficulty::Basic),
            11,
        );
        let mut white = HeuristicSelector::seeded(12);

        let mut plies = 0;
        while let Some(player) = game.current_player() {
            if player == Player::Black {
                game.play_computer().unwrap();
            } else {
                let position = white
                    .select_move(game.board(), player, Difficulty::Advanced)
                    .unwrap();
                game.play(position.row, position.col).unwrap();
            }
            plies += 1;
            assert!(plies <= 60);
        }

        let result = game.result().unwrap();
        assert_eq!(result.outcome, Outcome::from_counts(result.black_count, result.white_count));
        assert!(game.board().is_terminal());
    }

    #[test]
    fn restart_restores_the_opening() {
        let mut game = two_player();
        game.play(2, 3).unwrap();
        game.set_difficulty(Difficulty::Basic);

        game.restart();

        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.state(), TurnState::BlackToMove);
        assert_eq!(game.config().difficulty, Difficulty::Basic);
    }
}
