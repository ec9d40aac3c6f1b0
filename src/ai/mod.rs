pub mod greedy;

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::types::{Player, Position};

/// Strength of the computer opponent.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal move.
    Basic,
    /// Greedy capture count plus corner/edge bonus.
    #[default]
    Advanced,
}

/// The seam the turn manager calls for computer moves; [`HeuristicSelector`]
/// is the stock implementation.
pub trait MoveSelector: Send + Sync {
    /// Returns `None` when `player` has no legal move; the caller treats that as a pass.
    fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<Position>;
}

/// Picks a move for `player` at the given difficulty.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    let moves = board.legal_moves(player);
    let chosen = match difficulty {
        Difficulty::Basic => moves.choose(rng).map(|mv| mv.position),
        Difficulty::Advanced => greedy::best_move(&moves),
    };
    debug!(%player, %difficulty, candidates = moves.len(), ?chosen, "computer move chosen");
    chosen
}

/// [`choose_move`] with an owned random source.
#[derive(Debug, Clone)]
pub struct HeuristicSelector<R> {
    rng: R,
}

impl<R: Rng> HeuristicSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl HeuristicSelector<ChaCha8Rng> {
    /// Reproducible selector: the same seed replays the same basic-level games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send + Sync> MoveSelector for HeuristicSelector<R> {
    fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<Position> {
        choose_move(board, player, difficulty, &mut self.rng)
    }
}
