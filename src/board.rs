use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{BoardError, IllegalMoveError};
use crate::types::{BOARD_SIZE, Cell, LegalMove, NUM_SQUARES, Player, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that colour occupies
/// the square. The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

/// Discs captured by one move, ordered by Manhattan distance from the placed
/// disc. Equal distances keep ray order: `DIRECTIONS` order, then outward
/// along the ray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlipSet {
    positions: Vec<Position>,
}

impl FlipSet {
    /// Each captured square lies on exactly one ray from `origin`, and every run
    /// starts next to it, so walking the rays while the mask is set visits all
    /// of `mask`.
    fn from_mask(origin: Position, mask: u64) -> Self {
        let (row, col) = pos_to_row_col(origin.index());
        let mut positions = Vec::with_capacity(mask.count_ones() as usize);

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            while in_bounds(r, c) {
                let index = (r as usize) * BOARD_SIZE + c as usize;
                if (mask & bit(index)) == 0 {
                    break;
                }
                positions.extend(Position::from_index(index));
                r += dr;
                c += dc;
            }
        }

        // Stable, so ray order survives among equal distances.
        positions.sort_by_key(|pos| pos.manhattan_distance(&origin));
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.positions.contains(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }
}

impl<'a> IntoIterator for &'a FlipSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// A board with no discs at all.
    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Builds a board from raw occupancy masks.
    pub fn from_bitboards(black: u64, white: u64) -> Result<Self, BoardError> {
        let overlap = black & white;
        if overlap != 0 {
            return Err(BoardError::Overlap { overlap });
        }
        Ok(Self { black, white })
    }

    pub fn cell(&self, position: Position) -> Cell {
        if !position.is_on_board() {
            return Cell::Empty;
        }
        let square = bit(position.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns every playable square for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<LegalMove> {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;

        (0..NUM_SQUARES)
            .filter(|&pos| (occupied & bit(pos)) == 0)
            .filter_map(|pos| {
                let flips = collect_flips(pos, me, opp);
                if flips == 0 {
                    return None;
                }
                Position::from_index(pos).map(|position| LegalMove {
                    position,
                    flip_count: flips.count_ones() as u8,
                })
            })
            .collect()
    }

    /// Returns legal move mask for the given side.
    pub fn legal_mask(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;

        let mut legal = 0u64;
        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }
        legal
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.legal_mask(player) != 0
    }

    /// Discs `player` would capture at `position`. Empty when the move is illegal.
    pub fn flips_for(&self, position: Position, player: Player) -> FlipSet {
        if !position.is_on_board() {
            return FlipSet { positions: Vec::new() };
        }
        let (me, opp) = self.sides(player);
        FlipSet::from_mask(position, collect_flips(position.index(), me, opp))
    }

    /// Places one disc for `player` and flips every captured disc.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(
        &mut self,
        position: Position,
        player: Player,
    ) -> Result<FlipSet, IllegalMoveError> {
        if !position.is_on_board() {
            return Err(IllegalMoveError::OutOfBounds {
                row: position.row,
                col: position.col,
            });
        }

        let pos = position.index();
        let move_bit = bit(pos);
        let (me, opp) = self.sides(player);
        if ((me | opp) & move_bit) != 0 {
            return Err(IllegalMoveError::Occupied { position });
        }

        let flips = collect_flips(pos, me, opp);
        if flips == 0 {
            return Err(IllegalMoveError::NoFlips { position });
        }
        assert_eq!(
            flips & !opp,
            0,
            "flip mask for {player} at {position} escaped the opponent's discs"
        );

        let next_me = me | move_bit | flips;
        let next_opp = opp & !flips;
        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        let flip_set = FlipSet::from_mask(position, flips);
        debug!(%player, %position, flipped = flip_set.len(), "disc placed");
        Ok(flip_set)
    }

    /// True when neither side can move.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Player::Black) && !self.has_legal_move(Player::White)
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn disc_count(&self, player: Player) -> u8 {
        let (me, _) = self.sides(player);
        me.count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            if let Some(position) = Position::from_index(pos) {
                *cell = self.cell(position).code();
            }
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::from_index(row * BOARD_SIZE + col).ok_or(fmt::Error)?;
                write!(f, "{}", self.cell(pos).symbol())?;
            }
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Parses 64 cells of `B`, `W` or `.` in row-major order; whitespace is ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = 0u64;
        let mut white = 0u64;
        let mut index = 0usize;

        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            if index < NUM_SQUARES {
                match ch {
                    'B' | 'b' | 'X' | 'x' => black |= bit(index),
                    'W' | 'w' | 'O' | 'o' => white |= bit(index),
                    '.' | '-' => {}
                    _ => return Err(BoardError::Cell { ch, index }),
                }
            }
            index += 1;
        }

        if index != NUM_SQUARES {
            return Err(BoardError::Shape { found: index });
        }
        Board::from_bitboards(black, white)
    }
}

fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let (row, col) = pos_to_row_col(pos);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else {
                if (me & square) != 0 {
                    flips |= line;
                }
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
