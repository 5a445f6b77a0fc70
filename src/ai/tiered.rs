use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::{Board, Player, COLS};

use super::{Opponent, Tier};

/// Difficulty-tiered computer opponent.
///
/// Tier 2 takes an immediate win when one exists, otherwise blocks an
/// immediate human win, otherwise plays a random open column. Tier 1 runs
/// those checks only one turn in three and plays at random the rest of the
/// time. Tier 3 always runs them, and additionally steers away from columns
/// where the cell opened up directly above its own move would complete a
/// four for either side.
pub struct TieredOpponent<R = StdRng> {
    tier: Tier,
    rng: R,
}

impl TieredOpponent<StdRng> {
    pub fn new(tier: Tier) -> Self {
        TieredOpponent {
            tier,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic policy for a fixed seed.
    pub fn seeded(tier: Tier, seed: u64) -> Self {
        TieredOpponent {
            tier,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> TieredOpponent<R> {
    /// Build a policy around a caller-supplied random source.
    pub fn with_rng(tier: Tier, rng: R) -> Self {
        TieredOpponent { tier, rng }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    fn random_open_column(&mut self, board: &Board) -> usize {
        let open = board.open_columns();
        assert!(!open.is_empty(), "no open column to choose from");
        open[self.rng.random_range(0..open.len())]
    }

    /// Win now, else block now, else a random open column.
    fn tactical_column(&mut self, board: &mut Board) -> usize {
        if let Some(col) = winning_column(board, Player::Computer) {
            return col;
        }
        if let Some(col) = winning_column(board, Player::Human) {
            return col;
        }
        self.random_open_column(board)
    }

    /// Win and block as tier 2; otherwise prefer columns whose follow-up
    /// cell hands nobody a four.
    fn lookahead_column(&mut self, board: &mut Board) -> usize {
        if let Some(col) = winning_column(board, Player::Computer) {
            return col;
        }
        if let Some(col) = winning_column(board, Player::Human) {
            return col;
        }

        let pool = safe_columns(board);
        if pool.is_empty() {
            self.random_open_column(board)
        } else {
            pool[self.rng.random_range(0..pool.len())]
        }
    }
}

impl<R: Rng> Opponent for TieredOpponent<R> {
    fn choose_column(&mut self, board: &mut Board) -> usize {
        match self.tier {
            Tier::One => {
                if self.rng.random_range(0..3) == 0 {
                    self.tactical_column(board)
                } else {
                    self.random_open_column(board)
                }
            }
            Tier::Two => self.tactical_column(board),
            Tier::Three => self.lookahead_column(board),
        }
    }

    fn name(&self) -> &str {
        match self.tier {
            Tier::One => "Tier 1",
            Tier::Two => "Tier 2",
            Tier::Three => "Tier 3",
        }
    }
}

/// First column, left to right, where `side` would complete a four by
/// dropping a piece right now. The speculative piece is always removed
/// before returning.
fn winning_column(board: &mut Board, side: Player) -> Option<usize> {
    for col in 0..COLS {
        let row = match board.place(col, side) {
            Ok(row) => row,
            Err(_) => continue,
        };
        let wins = board.check_win_at(row, col).is_some();
        board.unplace(row, col);
        if wins {
            return Some(col);
        }
    }
    None
}

/// Columns worth considering once no immediate win or block exists.
///
/// A column at least two cells from full is kept unless a computer move
/// there would let the very next piece in that same column, human or
/// computer, complete a four. Columns with exactly one empty cell are kept
/// unconditionally; taking the last slot cannot set anything up.
fn safe_columns(board: &mut Board) -> Vec<usize> {
    let mut pool = Vec::new();
    for col in 0..COLS {
        let row = match board.landing_row(col) {
            Some(row) => row,
            None => continue,
        };
        if row == 0 || !sets_up_reply(board, col) {
            pool.push(col);
        }
    }
    pool
}

/// Would a computer move in `col` open a cell directly above it that
/// completes a four for whichever side plays there next?
fn sets_up_reply(board: &mut Board, col: usize) -> bool {
    let row = match board.place(col, Player::Computer) {
        Ok(row) => row,
        Err(_) => return false,
    };

    let mut gives_away = false;
    for side in [Player::Human, Player::Computer] {
        let above = match board.place(col, side) {
            Ok(above) => above,
            Err(_) => continue,
        };
        let wins = board.check_win_at(above, col).is_some();
        board.unplace(above, col);
        if wins {
            gives_away = true;
            break;
        }
    }

    board.unplace(row, col);
    gives_away
}
