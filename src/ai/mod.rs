use std::fmt;

use crate::error::EngineError;
use crate::game::Board;

mod tiered;

pub use tiered::TieredOpponent;

/// Opponent difficulty, 1 (weakest) to 3 (strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub fn as_u8(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            3 => Ok(Tier::Three),
            other => Err(EngineError::InvalidConfiguration(format!(
                "tier must be between 1 and 3, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Interface for computer move selection.
///
/// The policy may place and remove speculative pieces on the board it is
/// given, but must hand it back in exactly the state it received it. It
/// returns the chosen column; committing the move is the caller's job.
/// Callers never pass a full board.
pub trait Opponent {
    /// Select a column for the computer's next move.
    fn choose_column(&mut self, board: &mut Board) -> usize;

    /// Return the policy's display name.
    fn name(&self) -> &str;
}
