use super::board::Cell;

/// One of the two sides of a round: the human or the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "Player",
            Player::Computer => "Computer",
        }
    }
}
