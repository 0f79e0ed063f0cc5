use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// The authoritative game phase: the single source of truth for what may
/// happen next.
///
/// Phases advance strictly in the order listed here. The three setup phases
/// each end when every active player has agreed on the artifact of that
/// phase (size, block layout, joker layout); [`Turn`](Phase::Turn) cycles
/// through the active players until the game ends in one of the two terminal
/// phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Phase {
    /// The players are negotiating the board size.
    ChoosingSize,
    /// The players are placing blocked fields and accepting the layout.
    SettingBlocks,
    /// The players are placing joker fields and accepting the layout.
    SettingJokers,
    /// It is `player`'s turn to place a stone.
    Turn { player: PlayerId },
    /// `player` has won.
    Victory { player: PlayerId },
    /// The board filled up without a winning line.
    Tie,
}

impl Phase {
    /// Whether the game has reached a terminal phase.
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Victory { .. } | Phase::Tie)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::ChoosingSize => write!(f, "the size negotiation phase"),
            Phase::SettingBlocks => write!(f, "the block placement phase"),
            Phase::SettingJokers => write!(f, "the joker placement phase"),
            Phase::Turn { player } => write!(f, "player {}'s turn", player),
            Phase::Victory { player } => write!(f, "the game end (player {} won)", player),
            Phase::Tie => write!(f, "the game end (tie)"),
        }
    }
}
