use serde::{Deserialize, Serialize};

use crate::{Action, Phase, PlayerId};

/// A state-change notification delivered to every registered client.
///
/// For every accepted action the game broadcasts, in this order: the
/// [`Action`](GameEvent::Action) echo, a [`PhaseChange`](GameEvent::PhaseChange)
/// if the phase value changed, and finally one of the terminal notifications
/// if the game ended. Rejected actions broadcast nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Echo of an accepted action, in submission order. Every client
    /// receives it, including the one that submitted the action.
    Action { action: Action },
    /// The phase changed; carries the new phase.
    PhaseChange { phase: Phase },
    /// `player` completed a winning line.
    Victory { player: PlayerId },
    /// The board filled up without a winning line.
    Tie,
    /// All other players forfeited; `player` wins by default.
    AllOthersForfeited { player: PlayerId },
}
