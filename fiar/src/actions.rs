use serde::{Deserialize, Serialize};

use crate::{Board, PlayerId};

/// An action submitted to the game on behalf of one player.
///
/// Which actions are permitted depends on the current
/// [`Phase`](crate::Phase) and, during a turn, on whose turn it is; see
/// [`Game::allowed_actions`](crate::Game::allowed_actions).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Proposes a board size. The latest proposal becomes the current size
    /// candidate; the sizing phase ends when every active player's latest
    /// proposal names the same size.
    ProposeSize {
        player: PlayerId,
        width: u32,
        height: u32,
    },
    /// Flips a field between empty and blocked.
    ToggleBlock { player: PlayerId, x: u32, y: u32 },
    /// Flips a field between empty and joker. Fails on a field that is
    /// neither (e.g. a blocked one).
    ToggleJoker { player: PlayerId, x: u32, y: u32 },
    /// Accepts `board` as the final layout of the current sub-phase. The
    /// acceptance only counts for as long as `board` equals the live board;
    /// a later toggle by anyone silently revokes it.
    AcceptLayout { player: PlayerId, board: Board },
    /// Places a stone on a free field.
    PlaceStone { player: PlayerId, x: u32, y: u32 },
    /// Withdraws `player` from the game.
    Forfeit { player: PlayerId },
}

impl Action {
    /// The player this action acts for.
    pub fn player(&self) -> PlayerId {
        match *self {
            Action::ProposeSize { player, .. }
            | Action::ToggleBlock { player, .. }
            | Action::ToggleJoker { player, .. }
            | Action::AcceptLayout { player, .. }
            | Action::PlaceStone { player, .. }
            | Action::Forfeit { player } => player,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ProposeSize { .. } => ActionKind::ProposeSize,
            Action::ToggleBlock { .. } => ActionKind::ToggleBlock,
            Action::ToggleJoker { .. } => ActionKind::ToggleJoker,
            Action::AcceptLayout { .. } => ActionKind::AcceptLayout,
            Action::PlaceStone { .. } => ActionKind::PlaceStone,
            Action::Forfeit { .. } => ActionKind::Forfeit,
        }
    }
}

/// The discriminant of an [`Action`], used for allowed-action sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ProposeSize,
    ToggleBlock,
    ToggleJoker,
    AcceptLayout,
    PlaceStone,
    Forfeit,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::ProposeSize => "proposing a board size",
            ActionKind::ToggleBlock => "toggling a blocked field",
            ActionKind::ToggleJoker => "toggling a joker field",
            ActionKind::AcceptLayout => "accepting the layout",
            ActionKind::PlaceStone => "placing a stone",
            ActionKind::Forfeit => "forfeiting",
        };
        write!(f, "{}", name)
    }
}
