use crate::{ActionKind, ClientId, Occupant, Phase, PlayerId};

/// The error type for a move that is invalid on the board itself, even
/// though phase and authorization were fine.
#[derive(Clone, Debug, PartialEq)]
pub enum IllegalMove {
    /// The proposed board cannot fit a winning line.
    BoardTooSmall {
        width: u32,
        height: u32,
        win_length: u32,
    },
    /// The coordinates lie outside the board.
    OutOfBounds { x: u32, y: u32 },
    /// A stone was placed on a field that is not free.
    FieldOccupied { x: u32, y: u32, by: Occupant },
    /// A toggle hit a field that is neither of the two values the current
    /// sub-phase flips between.
    NotToggleable { x: u32, y: u32, found: Occupant },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::BoardTooSmall {
                width,
                height,
                win_length,
            } => write!(
                f,
                "a {}x{} board cannot fit {} in a row",
                width, height, win_length
            ),
            IllegalMove::OutOfBounds { x, y } => {
                write!(f, "field ({}, {}) is outside the board", x, y)
            }
            IllegalMove::FieldOccupied { x, y, by } => {
                write!(f, "field ({}, {}) is already occupied by {}", x, y, by)
            }
            IllegalMove::NotToggleable { x, y, found } => write!(
                f,
                "field ({}, {}) cannot be toggled because it is {}",
                x, y, found
            ),
        }
    }
}

/// The error type for [`Game::submit`](crate::Game::submit) and the query
/// methods.
///
/// A returned error guarantees that nothing happened: no state change and no
/// broadcast.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionError {
    /// The submitting client was never registered.
    UnknownClient(ClientId),
    /// The acting player was never registered.
    UnknownPlayer(PlayerId),
    /// The client does not control the acting player.
    ClientPlayerMismatch { client: ClientId, player: PlayerId },
    /// The action kind is not permitted in the current phase, or not for
    /// this player.
    NotAllowed {
        player: PlayerId,
        kind: ActionKind,
        phase: Phase,
    },
    /// Phase and authorization were correct, but the move itself violates a
    /// board invariant.
    Move(IllegalMove),
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::UnknownClient(client) => {
                write!(f, "client {} is not registered with this game", client)
            }
            ActionError::UnknownPlayer(player) => {
                write!(f, "player {} is not registered with this game", player)
            }
            ActionError::ClientPlayerMismatch { client, player } => {
                write!(f, "client {} does not control player {}", client, player)
            }
            ActionError::NotAllowed {
                player,
                kind,
                phase,
            } => write!(
                f,
                "{} is not allowed for player {} during {}",
                kind, player, phase
            ),
            ActionError::Move(_) => write!(f, "the move is illegal"),
        }
    }
}

impl From<IllegalMove> for ActionError {
    fn from(err: IllegalMove) -> Self {
        ActionError::Move(err)
    }
}

/// The error type for [`Game::new`](crate::Game::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// No client brought any player.
    NoPlayers,
    /// A game needs at least two players; with one, the first forfeit would
    /// leave nobody to win.
    NotEnoughPlayers,
    /// The same player id was registered twice.
    DuplicatePlayerId(PlayerId),
    /// Player ids must be positive.
    ZeroPlayerId,
    /// A win length of zero makes every move a winning one.
    ZeroWinLength,
}

impl std::error::Error for SetupError {}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NoPlayers => write!(f, "the game has no players"),
            SetupError::NotEnoughPlayers => write!(f, "the game needs at least two players"),
            SetupError::DuplicatePlayerId(player) => {
                write!(f, "player id {} is registered twice", player)
            }
            SetupError::ZeroPlayerId => write!(f, "player ids must be positive"),
            SetupError::ZeroWinLength => write!(f, "the win length must be at least one"),
        }
    }
}
