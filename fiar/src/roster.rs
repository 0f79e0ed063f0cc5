use serde::{Deserialize, Serialize};

use crate::{Player, PlayerId, SetupError};

/// Identifies a registered client (an external collaborator such as a GUI, a
/// console, or a network bridge).
///
/// Ids are assigned by registration order when the game is constructed: the
/// first client passed to [`Game::new`](crate::Game::new) is `ClientId(0)`,
/// and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub usize);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed mapping from clients to the players they control.
///
/// Built once at game construction and never mutated afterwards: a forfeit
/// shrinks the *active* roster held by the game, not this registry, so a
/// forfeited player stays known here. A client with no players is a
/// spectator; it is a known client (it may query state and receives every
/// event) but controls nobody.
#[derive(Clone, Debug)]
pub struct Roster {
    /// (owning client, player), in seat order. Seat order is the turn
    /// rotation order: all of client 0's players first, then client 1's, …
    seats: Vec<(ClientId, Player)>,
    num_clients: usize,
}

impl Roster {
    /// Builds the registry from per-client player lists.
    ///
    /// Rejects an empty overall player set, non-positive player ids, and
    /// duplicate player ids (also across clients).
    pub fn new(player_lists: &[Vec<Player>]) -> Result<Self, SetupError> {
        let mut seats = Vec::new();
        for (index, players) in player_lists.iter().enumerate() {
            for player in players {
                if player.id.0 == 0 {
                    return Err(SetupError::ZeroPlayerId);
                }
                if seats.iter().any(|(_, p): &(ClientId, Player)| p.id == player.id) {
                    return Err(SetupError::DuplicatePlayerId(player.id));
                }
                seats.push((ClientId(index), player.clone()));
            }
        }
        if seats.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        Ok(Self {
            seats,
            num_clients: player_lists.len(),
        })
    }

    pub fn is_known_client(&self, client: ClientId) -> bool {
        client.0 < self.num_clients
    }

    pub fn is_known_player(&self, player: PlayerId) -> bool {
        self.seats.iter().any(|(_, p)| p.id == player)
    }

    pub fn owns_player(&self, client: ClientId, player: PlayerId) -> bool {
        self.owner_of(player) == Some(client)
    }

    pub fn owner_of(&self, player: PlayerId) -> Option<ClientId> {
        self.seats
            .iter()
            .find(|(_, p)| p.id == player)
            .map(|&(client, _)| client)
    }

    /// All registered players in seat (turn rotation) order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().map(|(_, player)| player)
    }

    /// Seat-ordered (client, player) pairs.
    pub(crate) fn seats(&self) -> impl Iterator<Item = (ClientId, &Player)> {
        self.seats.iter().map(|&(client, ref player)| (client, player))
    }

    pub fn num_clients(&self) -> usize {
        self.num_clients
    }

    pub fn num_players(&self) -> usize {
        self.seats.len()
    }
}
