use crate::{
    Action, ActionError, ActionKind, Agreement, Board, ClientId, GameEvent, IllegalMove, Occupant,
    Phase, Player, PlayerId, Roster, SetupError,
};

/// Receives every broadcast [`GameEvent`].
///
/// Delivery is synchronous and happens before the originating
/// [`Game::submit`] call returns, in client registration order. Delivery is
/// fire-and-forget: the game never retries and a sink cannot veto or roll
/// back an action. A sink must not call back into the game.
pub trait EventSink {
    fn deliver(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn deliver(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// One external collaborator: the players it controls and the callback that
/// receives events.
pub struct Client {
    pub players: Vec<Player>,
    pub sink: Box<dyn EventSink>,
}

impl Client {
    pub fn new(players: Vec<Player>, sink: impl EventSink + 'static) -> Self {
        Self {
            players,
            sink: Box::new(sink),
        }
    }

    /// A client that controls no players but still receives every event.
    pub fn spectator(sink: impl EventSink + 'static) -> Self {
        Self::new(Vec::new(), sink)
    }
}

/// Game parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOptions {
    /// How many matching fields in a row win the game.
    pub win_length: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { win_length: 5 }
    }
}

/// A single game of five (or n) in a row.
///
/// The game is the authority over phase, board, and roster. Clients submit
/// [`Action`]s through [`Game::submit`]; every accepted action is applied
/// and broadcast before `submit` returns, and every rejected action leaves
/// the game untouched.
///
/// A `Game` is meant for single-threaded, single-writer use. It never
/// hands out references into its own state: queries return copies.
pub struct Game {
    roster: Roster,
    sinks: Vec<Box<dyn EventSink>>,
    options: GameOptions,
    phase: Phase,
    board: Option<Board>,
    /// Players still in the game as (owning client, player), rotation order.
    active: Vec<(ClientId, PlayerId)>,
    /// Index into `active` of the player whose turn it is.
    current: usize,
    size_votes: Agreement<(u32, u32)>,
    layout_votes: Agreement<Board>,
    /// Number of non-empty fields, kept incrementally so tie detection does
    /// not rescan the board after every move.
    occupied: u32,
}

impl Game {
    /// Creates a game from a fixed client list.
    ///
    /// Client ids are assigned in list order. Turn rotation follows seat
    /// order: all of the first client's players, then the second's, and so
    /// on.
    pub fn new(clients: Vec<Client>, options: GameOptions) -> Result<Self, SetupError> {
        if options.win_length == 0 {
            return Err(SetupError::ZeroWinLength);
        }
        let player_lists: Vec<Vec<Player>> =
            clients.iter().map(|client| client.players.clone()).collect();
        let roster = Roster::new(&player_lists)?;
        // Two players minimum: the active list must never empty out through
        // forfeits while the game is still running.
        if roster.num_players() < 2 {
            return Err(SetupError::NotEnoughPlayers);
        }
        let sinks = clients.into_iter().map(|client| client.sink).collect();
        let active = roster
            .seats()
            .map(|(client, player)| (client, player.id))
            .collect();
        Ok(Self {
            roster,
            sinks,
            options,
            phase: Phase::ChoosingSize,
            board: None,
            active,
            current: 0,
            size_votes: Agreement::new(),
            layout_votes: Agreement::new(),
            occupied: 0,
        })
    }

    /// The fixed client/player registry.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    /// The current phase.
    pub fn phase(&self, client: ClientId) -> Result<Phase, ActionError> {
        self.check_client(client)?;
        Ok(self.phase)
    }

    /// A snapshot of the board, or `None` while the size is still being
    /// negotiated. The copy is fully independent of the game's own board.
    pub fn board(&self, client: ClientId) -> Result<Option<Board>, ActionError> {
        self.check_client(client)?;
        Ok(self.board.clone())
    }

    /// The players still in the game, in rotation order.
    pub fn active_players(&self, client: ClientId) -> Result<Vec<PlayerId>, ActionError> {
        self.check_client(client)?;
        Ok(self.active.iter().map(|&(_, player)| player).collect())
    }

    /// Whether `player` may act at all right now.
    pub fn can_act(&self, client: ClientId, player: PlayerId) -> Result<bool, ActionError> {
        Ok(!self.allowed_actions(client, player)?.is_empty())
    }

    /// The action kinds `player` may currently submit. Empty for forfeited
    /// players and in terminal phases.
    pub fn allowed_actions(
        &self,
        client: ClientId,
        player: PlayerId,
    ) -> Result<Vec<ActionKind>, ActionError> {
        self.check_client(client)?;
        self.check_player(player)?;
        Ok(self.allowed_kinds(player))
    }

    /// Submits `action` on behalf of `client`.
    ///
    /// Authorization, state mutation, and event broadcast all happen
    /// synchronously before this returns. On any error, nothing was mutated
    /// and nothing was broadcast.
    pub fn submit(&mut self, client: ClientId, action: Action) -> Result<(), ActionError> {
        self.check_client(client)?;
        let player = action.player();
        self.check_player(player)?;
        if !self.roster.owns_player(client, player) {
            return Err(ActionError::ClientPlayerMismatch { client, player });
        }
        if !self.allowed_kinds(player).contains(&action.kind()) {
            return Err(ActionError::NotAllowed {
                player,
                kind: action.kind(),
                phase: self.phase,
            });
        }
        match self.phase {
            Phase::ChoosingSize => self.handle_size_proposal(action),
            Phase::SettingBlocks | Phase::SettingJokers => self.handle_setup_layout(action),
            Phase::Turn { .. } => self.handle_play(action),
            Phase::Victory { .. } | Phase::Tie => {
                unreachable!("terminal phases allow no actions")
            }
        }
    }

    fn check_client(&self, client: ClientId) -> Result<(), ActionError> {
        if self.roster.is_known_client(client) {
            Ok(())
        } else {
            Err(ActionError::UnknownClient(client))
        }
    }

    fn check_player(&self, player: PlayerId) -> Result<(), ActionError> {
        if self.roster.is_known_player(player) {
            Ok(())
        } else {
            Err(ActionError::UnknownPlayer(player))
        }
    }

    fn is_active(&self, player: PlayerId) -> bool {
        self.active.iter().any(|&(_, p)| p == player)
    }

    fn active_ids(&self) -> Vec<PlayerId> {
        self.active.iter().map(|&(_, player)| player).collect()
    }

    fn allowed_kinds(&self, player: PlayerId) -> Vec<ActionKind> {
        if !self.is_active(player) {
            return Vec::new();
        }
        match self.phase {
            Phase::ChoosingSize => vec![ActionKind::ProposeSize],
            Phase::SettingBlocks => vec![ActionKind::ToggleBlock, ActionKind::AcceptLayout],
            Phase::SettingJokers => vec![ActionKind::ToggleJoker, ActionKind::AcceptLayout],
            Phase::Turn { player: mover } => {
                if player == mover {
                    vec![ActionKind::PlaceStone, ActionKind::Forfeit]
                } else {
                    vec![ActionKind::Forfeit]
                }
            }
            Phase::Victory { .. } | Phase::Tie => Vec::new(),
        }
    }

    /// Delivers `event` to every registered client in registration order,
    /// spectators included.
    fn broadcast(&mut self, event: GameEvent) {
        for sink in &mut self.sinks {
            sink.deliver(&event);
        }
    }

    /// Switches the phase and broadcasts the change. A no-op when the phase
    /// value is unchanged (a forfeit may leave the same player's turn
    /// current).
    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.broadcast(GameEvent::PhaseChange { phase });
        }
    }

    fn handle_size_proposal(&mut self, action: Action) -> Result<(), ActionError> {
        let Action::ProposeSize {
            player,
            width,
            height,
        } = action.clone()
        else {
            unreachable!("kind was checked against the phase");
        };
        let win_length = self.options.win_length;
        if width < win_length || height < win_length {
            return Err(IllegalMove::BoardTooSmall {
                width,
                height,
                win_length,
            }
            .into());
        }
        self.size_votes.record(player, (width, height));
        self.broadcast(GameEvent::Action { action });
        if self.size_votes.agreed(self.active_ids(), &(width, height)) {
            self.board = Some(Board::new(width, height));
            self.occupied = 0;
            self.layout_votes = Agreement::new();
            self.set_phase(Phase::SettingBlocks);
        }
        Ok(())
    }

    fn handle_setup_layout(&mut self, action: Action) -> Result<(), ActionError> {
        let echo = action.clone();
        match action {
            Action::ToggleBlock { x, y, .. } => {
                self.toggle(x, y, Occupant::Blocked)?;
            }
            Action::ToggleJoker { x, y, .. } => {
                self.toggle(x, y, Occupant::Joker)?;
            }
            Action::AcceptLayout { player, board } => {
                self.layout_votes.record(player, board);
            }
            _ => unreachable!("kind was checked against the phase"),
        }
        self.broadcast(GameEvent::Action { action: echo });

        // Agreement is always re-checked against the live board, so a toggle
        // after someone accepted silently revokes their acceptance.
        let agreed = {
            let board = self.board.as_ref().expect("board exists past sizing");
            self.layout_votes.agreed(self.active_ids(), board)
        };
        if agreed {
            match self.phase {
                Phase::SettingBlocks => {
                    self.layout_votes = Agreement::new();
                    self.set_phase(Phase::SettingJokers);
                }
                Phase::SettingJokers => {
                    self.current = 0;
                    let first = self.active[0].1;
                    self.set_phase(Phase::Turn { player: first });
                }
                _ => unreachable!("layout handling only runs in setup phases"),
            }
        }
        Ok(())
    }

    /// Flips the field at `(x, y)` between [`Occupant::Empty`] and `mark`.
    fn toggle(&mut self, x: u32, y: u32, mark: Occupant) -> Result<(), ActionError> {
        let board = self.board.as_mut().expect("board exists past sizing");
        if !board.in_bounds(x, y) {
            return Err(IllegalMove::OutOfBounds { x, y }.into());
        }
        let found = board.occupant_at(x, y);
        if found == Occupant::Empty {
            board.set_occupant_at(x, y, mark);
            self.occupied += 1;
        } else if found == mark {
            board.set_occupant_at(x, y, Occupant::Empty);
            self.occupied -= 1;
        } else {
            return Err(IllegalMove::NotToggleable { x, y, found }.into());
        }
        Ok(())
    }

    fn handle_play(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::PlaceStone { player, x, y } => self.handle_place(player, x, y),
            Action::Forfeit { player } => self.handle_forfeit(player),
            _ => unreachable!("kind was checked against the phase"),
        }
    }

    fn handle_place(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), ActionError> {
        let win_length = self.options.win_length;
        let (won, full) = {
            let board = self.board.as_mut().expect("board exists past sizing");
            if !board.in_bounds(x, y) {
                return Err(IllegalMove::OutOfBounds { x, y }.into());
            }
            let found = board.occupant_at(x, y);
            if found != Occupant::Empty {
                return Err(IllegalMove::FieldOccupied { x, y, by: found }.into());
            }
            board.set_occupant_at(x, y, Occupant::Stone(player));
            let won = board.winning_line_through(x, y, win_length);
            let full = self.occupied + 1 == board.width() * board.height();
            (won, full)
        };
        self.occupied += 1;
        self.broadcast(GameEvent::Action {
            action: Action::PlaceStone { player, x, y },
        });

        if won {
            self.set_phase(Phase::Victory { player });
            self.broadcast(GameEvent::Victory { player });
        } else if full {
            self.set_phase(Phase::Tie);
            self.broadcast(GameEvent::Tie);
        } else {
            self.current = (self.current + 1) % self.active.len();
            let next = self.active[self.current].1;
            self.set_phase(Phase::Turn { player: next });
        }
        Ok(())
    }

    fn handle_forfeit(&mut self, player: PlayerId) -> Result<(), ActionError> {
        let index = self
            .active
            .iter()
            .position(|&(_, p)| p == player)
            .expect("forfeiting player is active");
        self.active.remove(index);
        // Removing a seat before the current one shifts the index without
        // changing whose turn it is.
        if self.current > index {
            self.current -= 1;
        }
        self.current %= self.active.len();
        self.broadcast(GameEvent::Action {
            action: Action::Forfeit { player },
        });

        if self.active.len() == 1 {
            let survivor = self.active[0].1;
            self.set_phase(Phase::Victory { player: survivor });
            self.broadcast(GameEvent::AllOthersForfeited { player: survivor });
        } else {
            let mover = self.active[self.current].1;
            self.set_phase(Phase::Turn { player: mover });
        }
        Ok(())
    }
}
