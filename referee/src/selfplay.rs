use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use fiar::{
    render_board, Action, Board, Client, ClientId, Color, EventSink, Game, GameEvent, GameOptions,
    Occupant, Phase, Player, PlayerId,
};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PALETTE: [Color; 6] = [
    Color::rgb(30, 90, 220),
    Color::rgb(220, 40, 40),
    Color::rgb(20, 150, 60),
    Color::rgb(240, 160, 20),
    Color::rgb(150, 60, 200),
    Color::rgb(90, 200, 210),
];

/// Collects every broadcast event into a shared buffer. Handed to a
/// spectator client, so each event lands in the buffer exactly once.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<GameEvent>>>);

impl EventLog {
    pub fn take(&self) -> Vec<GameEvent> {
        self.0.take()
    }
}

impl EventSink for EventLog {
    fn deliver(&mut self, event: &GameEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: u32,
    pub width: u32,
    pub height: u32,
    pub win_length: u32,
    /// How many blocked fields to scatter randomly during setup.
    pub blocks: u32,
    /// How many joker fields to scatter randomly during setup.
    pub jokers: u32,
    /// Per-turn chance that the mover forfeits instead of placing a stone.
    pub forfeit_chance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// `player` completed a winning line.
    WonBy { player: PlayerId },
    /// `player` won because everyone else forfeited.
    WonByForfeits { player: PlayerId },
    Tie,
}

/// Plays one game with random but legal moves by every player.
///
/// Player ids are `1..=num_players`, each controlled by its own client;
/// client `i` controls player `i + 1`. Returns the outcome together with
/// every event the game broadcast.
pub fn play_game(rng: &mut StdRng, config: &GameConfig) -> anyhow::Result<(Outcome, Vec<GameEvent>)> {
    let log = EventLog::default();
    let mut clients: Vec<Client> = (0..config.num_players)
        .map(|i| {
            let player = Player::new(
                PlayerId(i + 1),
                format!("player {}", i + 1),
                PALETTE[i as usize % PALETTE.len()],
            );
            Client::new(vec![player], |_: &GameEvent| {})
        })
        .collect();
    clients.push(Client::spectator(log.clone()));
    let mut game = Game::new(
        clients,
        GameOptions {
            win_length: config.win_length,
        },
    )?;

    for i in 0..config.num_players {
        game.submit(
            ClientId(i as usize),
            Action::ProposeSize {
                player: PlayerId(i + 1),
                width: config.width,
                height: config.height,
            },
        )?;
    }

    scatter(&mut game, rng, config.blocks, Layer::Blocks)?;
    accept_all(&mut game, config.num_players)?;
    scatter(&mut game, rng, config.jokers, Layer::Jokers)?;
    accept_all(&mut game, config.num_players)?;

    loop {
        let mover = match game.phase(ClientId(0))? {
            Phase::Turn { player } => player,
            _ => break,
        };
        let client = ClientId(mover.0 as usize - 1);
        if config.forfeit_chance > 0.0 && rng.gen_bool(config.forfeit_chance) {
            game.submit(client, Action::Forfeit { player: mover })?;
            continue;
        }
        let board = game.board(client)?.context("the board is sized during turns")?;
        let empties = empty_fields(&board);
        let (x, y) = empties[rng.gen_range(0..empties.len())];
        game.submit(client, Action::PlaceStone { player: mover, x, y })?;
    }

    if let Some(board) = game.board(ClientId(0))? {
        debug!("final board:\n{}", render_board(&board));
    }
    let events = log.take();
    let outcome = match game.phase(ClientId(0))? {
        Phase::Victory { player } => {
            let by_forfeits = events
                .iter()
                .any(|e| matches!(e, GameEvent::AllOthersForfeited { .. }));
            if by_forfeits {
                Outcome::WonByForfeits { player }
            } else {
                Outcome::WonBy { player }
            }
        }
        Phase::Tie => Outcome::Tie,
        phase => anyhow::bail!("the game ended in {}", phase),
    };
    Ok((outcome, events))
}

enum Layer {
    Blocks,
    Jokers,
}

/// Toggles up to `count` random empty fields, always leaving at least one
/// field free to play on. Player 1 does all the toggling; the layout is
/// shared anyway.
fn scatter(game: &mut Game, rng: &mut StdRng, count: u32, layer: Layer) -> anyhow::Result<()> {
    let board = game
        .board(ClientId(0))?
        .context("the board is sized during setup")?;
    let mut empties = empty_fields(&board);
    let count = count.min((empties.len() as u32).saturating_sub(1));
    for _ in 0..count {
        let (x, y) = empties.swap_remove(rng.gen_range(0..empties.len()));
        let player = PlayerId(1);
        let action = match layer {
            Layer::Blocks => Action::ToggleBlock { player, x, y },
            Layer::Jokers => Action::ToggleJoker { player, x, y },
        };
        game.submit(ClientId(0), action)?;
    }
    Ok(())
}

fn accept_all(game: &mut Game, num_players: u32) -> anyhow::Result<()> {
    for i in 0..num_players {
        let client = ClientId(i as usize);
        let board = game
            .board(client)?
            .context("the board is sized during setup")?;
        game.submit(
            client,
            Action::AcceptLayout {
                player: PlayerId(i + 1),
                board,
            },
        )?;
    }
    Ok(())
}

fn empty_fields(board: &Board) -> Vec<(u32, u32)> {
    let mut empties = Vec::new();
    for y in 0..board.height() {
        for x in 0..board.width() {
            if board.occupant_at(x, y) == Occupant::Empty {
                empties.push((x, y));
            }
        }
    }
    empties
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn seeded_self_play_reaches_a_terminal_phase() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = GameConfig {
            num_players: 3,
            width: 8,
            height: 8,
            win_length: 4,
            blocks: 3,
            jokers: 2,
            forfeit_chance: 0.0,
        };
        for _ in 0..5 {
            let (outcome, events) = play_game(&mut rng, &config).unwrap();
            assert_ne!(outcome, Outcome::WonByForfeits { player: PlayerId(1) });
            // Setup echoes alone already produce events.
            assert!(events.len() > config.num_players as usize);
            assert!(matches!(
                events.last(),
                Some(GameEvent::Victory { .. } | GameEvent::Tie)
            ));
        }
    }

    #[test]
    fn certain_forfeits_end_in_a_win_by_default() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig {
            num_players: 2,
            width: 6,
            height: 6,
            win_length: 5,
            blocks: 0,
            jokers: 0,
            forfeit_chance: 1.0,
        };
        let (outcome, events) = play_game(&mut rng, &config).unwrap();
        // Player 1 moves first and always forfeits, so player 2 survives.
        assert_eq!(outcome, Outcome::WonByForfeits { player: PlayerId(2) });
        assert!(events.contains(&GameEvent::AllOthersForfeited {
            player: PlayerId(2)
        }));
    }

    #[test]
    fn fully_scattered_setup_still_leaves_a_playable_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = GameConfig {
            num_players: 2,
            width: 5,
            height: 5,
            win_length: 5,
            // Far more than the board has fields.
            blocks: 100,
            jokers: 100,
            forfeit_chance: 0.0,
        };
        let (outcome, _) = play_game(&mut rng, &config).unwrap();
        assert!(matches!(
            outcome,
            Outcome::WonBy { .. } | Outcome::Tie
        ));
    }
}
