use std::collections::HashMap;

use crate::PlayerId;

/// Tracks which players have endorsed the current proposed artifact during a
/// setup sub-phase.
///
/// `T` is the artifact the players must converge on: a `(width, height)` pair
/// during sizing, a [`Board`](crate::Board) snapshot during the block and
/// joker sub-phases. Each player holds at most one vote; a newer vote
/// replaces the older one, so changing one's mind is always allowed.
///
/// Agreement is evaluated against whatever artifact is current *now*, not
/// against the artifact a vote was cast for. This is deliberate: when a
/// player edits the shared layout after others accepted it, their stale
/// acceptances simply stop matching and the sub-phase cannot advance until
/// everyone re-accepts.
#[derive(Clone, Debug)]
pub struct Agreement<T> {
    votes: HashMap<PlayerId, T>,
}

impl<T: PartialEq> Agreement<T> {
    pub fn new() -> Self {
        Self {
            votes: HashMap::new(),
        }
    }

    /// Records `player`'s latest vote, replacing any earlier one.
    pub fn record(&mut self, player: PlayerId, artifact: T) {
        self.votes.insert(player, artifact);
    }

    /// True iff every player in `players` has a recorded vote equal to
    /// `current`.
    pub fn agreed(&self, players: impl IntoIterator<Item = PlayerId>, current: &T) -> bool {
        players
            .into_iter()
            .all(|player| self.votes.get(&player) == Some(current))
    }
}

impl<T: PartialEq> Default for Agreement<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    const PLAYERS: [PlayerId; 3] = [PlayerId(1), PlayerId(2), PlayerId(3)];

    #[test]
    fn agreement_requires_every_player() {
        let mut votes = Agreement::new();
        votes.record(PlayerId(1), (10, 10));
        votes.record(PlayerId(2), (10, 10));
        assert!(!votes.agreed(PLAYERS, &(10, 10)));
        votes.record(PlayerId(3), (10, 10));
        assert!(votes.agreed(PLAYERS, &(10, 10)));
    }

    #[test]
    fn newer_vote_replaces_older_one() {
        let mut votes = Agreement::new();
        for player in PLAYERS {
            votes.record(player, (10, 10));
        }
        votes.record(PlayerId(2), (12, 12));
        assert!(!votes.agreed(PLAYERS, &(10, 10)));
        votes.record(PlayerId(2), (10, 10));
        assert!(votes.agreed(PLAYERS, &(10, 10)));
    }

    #[test]
    fn votes_for_a_superseded_artifact_do_not_count() {
        let mut votes = Agreement::new();
        for player in PLAYERS {
            votes.record(player, (10, 10));
        }
        // The current artifact moved on; old unanimous votes are stale.
        assert!(!votes.agreed(PLAYERS, &(14, 10)));
    }

    quickcheck! {
        // Replaying an arbitrary vote sequence, agreement holds exactly when
        // the last vote of every player equals the current artifact.
        fn agreed_iff_every_last_vote_matches(seq: Vec<(u8, u8)>) -> bool {
            let mut votes = Agreement::new();
            let mut last: HashMap<PlayerId, u8> = HashMap::new();
            for (who, size) in seq {
                let player = PLAYERS[who as usize % PLAYERS.len()];
                let size = size % 4;
                votes.record(player, size);
                last.insert(player, size);
            }
            (0..4u8).all(|current| {
                let expected = PLAYERS
                    .iter()
                    .all(|p| last.get(p) == Some(&current));
                votes.agreed(PLAYERS, &current) == expected
            })
        }
    }
}
