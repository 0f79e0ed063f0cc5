//! `Arbitrary` implementations for quickcheck-based tests.

use quickcheck::{Arbitrary, Gen};

use crate::{Board, Occupant, PlayerId};

impl Arbitrary for PlayerId {
    fn arbitrary(g: &mut Gen) -> Self {
        PlayerId(u32::arbitrary(g) % 8 + 1)
    }
}

impl Arbitrary for Occupant {
    fn arbitrary(g: &mut Gen) -> Self {
        let stone = Occupant::Stone(PlayerId::arbitrary(g));
        *g.choose(&[Occupant::Empty, Occupant::Blocked, Occupant::Joker, stone])
            .unwrap()
    }
}

/// A board containing one run of exactly `win_length` fields that all match
/// each other, on a random axis at a random position. Some of the run's
/// fields may be jokers instead of the player's stones.
#[derive(Clone, Debug)]
pub(crate) struct WinningRunInput {
    width: u32,
    height: u32,
    start: (u32, u32),
    axis: (i64, i64),
    pub(crate) win_length: u32,
    player: PlayerId,
    jokers: Vec<bool>,
}

impl WinningRunInput {
    pub(crate) fn board(&self) -> Board {
        let mut board = Board::new(self.width, self.height);
        for (i, (x, y)) in self.run_coordinates().into_iter().enumerate() {
            let occupant = if self.jokers[i] {
                Occupant::Joker
            } else {
                Occupant::Stone(self.player)
            };
            board.set_occupant_at(x, y, occupant);
        }
        board
    }

    pub(crate) fn run_coordinates(&self) -> Vec<(u32, u32)> {
        (0..self.win_length as i64)
            .map(|i| {
                let x = self.start.0 as i64 + self.axis.0 * i;
                let y = self.start.1 as i64 + self.axis.1 * i;
                (x as u32, y as u32)
            })
            .collect()
    }
}

impl Arbitrary for WinningRunInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let win_length = u32::arbitrary(g) % 6 + 1;
        let width = win_length + u32::arbitrary(g) % 7;
        let height = win_length + u32::arbitrary(g) % 7;
        let axis = *g
            .choose(&[(1i64, 0i64), (0, 1), (1, 1), (1, -1)])
            .unwrap();
        // Pick a start so the whole run stays on the board. On the rising
        // diagonal the y coordinate decreases along the run.
        let x = if axis.0 == 0 {
            u32::arbitrary(g) % width
        } else {
            u32::arbitrary(g) % (width - win_length + 1)
        };
        let y = match axis.1 {
            0 => u32::arbitrary(g) % height,
            1 => u32::arbitrary(g) % (height - win_length + 1),
            _ => win_length - 1 + u32::arbitrary(g) % (height - win_length + 1),
        };
        let player = PlayerId::arbitrary(g);
        let jokers = (0..win_length).map(|_| bool::arbitrary(g)).collect();
        Self {
            width,
            height,
            start: (x, y),
            axis,
            win_length,
            player,
            jokers,
        }
    }
}
