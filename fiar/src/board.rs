use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// The value held by one board field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    /// A free field.
    Empty,
    /// A field nobody may place a stone on.
    Blocked,
    /// A wildcard field that counts towards every player's lines.
    Joker,
    /// A stone placed by a player.
    Stone(PlayerId),
}

impl Occupant {
    /// The equality used by win detection.
    ///
    /// [`Empty`](Occupant::Empty) and [`Blocked`](Occupant::Blocked) match
    /// nothing, not even themselves: a line cannot run through a free or
    /// blocked field. [`Joker`](Occupant::Joker) matches every other
    /// occupant that is not free or blocked. Stones match stones of the
    /// same player.
    pub fn matches_for_win(self, other: Occupant) -> bool {
        use Occupant::*;
        match (self, other) {
            (Empty | Blocked, _) | (_, Empty | Blocked) => false,
            (Joker, _) | (_, Joker) => true,
            (Stone(a), Stone(b)) => a == b,
        }
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Occupant::Empty => write!(f, "empty"),
            Occupant::Blocked => write!(f, "blocked"),
            Occupant::Joker => write!(f, "a joker"),
            Occupant::Stone(player) => write!(f, "player {}", player),
        }
    }
}

/// A rectangular grid of [`Occupant`]s.
///
/// Cloning a board yields a fully independent snapshot; equality compares
/// dimensions and every field, which is what layout agreement relies on.
///
/// The accessors taking coordinates are bounds-unchecked by contract: passing
/// coordinates outside the board is a programming error and panics. Callers
/// that handle untrusted coordinates check [`Board::in_bounds`] first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Occupant>,
}

impl Board {
    /// Creates a board with every field [`Empty`](Occupant::Empty).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Occupant::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "({}, {}) is outside the {}x{} board",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    pub fn occupant_at(&self, x: u32, y: u32) -> Occupant {
        self.cells[self.index(x, y)]
    }

    pub fn set_occupant_at(&mut self, x: u32, y: u32, occupant: Occupant) {
        let index = self.index(x, y);
        self.cells[index] = occupant;
    }

    /// The number of fields that are not [`Empty`](Occupant::Empty).
    pub fn count_occupied(&self) -> u32 {
        self.cells.iter().filter(|&&c| c != Occupant::Empty).count() as u32
    }

    /// Checks whether the occupant at `(x, y)` completes a line of at least
    /// `win_length` fields on any of the four axes through `(x, y)`.
    ///
    /// Only lines through `(x, y)` are examined. The engine calls this after
    /// every placement, so a win anywhere else on the board would already
    /// have ended the game on an earlier move.
    pub fn winning_line_through(&self, x: u32, y: u32, win_length: u32) -> bool {
        let placed = self.occupant_at(x, y);
        // Horizontal, vertical, and the two diagonals.
        const AXES: [(i64, i64); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        for (dx, dy) in AXES {
            let mut run = 1;
            for dir in [1i64, -1] {
                let mut cx = x as i64 + dx * dir;
                let mut cy = y as i64 + dy * dir;
                while cx >= 0
                    && cy >= 0
                    && cx < self.width as i64
                    && cy < self.height as i64
                    && self.occupant_at(cx as u32, cy as u32).matches_for_win(placed)
                {
                    run += 1;
                    cx += dx * dir;
                    cy += dy * dir;
                }
            }
            if run >= win_length {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::WinningRunInput;

    fn stone(id: u32) -> Occupant {
        Occupant::Stone(PlayerId(id))
    }

    #[test]
    fn sentinels_never_match_themselves() {
        assert!(!Occupant::Empty.matches_for_win(Occupant::Empty));
        assert!(!Occupant::Blocked.matches_for_win(Occupant::Blocked));
        assert!(Occupant::Joker.matches_for_win(Occupant::Joker));
    }

    #[test]
    fn joker_matches_stones_but_not_empty_or_blocked() {
        assert!(Occupant::Joker.matches_for_win(stone(1)));
        assert!(stone(1).matches_for_win(Occupant::Joker));
        assert!(!Occupant::Joker.matches_for_win(Occupant::Empty));
        assert!(!Occupant::Joker.matches_for_win(Occupant::Blocked));
    }

    quickcheck! {
        fn win_equality_is_symmetric(a: Occupant, b: Occupant) -> bool {
            a.matches_for_win(b) == b.matches_for_win(a)
        }

        fn empty_and_blocked_match_nothing(occ: Occupant) -> bool {
            !Occupant::Empty.matches_for_win(occ) && !Occupant::Blocked.matches_for_win(occ)
        }

        // Completing a run of exactly the win length is detected at every
        // field of the run, regardless of which end was placed last.
        fn run_wins_from_every_field(input: WinningRunInput) -> bool {
            let board = input.board();
            input
                .run_coordinates()
                .into_iter()
                .all(|(x, y)| board.winning_line_through(x, y, input.win_length))
        }
    }

    #[test]
    fn snapshot_is_independent() {
        let mut board = Board::new(5, 5);
        let snapshot = board.clone();
        board.set_occupant_at(2, 2, stone(1));
        assert_eq!(snapshot.occupant_at(2, 2), Occupant::Empty);
        assert_ne!(board, snapshot);
    }

    #[test]
    fn equality_compares_dimensions_and_fields() {
        assert_ne!(Board::new(5, 6), Board::new(6, 5));
        let mut a = Board::new(5, 5);
        let b = Board::new(5, 5);
        assert_eq!(a, b);
        a.set_occupant_at(0, 0, Occupant::Blocked);
        assert_ne!(a, b);
    }

    #[test]
    fn horizontal_run_of_win_length_wins() {
        let mut board = Board::new(9, 9);
        for x in 2..7 {
            board.set_occupant_at(x, 4, stone(1));
        }
        assert!(board.winning_line_through(4, 4, 5));
        assert!(!board.winning_line_through(4, 4, 6));
    }

    #[test]
    fn diagonal_run_through_joker_wins() {
        let mut board = Board::new(9, 9);
        for i in 0..5 {
            board.set_occupant_at(i, i, stone(2));
        }
        board.set_occupant_at(2, 2, Occupant::Joker);
        assert!(board.winning_line_through(4, 4, 5));
        // The joker itself is no starting point for a shorter win.
        assert!(!board.winning_line_through(4, 4, 6));
    }

    #[test]
    fn blocked_field_interrupts_a_line() {
        let mut board = Board::new(9, 9);
        for y in 0..6 {
            board.set_occupant_at(3, y, stone(1));
        }
        board.set_occupant_at(3, 2, Occupant::Blocked);
        assert!(!board.winning_line_through(3, 5, 5));
        assert!(board.winning_line_through(3, 5, 3));
    }

    #[test]
    fn anti_diagonal_run_wins() {
        let mut board = Board::new(7, 7);
        for i in 0..5 {
            board.set_occupant_at(6 - i, i, stone(3));
        }
        assert!(board.winning_line_through(6, 0, 5));
        assert!(board.winning_line_through(2, 4, 5));
    }

    #[test]
    fn other_players_stones_do_not_extend_a_run() {
        let mut board = Board::new(9, 9);
        for x in 0..4 {
            board.set_occupant_at(x, 0, stone(1));
        }
        board.set_occupant_at(4, 0, stone(2));
        assert!(!board.winning_line_through(3, 0, 5));
    }
}
