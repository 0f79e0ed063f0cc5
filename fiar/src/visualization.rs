use crate::{Board, Occupant};

/// Renders the board as text for logs and debugging.
///
/// One glyph per field: `·` for empty, `#` for blocked, `*` for joker, and
/// the last decimal digit of the player id for a stone.
pub fn render_board(board: &Board) -> String {
    let mut result = String::from("╭");
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╮\n";
    for y in 0..board.height() {
        result += "│";
        for x in 0..board.width() {
            match board.occupant_at(x, y) {
                Occupant::Empty => result += "· ",
                Occupant::Blocked => result += "# ",
                Occupant::Joker => result += "* ",
                Occupant::Stone(player) => result += &format!("{} ", player.0 % 10),
            }
        }
        result += "│\n";
    }
    result += "╰";
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;

    #[test]
    fn renders_all_occupant_kinds() {
        let mut board = Board::new(3, 2);
        board.set_occupant_at(0, 0, Occupant::Blocked);
        board.set_occupant_at(1, 0, Occupant::Joker);
        board.set_occupant_at(2, 1, Occupant::Stone(PlayerId(12)));
        let rendered = render_board(&board);
        assert_eq!(rendered, "╭──────╮\n│# * · │\n│· · 2 │\n╰──────╯");
    }
}
