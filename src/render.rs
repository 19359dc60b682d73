
use std::fmt::Write;

use super::{Board, Hand, Position};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";

/// Alternate colours so neighbouring letters are easy to tell apart
fn colour_of(pos: Position) -> &'static str {
    match (pos.col % 2 == 1, pos.row % 2 == 1) {
        (true, true) => MAGENTA,
        (true, false) => BLUE,
        (false, true) => RED,
        (false, false) => GREEN,
    }
}

/// The board as text, with column numbers on top and row letters on the left
///
/// ```text
///    1   2   3
///   -------------
/// A | C | A | T |
/// B |   |   |   |
/// ```
pub fn draw_board(board: &Board, colour: bool) -> String {
    let mut out = String::from(" ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>4}", col + 1);
    }
    out.push_str("\n  ");
    out.push_str(&"-".repeat(1 + 4 * board.cols()));

    for row in 0..board.rows() {
        out.push('\n');
        out.push((b'A' + row as u8) as char);
        out.push_str(" |");
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let letter = board.letter_at(pos).map_or(' ', |l| l.as_char());
            if colour {
                let _ = write!(out, "{} {}{} |", colour_of(pos), letter, RESET);
            } else {
                let _ = write!(out, " {} |", letter);
            }
        }
    }
    out
}

/// `A-1, B-3`, in hand order
pub fn hand_string(hand: &Hand) -> String {
    hand.tiles().iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
use super::play::fixtures::{board, hand};

#[test]
fn plain_board() {
    let board = board(2, 3, "C@A1, A@A2, T@A3, O@B2");
    assert_eq!(
        draw_board(&board, false),
        "    1   2   3\n  -------------\nA | C | A | T |\nB |   | O |   |",
    );
}

#[test]
fn wide_board_header() {
    let board = board(1, 11, "");
    let drawn = draw_board(&board, false);
    let mut lines = drawn.lines();
    assert_eq!(lines.next(), Some("    1   2   3   4   5   6   7   8   9  10  11"));
    assert_eq!(lines.next().map(str::len), Some(2 + 1 + 4 * 11));
    assert_eq!(lines.next(), Some(&*format!("A |{}", "   |".repeat(11))));
}

#[test]
fn coloured_board() {
    let board = board(2, 2, "A@A1, B@B2");
    let drawn = draw_board(&board, true);
    let rows = drawn.lines().skip(2).collect::<Vec<_>>();
    assert_eq!(rows[0], "A |\x1b[32m A\x1b[0m |\x1b[34m  \x1b[0m |");
    assert_eq!(rows[1], "B |\x1b[31m  \x1b[0m |\x1b[35m B\x1b[0m |");
}

#[test]
fn hand_display() {
    assert_eq!(hand_string(&hand("A-1, B-3,Q-10")), "A-1, B-3, Q-10");
    assert_eq!(hand_string(&Hand::new()), "");
}
