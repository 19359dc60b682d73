
use super::PlacementIntent;
use crate::{Board, Direction, Letter, Placement, Position};

/// Where the letter of a square of the word comes from
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellSource {
    Board,
    Placement,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedCell {
    pub position: Position,
    pub letter: Letter,
    pub source: CellSource,
}

/// The full word made by a move, including the tiles already on the board it touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedWord {
    pub direction: Direction,
    /// Top left to bottom right
    pub cells: Vec<ResolvedCell>,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("a blank space exists on the board between tiles at {0}")]
    Hole(Position),
    #[error("placements not on the same row or column")]
    NotCollinear,
}

/// The direction in which the word is read
///
/// A single tile is read vertically if there is a tile just above or below
/// it, and horizontally otherwise. When it would complete both a horizontal and
/// a vertical word, only the vertical one is considered.
pub fn word_direction(candidate: &[PlacementIntent], board: &Board) -> Option<Direction> {
    match Placement::find_alignment(candidate.iter().map(|p| p.position))? {
        Ok(Placement(_, dir)) => Some(dir),
        Err(pos) => {
            let vertical = Placement(pos, Direction::Vertical);
            if board.tile_exists(vertical.back().0) || board.tile_exists(vertical.next().0) {
                Some(Direction::Vertical)
            } else {
                Some(Direction::Horizontal)
            }
        },
    }
}

/// Find the word formed by the placements and the board tiles before, between and after them
///
/// The placements must be on free squares of the board.
pub fn extract(candidate: &[PlacementIntent], board: &Board) -> Result<ExtractedWord, ExtractionError> {
    let dir = word_direction(candidate, board).ok_or(ExtractionError::NotCollinear)?;

    // on a single line, the corners of the bounding box are the ends of the placements
    let first = candidate.iter().map(|p| p.position).min_by_key(|pos| pos[dir]);
    let last = candidate.iter().map(|p| p.position).max_by_key(|pos| pos[dir]);
    let (mut start, mut end) = match (first, last) {
        (Some(first), Some(last)) => (Placement(first, dir), Placement(last, dir)),
        _ => return Err(ExtractionError::NotCollinear),
    };

    // hook onto the words already on the board
    while board.tile_exists(start.back().0) {
        start = start.back();
    }
    while board.tile_exists(end.next().0) {
        end = end.next();
    }

    let mut cells = Vec::with_capacity(end.0[dir] - start.0[dir] + 1);
    let mut head = start;
    loop {
        let position = head.0;
        let cell = if let Some(letter) = board.letter_at(position) {
            ResolvedCell { position, letter, source: CellSource::Board }
        } else if let Some(p) = candidate.iter().find(|p| p.position == position) {
            ResolvedCell { position, letter: p.letter, source: CellSource::Placement }
        } else {
            return Err(ExtractionError::Hole(position))
        };
        cells.push(cell);

        if head == end {
            break
        }
        head = head.next();
    }

    let word = cells.iter().map(|c| c.letter.as_char()).collect();
    Ok(ExtractedWord {
        direction: dir,
        cells,
        word,
    })
}

#[cfg(test)]
use super::fixtures::{board, intents};

#[test]
fn hooks_on_both_ends() {
    let grid = board(15, 15, "C@B1, R@B3, S@B4");
    let word = extract(&intents("A@B2"), &grid).unwrap();
    assert_eq!(word.word, "CARS");
    assert_eq!(word.direction, Direction::Horizontal);
    assert_eq!(
        word.cells.iter().map(|c| (c.position.to_string(), c.source)).collect::<Vec<_>>(),
        vec![
            ("B1".to_owned(), CellSource::Board),
            ("B2".to_owned(), CellSource::Placement),
            ("B3".to_owned(), CellSource::Board),
            ("B4".to_owned(), CellSource::Board),
        ],
    );
}

#[test]
fn extends_prefix_and_suffix() {
    // P L A Y placed around an existing A, then S at the end
    let grid = board(15, 15, "L@D2, A@D3");
    let word = extract(&intents("Y@D4, P@D1, S@D5"), &grid).unwrap();
    assert_eq!(word.word, "PLAYS");

    let grid = board(15, 15, "W@B4, I@B5, N@B6");
    let word = extract(&intents("S@B7"), &grid).unwrap();
    assert_eq!(word.word, "WINS");
}

#[test]
fn vertical_placements() {
    let grid = board(15, 15, "A@D4");
    let word = extract(&intents("W@B4, A@C4, Y@E4"), &grid).unwrap();
    assert_eq!(word.direction, Direction::Vertical);
    assert_eq!(word.word, "WAAY");
    assert_eq!(word.cells.first().map(|c| c.position.to_string()), Some("B4".to_owned()));
}

#[test]
fn single_tile_direction() {
    // tile below: vertical
    let grid = board(15, 15, "A@C2, T@D2, E@D3");
    let word = extract(&intents("C@B2"), &grid).unwrap();
    assert_eq!(word.direction, Direction::Vertical);
    assert_eq!(word.word, "CAT");

    // tile above: vertical
    let grid = board(15, 15, "A@C2");
    let word = extract(&intents("S@D2"), &grid).unwrap();
    assert_eq!(word.word, "AS");

    // a single tile touching both a vertical and a horizontal word only reads the vertical one
    let grid = board(15, 15, "A@C2, T@D3, O@D4");
    let word = extract(&intents("N@D2"), &grid).unwrap();
    assert_eq!(word.direction, Direction::Vertical);
    assert_eq!(word.word, "AN");

    // nothing above or below: horizontal, even with no neighbour at all
    let grid = board(15, 15, "");
    let word = extract(&intents("A@H8"), &grid).unwrap();
    assert_eq!(word.direction, Direction::Horizontal);
    assert_eq!(word.word, "A");
}

#[test]
fn detects_holes() {
    let grid = board(15, 15, "");
    assert_eq!(
        extract(&intents("A@B1, T@B3"), &grid),
        Err(ExtractionError::Hole("B2".parse().unwrap())),
    );

    // the hole is the first empty square, after the board tiles
    let grid = board(15, 15, "C@A1, A@A2");
    assert_eq!(
        extract(&intents("T@A3, S@A6"), &grid),
        Err(ExtractionError::Hole("A4".parse().unwrap())),
    );

    // a board tile fills the gap between placements
    let grid = board(15, 15, "A@F3");
    assert_eq!(extract(&intents("T@F2, E@F4"), &grid).unwrap().word, "TAE");
}

#[test]
fn edges_of_the_board() {
    let grid = board(3, 3, "A@A1, B@A2");
    let word = extract(&intents("C@A3"), &grid).unwrap();
    assert_eq!(word.word, "ABC");

    let grid = board(3, 3, "B@B1, C@C1");
    let word = extract(&intents("A@A1"), &grid).unwrap();
    assert_eq!(word.direction, Direction::Vertical);
    assert_eq!(word.word, "ABC");
}

#[test]
fn rejects_scattered_placements() {
    let grid = board(15, 15, "");
    assert_eq!(extract(&intents("A@B1, T@C2"), &grid), Err(ExtractionError::NotCollinear));
    assert_eq!(extract(&[], &grid), Err(ExtractionError::NotCollinear));
}
