
pub mod word_finder;
pub mod score;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::{Board, Dictionary, Hand, Letter, ParseError, Placement, Position};

pub use word_finder::{extract, CellSource, ExtractedWord, ExtractionError, ResolvedCell};
pub use score::score;

/// A tile the player proposes to put on the board, written `A@B2`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlacementIntent {
    pub letter: Letter,
    pub position: Position,
}

impl PlacementIntent {
    pub fn new(letter: Letter, position: Position) -> Self {
        Self { letter, position }
    }
}

impl fmt::Display for PlacementIntent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.letter, self.position)
    }
}

impl FromStr for PlacementIntent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.splitn(2, '@');
        let letter = parts.next().unwrap_or_default();
        let position = parts.next().ok_or_else(|| ParseError::Tile(s.to_owned()))?;
        let mut chars = letter.chars();
        let letter = match (chars.next().and_then(Letter::from_char), chars.next()) {
            (Some(l), None) => l,
            _ => return Err(ParseError::Tile(s.to_owned())),
        };
        Ok(Self { letter, position: position.parse()? })
    }
}

/// Why a move is rejected, checks are done in the order of the variants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no tile placed")]
    NoPlacements,
    #[error("missing tile {0}")]
    MissingTile(Letter),
    #[error("position {0} already has a tile or is not on the board")]
    OccupiedOrOutOfBounds(Position),
    #[error("more than one tile placed at {0}")]
    DuplicatePosition(Position),
    #[error("board not empty and no tile placed next to an existing one")]
    NoAdjacency,
    #[error("placements not on the same row or column")]
    NotCollinear,
    #[error("a blank space exists on the board between tiles at {0}")]
    Hole(Position),
    #[error("'{0}' is not in the dictionary")]
    NotAWord(String),
}

impl From<ExtractionError> for ValidationError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Hole(pos) => ValidationError::Hole(pos),
            ExtractionError::NotCollinear => ValidationError::NotCollinear,
        }
    }
}

/// Check whether `candidate` is a legal move, and find the word it makes
///
/// Neither the board nor the hand is modified, applying the move is up to the caller.
pub fn validate(
    candidate: &[PlacementIntent],
    board: &Board,
    hand: &Hand,
    dictionary: &(impl Dictionary + ?Sized),
) -> Result<ExtractedWord, ValidationError> {
    let result = check_structure(candidate, board, hand)
        .and_then(|()| Ok(extract(candidate, board)?))
        .and_then(|word| if dictionary.contains_word(&word.word) {
            Ok(word)
        } else {
            Err(ValidationError::NotAWord(word.word))
        });

    match &result {
        Ok(word) => log::debug!("move {} makes {}", list(candidate), word.word),
        Err(err) => log::debug!("move {} rejected: {}", list(candidate), err),
    }
    result
}

/// The checks that only depend on the placements and the board around them
fn check_structure(candidate: &[PlacementIntent], board: &Board, hand: &Hand) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::NoPlacements)
    }

    // each duplicate letter needs its own tile
    hand.counts()
        .remove_all(candidate.iter().map(|p| p.letter))
        .map_err(ValidationError::MissingTile)?;

    let mut seen = HashSet::new();
    for p in candidate {
        if !board.is_valid_position(p.position) || board.tile_exists(p.position) {
            return Err(ValidationError::OccupiedOrOutOfBounds(p.position))
        }
        if !seen.insert(p.position) {
            return Err(ValidationError::DuplicatePosition(p.position))
        }
    }

    // the first move can go anywhere
    if !board.is_empty() && !candidate.iter().any(|p| board.tile_adjacent_to(p.position)) {
        return Err(ValidationError::NoAdjacency)
    }

    if Placement::find_alignment(candidate.iter().map(|p| p.position)).is_none() {
        return Err(ValidationError::NotCollinear)
    }

    Ok(())
}

fn list(candidate: &[PlacementIntent]) -> String {
    candidate.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::{Board, Hand, Tile};
    use super::PlacementIntent;

    /// `"C@B1, R@B3"`
    pub fn intents(s: &str) -> Vec<PlacementIntent> {
        s.split(',').filter(|p| !p.trim().is_empty()).map(|p| p.parse().unwrap()).collect()
    }

    pub fn board(rows: usize, cols: usize, tiles: &str) -> Board {
        Board::from_tiles(rows, cols, intents(tiles).into_iter().map(|p| (p.letter, p.position))).unwrap()
    }

    /// `"A-1, B-3"`
    pub fn hand(s: &str) -> Hand {
        Hand::from_tiles(s.split(',').map(|t| t.parse::<Tile>().unwrap()).collect())
    }

    pub fn dictionary(words: &[&str]) -> fst::Set<Vec<u8>> {
        crate::dictionary::from_words(words.iter()).unwrap()
    }
}

#[cfg(test)]
use fixtures::{board, dictionary, hand, intents};

#[cfg(test)]
fn pos(s: &str) -> Position {
    s.parse().unwrap()
}

#[test]
fn intent_notation() {
    let p: PlacementIntent = " A@B2".parse().unwrap();
    assert_eq!(p.position, Position::new(1, 1));
    assert_eq!(p.to_string(), "A@B2");
    assert!("AB@B2".parse::<PlacementIntent>().is_err());
    assert!("A-B2".parse::<PlacementIntent>().is_err());
    assert!("A@2".parse::<PlacementIntent>().is_err());
}

#[test]
fn completes_word_in_the_middle() {
    let board = board(15, 15, "C@B1, R@B3, S@B4");
    let hand = hand("A-1, Q-10");
    let dict = dictionary(&["cars"]);
    let word = validate(&intents("A@B2"), &board, &hand, &dict).unwrap();
    assert_eq!(word.word, "CARS");
    assert_eq!(word.cells.len(), 4);
}

#[test]
fn missing_tile() {
    let board = board(15, 15, "");
    let dict = dictionary(&["aa"]);
    assert_eq!(
        validate(&intents("A@A1, A@A2"), &board, &hand("A-1, B-3"), &dict),
        Err(ValidationError::MissingTile(Letter::from_char('A').unwrap())),
    );
    assert!(validate(&intents("A@A1, A@A2"), &board, &hand("A-1, A-1"), &dict).is_ok());
    assert_eq!(validate(&[], &board, &hand("A-1"), &dict), Err(ValidationError::NoPlacements));
}

#[test]
fn occupied_or_out_of_bounds() {
    let board = board(5, 5, "C@B1");
    let dict = dictionary(&["ca"]);
    let hand = hand("A-1, T-1");
    assert_eq!(
        validate(&intents("A@B1"), &board, &hand, &dict),
        Err(ValidationError::OccupiedOrOutOfBounds(pos("B1"))),
    );
    assert_eq!(
        validate(&intents("A@B6"), &board, &hand, &dict),
        Err(ValidationError::OccupiedOrOutOfBounds(pos("B6"))),
    );
    assert_eq!(
        validate(&intents("A@F1"), &board, &hand, &dict),
        Err(ValidationError::OccupiedOrOutOfBounds(pos("F1"))),
    );
    assert_eq!(
        validate(&intents("A@B2, T@B2"), &board, &hand, &dict),
        Err(ValidationError::DuplicatePosition(pos("B2"))),
    );
}

#[test]
fn first_move_anywhere() {
    let board = board(15, 15, "");
    let dict = dictionary(&["at"]);
    let word = validate(&intents("A@H8, T@H9"), &board, &hand("A-1, T-1"), &dict).unwrap();
    assert_eq!(word.word, "AT");
    let word = validate(&intents("A@O14, T@O15"), &board, &hand("A-1, T-1"), &dict).unwrap();
    assert_eq!(word.word, "AT");
}

#[test]
fn no_adjacency() {
    let board = board(15, 15, "C@B1");
    let dict = dictionary(&["at"]);
    assert_eq!(
        validate(&intents("A@H8, T@H9"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::NoAdjacency),
    );
    // diagonal does not count
    assert_eq!(
        validate(&intents("A@C2, T@C3"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::NoAdjacency),
    );
}

#[test]
fn not_collinear() {
    let board = board(15, 15, "");
    let dict = dictionary(&["at"]);
    assert_eq!(
        validate(&intents("A@B1, T@C2"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::NotCollinear),
    );
}

#[test]
fn hole() {
    let board = board(15, 15, "");
    let dict = dictionary(&["a_t"]);
    assert_eq!(
        validate(&intents("A@B1, T@B3"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::Hole(pos("B2"))),
    );
}

#[test]
fn not_a_word() {
    let board = board(15, 15, "C@B1, R@B3, S@B4");
    let dict = dictionary(&["car", "cat"]);
    assert_eq!(
        validate(&intents("A@B2"), &board, &hand("A-1"), &dict),
        Err(ValidationError::NotAWord("CARS".to_owned())),
    );
}

#[test]
fn checks_are_ordered() {
    // missing tile wins over everything else
    let board = board(15, 15, "C@B1");
    let dict = dictionary(&[]);
    assert_eq!(
        validate(&intents("Z@B1, A@J9"), &board, &hand("A-1"), &dict),
        Err(ValidationError::MissingTile(Letter::from_char('Z').unwrap())),
    );
    // occupancy before adjacency and alignment
    assert_eq!(
        validate(&intents("A@J9, T@B1"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::OccupiedOrOutOfBounds(pos("B1"))),
    );
    // adjacency before alignment
    assert_eq!(
        validate(&intents("A@J9, T@K10"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::NoAdjacency),
    );
    // alignment before holes
    assert_eq!(
        validate(&intents("A@B2, T@C5"), &board, &hand("A-1, T-1"), &dict),
        Err(ValidationError::NotCollinear),
    );
}

#[test]
fn nothing_changes_and_result_is_stable() {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    let board = board(6, 6, "C@B1, A@B2, T@B3, O@C2, X@E5");
    let hand = hand("A-1, T-1, S-1, E-1, O-1, N-1, T-1");
    let dict = dictionary(&["cats", "cat", "tao", "oat", "axe", "as", "at", "ton", "set"]);
    let letters: Vec<Letter> = hand.tiles().iter().map(|t| t.letter)
        .chain(Some(Letter::from_char('Q').unwrap()))
        .collect();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let n = rng.gen_range(0..4);
        let candidate = (0..n).map(|_| PlacementIntent::new(
            letters[rng.gen_range(0..letters.len())],
            Position::new(rng.gen_range(0..7), rng.gen_range(0..7)),
        )).collect::<Vec<_>>();

        let board_before = board.clone();
        let hand_before = hand.clone();
        let first = validate(&candidate, &board, &hand, &dict);
        let second = validate(&candidate, &board, &hand, &dict);
        assert_eq!(first, second);
        assert_eq!(board, board_before);
        assert_eq!(hand, hand_before);
    }

    let word = validate(&intents("S@B4"), &board, &hand, &dict).unwrap();
    assert_eq!(word.word, "CATS");
    assert_eq!(validate(&intents("S@B4"), &board, &hand, &dict), Ok(word));
}
