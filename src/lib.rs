
pub mod play;
pub mod score_rules;
pub mod dictionary;
pub mod hand;
pub mod bag;
pub mod state;
pub mod save;
pub mod action;
pub mod render;

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLS: usize = 15;

/// Rows are labelled by a single letter
pub const MAX_ROWS: usize = 26;
/// Columns are labelled by at most two digits
pub const MAX_COLS: usize = 99;

/// The number of tiles a hand is replenished to
pub const HAND_SIZE: usize = 7;

pub use score_rules::{LetterScoring, ScoreRules};
pub use dictionary::Dictionary;
pub use hand::Hand;
pub use bag::{TileBag, TileSupply};
pub use play::{PlacementIntent, ValidationError};
pub use state::GameState;

/// An uppercase letter, `A` to `Z`
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Only uppercase ascii letters are tile letters
    pub fn from_char(c: char) -> Option<Letter> {
        if c.is_ascii_uppercase() {
            Some(Letter(c as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// Position in the alphabet, `A` is 0
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: Letter,
    pub value: u32,
}

impl Tile {
    pub fn new(letter: Letter, value: u32) -> Self {
        Self { letter, value }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.letter, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed tile '{0}'")]
    Tile(String),
    #[error("malformed position '{0}'")]
    Position(String),
}

impl FromStr for Tile {
    type Err = ParseError;

    /// Accepts both `A-1` and `A 1`, surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Tile(s.to_owned());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(err)?;
        let rest = chars.as_str();
        let value = rest.trim_start_matches(|c| c == '-' || c == ' ');
        if value.len() == rest.len() {
            // no separator
            return Err(err())
        }
        let value = value.parse().map_err(|_| err())?;
        Ok(Tile { letter, value })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    Filled(Tile),
}

impl Square {
    pub fn tile(&self) -> Option<&Tile> {
        match self {
            Square::Filled(tile) => Some(tile),
            Square::Empty => None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn perp(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;
    /// The coordinate that changes in that direction
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Vertical => &self.row,
            Direction::Horizontal => &self.col,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    /// The coordinate that changes in that direction
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Vertical => &mut self.row,
            Direction::Horizontal => &mut self.col,
        }
    }
}

/// Row letter then one-based column number, `B3` is row 1, column 2
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.row < MAX_ROWS {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Position(s.to_owned());
        let mut chars = s.chars();
        let row = chars.next().and_then(Letter::from_char).ok_or_else(err)?.index();
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err())
        }
        let col: usize = digits.parse().map_err(|_| err())?;
        if col == 0 {
            return Err(err())
        }
        Ok(Position { row, col: col - 1 })
    }
}

/// A position and the direction in which to walk from it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Placement(pub Position, pub Direction);

impl Placement {
    pub fn next(mut self) -> Self {
        self.0[self.1] = self.0[self.1].saturating_add(1);
        self
    }

    /// Stepping back from 0 wraps around, which is never on a board
    pub fn back(mut self) -> Self {
        self.0[self.1] = self.0[self.1].wrapping_sub(1);
        self
    }

    /// Tries to find the first position on the line formed by the given `positions`
    ///
    /// None if `positions` is empty or if contains at least 2 positions that are not on the same row/column
    ///
    /// Some(Err(p)) if `positions` contains only `p`
    pub fn find_alignment(positions: impl IntoIterator<Item=Position>) -> Option<Result<Placement, Position>> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let second = loop {
            let tmp = iter.next();
            if tmp != Some(first) {
                break tmp
            }
        };
        let second = if let Some(s) = second { s } else { return Some(Err(first)) };
        let dir = if second.row == first.row {
            Direction::Horizontal
        } else if second.col == first.col {
            Direction::Vertical
        } else {
            return None
        };
        let mut start = first;
        start[dir] = start[dir].min(second[dir]);

        for new in iter {
            if new[dir.perp()] != start[dir.perp()] {
                return None
            } else {
                start[dir] = start[dir].min(new[dir])
            }
        }
        Some(Ok(Placement(start, dir)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    rows: usize,
    cols: usize,
    squares: Vec<Vec<T>>
}

impl<T> Table<T> {
    pub fn fill_with(rows: usize, cols: usize, el: T) -> Self where T: Clone {
        Self {
            rows,
            cols,
            squares: vec![vec![el; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.squares.get(pos.row)?.get(pos.col)
    }
    pub fn set(&mut self, pos: Position, val: T) {
        self.squares[pos.row][pos.col] = val
    }

    /// Every square with its position, row by row
    pub fn iter(&self) -> impl Iterator<Item=(Position, &T)> {
        self.squares.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().map(move |(col, el)| (Position { row, col }, el))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board size {rows}x{cols}, must be between 1x1 and 26x99")]
    InvalidSize { rows: usize, cols: usize },
    #[error("tile position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("two tiles at position {0}")]
    DuplicateTile(Position),
}

/// The grid of placed tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    table: Table<Square>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(BoardError::InvalidSize { rows, cols })
        }
        Ok(Self {
            table: Table::fill_with(rows, cols, Square::Empty),
        })
    }

    /// Rebuild a board from its occupied squares, in any order
    ///
    /// The tiles are given a value of 0, only their letter is kept
    pub fn from_tiles(
        rows: usize, cols: usize,
        tiles: impl IntoIterator<Item=(Letter, Position)>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;
        for (letter, pos) in tiles {
            if !board.is_valid_position(pos) {
                return Err(BoardError::OutOfBounds(pos))
            }
            if board.tile_exists(pos) {
                return Err(BoardError::DuplicateTile(pos))
            }
            board.place(Tile::new(letter, 0), pos);
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.table.rows()
    }
    pub fn cols(&self) -> usize {
        self.table.cols()
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    /// False for positions outside of the board
    pub fn tile_exists(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.table.get(pos)?.tile()
    }

    pub fn letter_at(&self, pos: Position) -> Option<Letter> {
        self.tile_at(pos).map(|tile| tile.letter)
    }

    /// Whether one of the four orthogonal neighbours holds a tile
    pub fn tile_adjacent_to(&self, pos: Position) -> bool {
        self.is_valid_position(pos) && [Direction::Vertical, Direction::Horizontal].iter().any(|&dir| {
            let place = Placement(pos, dir);
            self.tile_exists(place.back().0) || self.tile_exists(place.next().0)
        })
    }

    /// Put a tile on the board
    ///
    /// The position must be on the board and free, moves are validated before this is called
    pub fn place(&mut self, tile: Tile, pos: Position) {
        assert!(self.is_valid_position(pos), "placing a tile outside of the board at {}", pos);
        assert!(!self.tile_exists(pos), "placing a tile over another one at {}", pos);
        self.table.set(pos, Square::Filled(tile));
    }

    pub fn is_empty(&self) -> bool {
        self.table.iter().all(|(_, square)| *square == Square::Empty)
    }

    /// Only reachable on small boards
    pub fn is_full(&self) -> bool {
        self.table.iter().all(|(_, square)| *square != Square::Empty)
    }

    /// The letters on the board and their position, row by row
    pub fn occupied(&self) -> impl Iterator<Item=(Letter, Position)> + '_ {
        self.table.iter().filter_map(|(pos, square)| square.tile().map(|tile| (tile.letter, pos)))
    }
}

#[cfg(test)]
fn letter(c: char) -> Letter {
    Letter::from_char(c).unwrap()
}

#[test]
fn test_alignement() {
    let p1 = Position { row: 3, col: 4 };
    let p2 = Position { row: 4, col: 4 };
    let p3 = Position { row: 8, col: 4 };
    let p4 = Position { row: 3, col: 6 };

    assert_eq!(Placement::find_alignment(vec![]), None);
    assert_eq!(Placement::find_alignment(vec![p1]), Some(Err(p1)));
    assert_eq!(Placement::find_alignment(vec![p1, p1]), Some(Err(p1)));
    assert_eq!(
        Placement::find_alignment(vec![p2, p3, p1]),
        Some(Ok(Placement(p1, Direction::Vertical))),
    );
    assert_eq!(
        Placement::find_alignment(vec![p4, p1]),
        Some(Ok(Placement(p1, Direction::Horizontal))),
    );
    assert_eq!(Placement::find_alignment(vec![p2, p4]), None);
    assert_eq!(Placement::find_alignment(vec![p1, p2, p4]), None);
}

#[test]
fn test_position_notation() {
    assert_eq!("A1".parse(), Ok(Position { row: 0, col: 0 }));
    assert_eq!("Z41".parse(), Ok(Position { row: 25, col: 40 }));
    assert!("A0".parse::<Position>().is_err());
    assert!("a1".parse::<Position>().is_err());
    assert!("B".parse::<Position>().is_err());
    assert!("B1x".parse::<Position>().is_err());
    assert_eq!(Position { row: 1, col: 11 }.to_string(), "B12");
}

#[test]
fn test_tile_notation() {
    let a1 = Tile::new(letter('A'), 1);
    assert_eq!("A-1".parse(), Ok(a1));
    assert_eq!("  A 1 ".parse(), Ok(a1));
    assert_eq!(" E-5".parse(), Ok(Tile::new(letter('E'), 5)));
    assert!("A1".parse::<Tile>().is_err());
    assert!("a-1".parse::<Tile>().is_err());
    assert!("A-".parse::<Tile>().is_err());
    assert_eq!(a1.to_string(), "A-1");
}

#[test]
fn test_board_queries() {
    assert!(Board::new(0, 3).is_err());
    assert!(Board::new(27, 3).is_err());
    assert!(Board::new(26, 99).is_ok());

    let board = Board::from_tiles(2, 2, vec![(letter('A'), Position::new(0, 0))]).unwrap();
    assert!(board.tile_exists(Position::new(0, 0)));
    assert!(!board.tile_adjacent_to(Position::new(0, 0)));
    assert!(!board.tile_exists(Position::new(0, 1)));
    assert!(!board.tile_exists(Position::new(1, 0)));
    assert!(board.tile_adjacent_to(Position::new(0, 1)));
    assert!(board.tile_adjacent_to(Position::new(1, 0)));
    assert!(!board.tile_adjacent_to(Position::new(1, 1)));
    assert!(!board.tile_adjacent_to(Position::new(2, 0)));
    assert!(!board.tile_exists(Position::new(5, 5)));
    assert_eq!(board.tile_at(Position::new(0, 0)).map(|t| t.value), Some(0));
    assert!(!board.is_empty());
    assert!(!board.is_full());
}

#[test]
fn test_board_round_trip() {
    let tiles = vec![
        (letter('S'), Position::new(1, 3)),
        (letter('C'), Position::new(1, 0)),
        (letter('R'), Position::new(1, 2)),
    ];
    let board = Board::from_tiles(3, 4, tiles.clone()).unwrap();
    let mut back = board.occupied().collect::<Vec<_>>();
    back.sort_by_key(|(_, pos)| *pos);
    let mut expected = tiles;
    expected.sort_by_key(|(_, pos)| *pos);
    assert_eq!(back, expected);

    assert_eq!(
        Board::from_tiles(3, 4, vec![(letter('A'), Position::new(3, 0))]),
        Err(BoardError::OutOfBounds(Position::new(3, 0))),
    );
    assert_eq!(
        Board::from_tiles(3, 4, vec![(letter('A'), Position::new(0, 0)), (letter('B'), Position::new(0, 0))]),
        Err(BoardError::DuplicateTile(Position::new(0, 0))),
    );
}

#[test]
fn test_full_board() {
    let mut board = Board::new(1, 2).unwrap();
    assert!(board.is_empty());
    board.place(Tile::new(letter('A'), 1), Position::new(0, 0));
    board.place(Tile::new(letter('B'), 3), Position::new(0, 1));
    assert!(board.is_full());
}
