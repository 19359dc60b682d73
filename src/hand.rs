
use std::fmt;

use super::{Letter, Tile, TileSupply, HAND_SIZE};

/// How many tiles of each letter are available
#[derive(Clone, PartialEq, Eq)]
pub struct LetterCounts {
    letters: [u8; 26],
    /// The total number of remaining tiles
    n_total: u32,
}

impl LetterCounts {
    pub fn empty() -> Self {
        Self { letters: [0; 26], n_total: 0 }
    }

    pub fn count(&self, letter: Letter) -> u8 {
        self.letters[letter.index()]
    }

    pub fn total(&self) -> u32 {
        self.n_total
    }

    /// The counts with one less `letter`, None if there is none left
    pub fn remove(&self, letter: Letter) -> Option<LetterCounts> {
        if self.letters[letter.index()] > 0 {
            let mut tmp = self.clone();
            tmp.letters[letter.index()] -= 1;
            tmp.n_total -= 1;
            Some(tmp)
        } else {
            None
        }
    }

    /// Remove every letter in turn, so each duplicate consumes its own tile
    ///
    /// Err with the first letter that is not available
    pub fn remove_all(&self, letters: impl IntoIterator<Item=Letter>) -> Result<LetterCounts, Letter> {
        letters.into_iter().try_fold(self.clone(), |counts, letter| counts.remove(letter).ok_or(letter))
    }
}

impl std::iter::FromIterator<Letter> for LetterCounts {
    fn from_iter<T>(iter: T) -> Self where T: IntoIterator<Item=Letter> {
        let mut tmp = Self::empty();
        for letter in iter {
            tmp.letters[letter.index()] = tmp.letters[letter.index()].saturating_add(1);
            tmp.n_total += 1;
        }
        tmp
    }
}

impl fmt::Debug for LetterCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, &n) in self.letters.iter().enumerate() {
            for _ in 0..n {
                write!(f, "{}", (b'A' + i as u8) as char)?;
            }
        }
        write!(f, "[{} letters]", self.n_total)
    }
}

/// The tiles held by a player, in the order they were drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn counts(&self) -> LetterCounts {
        self.tiles.iter().map(|tile| tile.letter).collect()
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile)
    }

    /// Take the first tile with that letter
    pub fn remove(&mut self, letter: Letter) -> Option<Tile> {
        let i = self.tiles.iter().position(|tile| tile.letter == letter)?;
        Some(self.tiles.remove(i))
    }

    /// Take one tile per letter, in the order of `letters`
    ///
    /// Nothing is removed if a letter is missing, the error is the first missing letter
    pub fn remove_all(&mut self, letters: &[Letter]) -> Result<Vec<Tile>, Letter> {
        self.counts().remove_all(letters.iter().copied())?;
        Ok(letters.iter().filter_map(|&letter| self.remove(letter)).collect())
    }

    /// Draw until the hand is full or the supply is exhausted, returns the number of tiles drawn
    pub fn draw_from(&mut self, supply: &mut impl TileSupply) -> usize {
        let mut drawn = 0;
        while self.tiles.len() < HAND_SIZE {
            match supply.take_one() {
                Some(tile) => self.tiles.push(tile),
                None => break,
            }
            drawn += 1;
        }
        drawn
    }
}

#[cfg(test)]
fn tiles(s: &str) -> Vec<Tile> {
    s.split(',').map(|t| t.parse().unwrap()).collect()
}

#[cfg(test)]
fn letters(s: &str) -> Vec<Letter> {
    s.chars().map(|c| Letter::from_char(c).unwrap()).collect()
}

#[test]
fn counts_with_duplicates() {
    let hand = Hand::from_tiles(tiles("A-1, B-3, A-1, C-3"));
    let counts = hand.counts();
    assert_eq!(counts.total(), 4);
    assert_eq!(counts.count(letters("A")[0]), 2);
    assert_eq!(format!("{:?}", counts), "AABC[4 letters]");

    assert!(counts.remove_all(letters("AA")).is_ok());
    assert_eq!(counts.remove_all(letters("AAA")), Err(letters("A")[0]));
    assert_eq!(counts.remove_all(letters("BD")), Err(letters("D")[0]));
    // the snapshot itself is untouched
    assert_eq!(counts, hand.counts());
}

#[test]
fn remove_all_is_atomic() {
    let mut hand = Hand::from_tiles(tiles("A-1, B-3, E-1"));
    let before = hand.clone();
    assert_eq!(hand.remove_all(&letters("AEZ")), Err(letters("Z")[0]));
    assert_eq!(hand, before);
    assert_eq!(hand.remove_all(&letters("EA")), Ok(tiles("E-1, A-1")));
    assert_eq!(hand.tiles(), &tiles("B-3")[..]);
}

#[test]
fn remove_first_matching() {
    let mut hand = Hand::from_tiles(tiles("A-1, B-3, A-2"));
    assert_eq!(hand.remove(letters("A")[0]), Some(tiles("A-1")[0]));
    assert_eq!(hand.remove(letters("A")[0]), Some(tiles("A-2")[0]));
    assert_eq!(hand.remove(letters("A")[0]), None);
    assert_eq!(hand.len(), 1);
}

#[test]
fn draw_up_to_seven() {
    let mut bag = crate::TileBag::from_tiles(tiles("A-1, B-3, C-3, D-2, E-1, F-4, G-2, H-4, I-1"));
    let mut hand = Hand::from_tiles(tiles("Z-10, Y-4"));
    assert_eq!(hand.draw_from(&mut bag), 5);
    assert_eq!(hand.len(), 7);
    assert_eq!(bag.len(), 4);
    assert_eq!(hand.draw_from(&mut bag), 0);

    let mut small = crate::TileBag::from_tiles(tiles("A-1"));
    let mut hand = Hand::new();
    assert_eq!(hand.draw_from(&mut small), 1);
    assert_eq!(hand.len(), 1);
    assert!(small.is_empty());
}
