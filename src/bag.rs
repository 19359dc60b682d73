
use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{ParseError, Tile};
use super::score_rules::{english_distribution, LetterScoring};

/// Where hands are replenished from
pub trait TileSupply {
    fn take_one(&mut self) -> Option<Tile>;
    /// Return a tile, it will be drawn after all the others
    fn put_back(&mut self, tile: Tile);
    fn remaining(&self) -> usize;
}

/// The shared bag of undrawn tiles, drawn from the front
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileBag {
    tiles: VecDeque<Tile>,
}

impl TileBag {
    pub fn from_tiles(tiles: impl IntoIterator<Item=Tile>) -> Self {
        Self { tiles: tiles.into_iter().collect() }
    }

    /// One tile per letter occurrence of the English set, valued by `scoring`
    pub fn standard(scoring: &impl LetterScoring) -> Self {
        Self::from_tiles(english_distribution().flat_map(|(letter, n)| {
            std::iter::repeat(Tile::new(letter, scoring.score_for(letter))).take(n)
        }))
    }

    /// One tile per line, as `A-1` or `A 1`, blank lines are skipped
    pub fn from_tile_list(list: &str) -> Result<Self, ParseError> {
        let tiles = list.lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::parse::<Tile>)
            .collect::<Result<VecDeque<Tile>, _>>()?;
        Ok(Self { tiles })
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.tiles.make_contiguous().shuffle(rng);
    }

    pub fn tiles(&self) -> impl Iterator<Item=&Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileSupply for TileBag {
    fn take_one(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }
    fn put_back(&mut self, tile: Tile) {
        self.tiles.push_back(tile)
    }
    fn remaining(&self) -> usize {
        self.len()
    }
}

#[test]
fn tile_list() {
    let bag = TileBag::from_tile_list("A-1\nB 3\n\n  C-3 \n").unwrap();
    assert_eq!(bag.tiles().map(|t| t.to_string()).collect::<Vec<_>>(), vec!["A-1", "B-3", "C-3"]);
    assert_eq!(
        TileBag::from_tile_list("A-1\nwat\n"),
        Err(ParseError::Tile("wat".to_owned())),
    );
}

#[test]
fn fifo_order() {
    let mut bag = TileBag::from_tile_list("A-1\nB-3").unwrap();
    let a = bag.take_one().unwrap();
    bag.put_back(a);
    assert_eq!(bag.take_one().map(|t| t.to_string()), Some("B-3".to_owned()));
    assert_eq!(bag.take_one(), Some(a));
    assert_eq!(bag.take_one(), None);
    assert_eq!(bag.remaining(), 0);
}

#[test]
fn seeded_shuffle_is_reproducible() {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use super::score_rules::EnglishScrabbleScoring;

    let standard = TileBag::standard(&EnglishScrabbleScoring);
    assert_eq!(standard.len(), 98);

    let mut first = standard.clone();
    first.shuffle(&mut StdRng::seed_from_u64(42));
    let mut second = standard.clone();
    second.shuffle(&mut StdRng::seed_from_u64(42));
    assert_eq!(first, second);
    assert_ne!(first, standard);

    let mut sorted = first.tiles().map(|t| t.to_string()).collect::<Vec<_>>();
    sorted.sort();
    let mut expected = standard.tiles().map(|t| t.to_string()).collect::<Vec<_>>();
    expected.sort();
    assert_eq!(sorted, expected);
}
