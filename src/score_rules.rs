
use super::{Letter, HAND_SIZE};

/// Rules that influence the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    /// The amount of bonus points in case of bingo/scrabble (aka all the tiles of a full hand are played)
    pub extra_bonus: u32,
    /// How many tiles have to be placed in one move to get the extra bonus
    pub bingo_size: usize,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            extra_bonus: 50,
            bingo_size: HAND_SIZE,
        }
    }
}

/// The value given to a tile when a bag is built
pub trait LetterScoring {
    fn score_for(&self, letter: Letter) -> u32;
}

pub struct EnglishScrabbleScoring;
impl LetterScoring for EnglishScrabbleScoring {
    fn score_for(&self, letter: Letter) -> u32 {
        match letter.as_char() {
            'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
            'D' | 'G' => 2,
            'B' | 'C' | 'M' | 'P' => 3,
            'F' | 'H' | 'V' | 'W' | 'Y' => 4,
            'K' => 5,
            'J' | 'X' => 8,
            'Q' | 'Z' => 10,
            l => {
                log::warn!("unrecognized letter for score {}", l);
                0
            },
        }
    }
}

/// Number of tiles of each letter in an English set, blanks excluded
pub fn english_distribution() -> impl Iterator<Item=(Letter, usize)> {
    const COUNTS: [usize; 26] = [
        9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2,
        6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
    ];
    (b'A'..=b'Z').zip(COUNTS.iter()).filter_map(|(l, &n)| {
        Letter::from_char(l as char).map(|letter| (letter, n))
    })
}

#[test]
fn english_values() {
    let scoring = EnglishScrabbleScoring;
    let value = |c| scoring.score_for(Letter::from_char(c).unwrap());
    assert_eq!(value('A'), 1);
    assert_eq!(value('C'), 3);
    assert_eq!(value('K'), 5);
    assert_eq!(value('Z'), 10);
    let total: u32 = english_distribution().map(|(l, n)| scoring.score_for(l) * n as u32).sum();
    assert_eq!(total, 187);
}

#[test]
fn english_tile_count() {
    assert_eq!(english_distribution().count(), 26);
    assert_eq!(english_distribution().map(|(_, n)| n).sum::<usize>(), 98);
}
