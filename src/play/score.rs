
use crate::{ScoreRules, Tile};

/// Whether placing `n_placed` tiles at once earns the extra bonus
pub fn is_bingo(n_placed: usize, rules: &ScoreRules) -> bool {
    n_placed == rules.bingo_size
}

/// The points earned by placing the given tiles from a hand
///
/// Only the placed tiles count, tiles already on the board that are part of the word don't.
pub fn score(placed: &[Tile], rules: &ScoreRules) -> u32 {
    let sum: u32 = placed.iter().map(|tile| tile.value).sum();
    if is_bingo(placed.len(), rules) {
        sum + rules.extra_bonus
    } else {
        sum
    }
}

#[cfg(test)]
fn tiles(s: &str) -> Vec<Tile> {
    s.split(',').map(|t| t.parse().unwrap()).collect()
}

#[test]
fn sums_values() {
    let rules = ScoreRules::default();
    assert_eq!(score(&[], &rules), 0);
    assert_eq!(score(&tiles("A-1"), &rules), 1);
    assert_eq!(score(&tiles("Q-10, A-1, T-1"), &rules), 12);
    assert_eq!(score(&tiles("A-1, B-3, C-3, D-2, E-1, F-4"), &rules), 14);
}

#[test]
fn bingo_bonus() {
    let rules = ScoreRules::default();
    assert_eq!(score(&tiles("A-1, B-3, C-3, D-2, E-1, F-4, G-2"), &rules), 16 + 50);

    let rules = ScoreRules { extra_bonus: 35, bingo_size: 2 };
    assert_eq!(score(&tiles("A-1, B-3"), &rules), 39);
    assert_eq!(score(&tiles("A-1"), &rules), 1);
}
