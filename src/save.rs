//! Text format of a saved game
//!
//! One item per line:
//!
//! ```text
//! Alice                  name of the first player
//! 12                     score
//! A-1, B-3               hand
//! Bob                    same for the second player
//! 7
//! Q-10
//! 15, 15, C@B1, A@B2     rows, columns and the tiles on the board
//! E-1, K-5               the bag, in drawing order
//! Alice                  whose turn it is
//! ```

use std::path::{Path, PathBuf};

use super::play::PlacementIntent;
use super::state::{GameState, Player, StateError};
use super::{Board, BoardError, Hand, ParseError, Tile, TileBag};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read save file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing {0}")]
    MissingLine(&'static str),
    #[error("invalid score '{0}'")]
    InvalidScore(String),
    #[error("invalid board size '{0}'")]
    InvalidBoardSize(String),
    #[error("no player named '{0}'")]
    UnknownPlayer(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    State(#[from] StateError),
}

fn tile_list<'a>(tiles: impl Iterator<Item=&'a Tile>) -> String {
    tiles.map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}

fn parse_tile_list(line: &str) -> Result<Vec<Tile>, ParseError> {
    if line.trim().is_empty() {
        return Ok(vec![])
    }
    line.split(',').map(str::parse::<Tile>).collect()
}

fn parse_board(line: &str) -> Result<Board, LoadError> {
    let mut items = line.split(',');
    let mut dimension = || -> Result<usize, LoadError> {
        let item = items.next().ok_or(LoadError::MissingLine("board size"))?;
        item.trim().parse().map_err(|_| LoadError::InvalidBoardSize(item.to_owned()))
    };
    let rows = dimension()?;
    let cols = dimension()?;
    let tiles = items
        .map(|item| item.parse::<PlacementIntent>().map(|p| (p.letter, p.position)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::from_tiles(rows, cols, tiles)?)
}

fn parse_player<'a>(lines: &mut impl Iterator<Item=&'a str>) -> Result<Player, LoadError> {
    let name = lines.next().ok_or(LoadError::MissingLine("player name"))?;
    let score = lines.next().ok_or(LoadError::MissingLine("player score"))?;
    let score = score.trim().parse().map_err(|_| LoadError::InvalidScore(score.to_owned()))?;
    let hand = parse_tile_list(lines.next().ok_or(LoadError::MissingLine("player hand"))?)?;
    Ok(Player::new(name.trim(), score, Hand::from_tiles(hand))?)
}

impl GameState {
    pub fn to_save_string(&self) -> String {
        let mut lines = vec![];
        for player in self.players() {
            lines.push(player.name().to_owned());
            lines.push(player.score().to_string());
            lines.push(tile_list(player.hand().tiles().iter()));
        }

        let board = self.board();
        let mut board_line = format!("{}, {}", board.rows(), board.cols());
        for (letter, position) in board.occupied() {
            board_line.push_str(&format!(", {}", PlacementIntent::new(letter, position)));
        }
        lines.push(board_line);

        lines.push(tile_list(self.bag().tiles()));
        lines.push(self.current_player().name().to_owned());
        lines.join("\n")
    }

    pub fn from_save_str(save: &str) -> Result<Self, LoadError> {
        let mut lines = save.lines();
        let first = parse_player(&mut lines)?;
        let second = parse_player(&mut lines)?;
        let board = parse_board(lines.next().ok_or(LoadError::MissingLine("board"))?)?;
        let bag = TileBag::from_tiles(parse_tile_list(lines.next().ok_or(LoadError::MissingLine("tile bag"))?)?);

        let current = lines.next().ok_or(LoadError::MissingLine("current player"))?.trim();
        let current = if current == first.name() {
            0
        } else if current == second.name() {
            1
        } else {
            return Err(LoadError::UnknownPlayer(current.to_owned()))
        };

        Ok(GameState::new([first, second], board, bag, current)?)
    }

    pub fn save_to_path(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_save_string())?;
        log::info!("game saved to {}", path.display());
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, LoadError> {
        let save = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let state = Self::from_save_str(&save)?;
        log::info!("game loaded from {}", path.display());
        Ok(state)
    }
}

#[cfg(test)]
const SAVE: &str = "\
Alice
12
A-1, B-3
Bob
7

4, 5, C@B1, A@B2, T@D5
E-1, K-5
Bob";

#[test]
fn round_trip() {
    let state = GameState::from_save_str(SAVE).unwrap();
    assert_eq!(state.players()[0].score(), 12);
    assert_eq!(state.players()[0].hand().len(), 2);
    assert!(state.players()[1].hand().is_empty());
    assert_eq!(state.board().rows(), 4);
    assert_eq!(state.board().cols(), 5);
    assert_eq!(state.board().letter_at("D5".parse().unwrap()).map(|l| l.as_char()), Some('T'));
    assert_eq!(state.bag().len(), 2);
    assert_eq!(state.current_index(), 1);
    assert_eq!(state.to_save_string(), SAVE);
    assert_eq!(GameState::from_save_str(&state.to_save_string()).unwrap(), state);
}

#[test]
fn lenient_spacing() {
    let save = "ABC\n14\nA-1,B 2 ,  C-3\nDEF\n0\n\n2,2,A@A1\n\nDEF\n";
    let state = GameState::from_save_str(save).unwrap();
    assert_eq!(state.players()[0].hand().tiles().iter().map(|t| t.to_string()).collect::<Vec<_>>(), vec!["A-1", "B-2", "C-3"]);
    assert!(state.bag().is_empty());
    assert!(state.board().tile_exists("A1".parse().unwrap()));
}

#[test]
fn malformed_saves() {
    let replace = |from: &str, to: &str| GameState::from_save_str(&SAVE.replace(from, to));

    assert!(matches!(replace("\n12\n", "\ntwelve\n"), Err(LoadError::InvalidScore(_))));
    assert!(matches!(replace("Alice\n12", "Al1ce\n12"), Err(LoadError::State(StateError::InvalidName(_)))));
    assert!(matches!(replace("\nBob", "\nAlice"), Err(LoadError::State(StateError::SameNames(_)))));
    let crowded = format!("\n{}\n", vec!["A-1"; 300].join(", "));
    assert!(matches!(
        replace("\nA-1, B-3\n", &crowded),
        Err(LoadError::State(StateError::HandTooLarge { n_tiles: 300, .. })),
    ));
    assert!(matches!(replace("4, 5,", "x, 5,"), Err(LoadError::InvalidBoardSize(_))));
    assert!(matches!(replace("4, 5,", "40, 5,"), Err(LoadError::Board(BoardError::InvalidSize { .. }))));
    assert!(matches!(replace("T@D5", "T@E5"), Err(LoadError::Board(BoardError::OutOfBounds(_)))));
    assert!(matches!(replace("T@D5", "T#D5"), Err(LoadError::Parse(_))));
    assert!(matches!(replace("E-1, K-5", "E-1, K"), Err(LoadError::Parse(ParseError::Tile(_)))));
    assert!(matches!(replace("K-5\nBob", "K-5\nCarol"), Err(LoadError::UnknownPlayer(_))));
    assert!(matches!(GameState::from_save_str("Alice\n12\n"), Err(LoadError::MissingLine("player hand"))));
}

#[test]
fn save_and_load_file() {
    let path = std::env::temp_dir().join(format!("scrabble-duel-save-{}.txt", std::process::id()));
    let state = GameState::from_save_str(SAVE).unwrap();
    state.save_to_path(&path).unwrap();
    assert_eq!(GameState::load_from_path(&path).unwrap(), state);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(GameState::load_from_path(&path), Err(LoadError::Io { .. })));
}
