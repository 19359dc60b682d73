
use std::path::PathBuf;
use std::str::FromStr;

use super::play::{PlacementIntent, ValidationError};
use super::state::{ActionKind, GameState, PlayReport, ReplaceError};
use super::{Dictionary, Letter, ScoreRules};

pub const HELP: &str = "\
The following commands are available:

pass                          Skip your turn.
quit                          Quit the game.
save {name}                   Save the game, creating a save file with the given name.
replace {letter}              Replace a tile with one from the tile bag. The tile letter must be
                              capitalised.
place {letter} at {position}  Place one or more tiles onto the board. Positions have the format
                              {row}{column} where row is a capital letter referring to a board row,
                              and column is a number referring to a board column.
place done                    Finish placing tiles.
help                          Show this message.";

/// One line typed by a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(PlacementIntent),
    PlaceDone,
    Replace(Letter),
    Pass,
    Save(String),
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("not recognised as a valid command")]
    Unknown,
    #[error("expected '{0}'")]
    Usage(&'static str),
}

fn single_letter(word: &str) -> Option<Letter> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Letter::from_char(c),
        _ => None,
    }
}

/// Save names are restricted so that a save cannot be written outside the current directory
fn is_valid_save_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') && !name.starts_with('.')
}

impl FromStr for Command {
    type Err = CommandError;

    /// Keywords are case insensitive, tile letters and positions must be uppercase
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = line.split_whitespace().collect::<Vec<_>>();
        let keyword = match words.first() {
            Some(k) => k.to_lowercase(),
            None => return Err(CommandError::Unknown),
        };
        let args = &words[1..];

        match keyword.as_str() {
            "place" => match args {
                [done] if done.eq_ignore_ascii_case("done") => Ok(Command::PlaceDone),
                [letter, at, position] if at.eq_ignore_ascii_case("at") => {
                    let usage = CommandError::Usage("place {letter} at {position}");
                    let letter = single_letter(letter).ok_or_else(|| usage.clone())?;
                    let position = position.parse().map_err(|_| usage)?;
                    Ok(Command::Place(PlacementIntent::new(letter, position)))
                },
                _ => Err(CommandError::Usage("place {letter} at {position}")),
            },
            "replace" => match args {
                [letter] => single_letter(letter).map(Command::Replace).ok_or(CommandError::Usage("replace {letter}")),
                _ => Err(CommandError::Usage("replace {letter}")),
            },
            "save" => match args {
                [name] if is_valid_save_name(name) => Ok(Command::Save((*name).to_owned())),
                _ => Err(CommandError::Usage("save {name}")),
            },
            "pass" if args.is_empty() => Ok(Command::Pass),
            "quit" if args.is_empty() => Ok(Command::Quit),
            "help" if args.is_empty() => Ok(Command::Help),
            _ => Err(CommandError::Unknown),
        }
    }
}

/// Everything a player can do on their turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Place(Vec<PlacementIntent>),
    Replace(Letter),
    Pass,
    Save(PathBuf),
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(PlayReport),
    Rejected(ValidationError),
    Replaced(Letter),
    ReplaceFailed(ReplaceError),
    Passed,
    Saved(PathBuf),
    SaveFailed { path: PathBuf, reason: String },
    Help,
    Quit,
}

impl TurnOutcome {
    /// Whether the other player plays next
    pub fn ends_turn(&self) -> bool {
        match self {
            TurnOutcome::Played(_)
            | TurnOutcome::Replaced(_)
            | TurnOutcome::Passed
            | TurnOutcome::Quit => true,
            TurnOutcome::Rejected(_)
            | TurnOutcome::ReplaceFailed(_)
            | TurnOutcome::Saved(_)
            | TurnOutcome::SaveFailed { .. }
            | TurnOutcome::Help => false,
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Place(_) => ActionKind::Place,
            Action::Replace(_) => ActionKind::Replace,
            Action::Pass => ActionKind::Pass,
            Action::Save(_) => ActionKind::Save,
            Action::Quit => ActionKind::Quit,
            Action::Help => ActionKind::Help,
        }
    }

    /// Perform the action for the current player, and record it as their last action
    ///
    /// The turn is not handed over, see `TurnOutcome::ends_turn`.
    pub fn attempt(
        self,
        state: &mut GameState,
        dictionary: &(impl Dictionary + ?Sized),
        rules: &ScoreRules,
    ) -> TurnOutcome {
        let kind = self.kind();
        let outcome = match self {
            Action::Place(candidate) => match state.play(&candidate, dictionary, rules) {
                Ok(report) => TurnOutcome::Played(report),
                Err(err) => TurnOutcome::Rejected(err),
            },
            Action::Replace(letter) => match state.replace(letter) {
                Ok(()) => TurnOutcome::Replaced(letter),
                Err(err) => TurnOutcome::ReplaceFailed(err),
            },
            Action::Pass => {
                state.pass();
                TurnOutcome::Passed
            },
            Action::Save(path) => match state.save_to_path(&path) {
                Ok(()) => TurnOutcome::Saved(path),
                Err(err) => {
                    log::warn!("failed to save to {}: {}", path.display(), err);
                    TurnOutcome::SaveFailed { path, reason: err.to_string() }
                },
            },
            Action::Quit => {
                state.quit();
                TurnOutcome::Quit
            },
            Action::Help => TurnOutcome::Help,
        };
        state.record_action(kind);
        outcome
    }
}

#[cfg(test)]
use super::play::fixtures::{board, dictionary, hand, intents};
#[cfg(test)]
use super::state::Player;
#[cfg(test)]
use super::TileBag;

#[test]
fn parse_commands() {
    let parse = |s: &str| s.parse::<Command>();
    assert_eq!(parse("place A at B2"), Ok(Command::Place(intents("A@B2")[0])));
    assert_eq!(parse("PLACE  Q  At  O15  "), Ok(Command::Place(intents("Q@O15")[0])));
    assert_eq!(parse("place done"), Ok(Command::PlaceDone));
    assert_eq!(parse("Place DONE "), Ok(Command::PlaceDone));
    assert_eq!(parse("replace Z"), Ok(Command::Replace(Letter::from_char('Z').unwrap())));
    assert_eq!(parse("pass"), Ok(Command::Pass));
    assert_eq!(parse("QUIT"), Ok(Command::Quit));
    assert_eq!(parse("help"), Ok(Command::Help));
    assert_eq!(parse("save game1.sav"), Ok(Command::Save("game1.sav".to_owned())));

    assert_eq!(parse(""), Err(CommandError::Unknown));
    assert_eq!(parse("jump"), Err(CommandError::Unknown));
    assert_eq!(parse("pass now"), Err(CommandError::Unknown));
    assert_eq!(parse("place a at B2"), Err(CommandError::Usage("place {letter} at {position}")));
    assert_eq!(parse("place A at b2"), Err(CommandError::Usage("place {letter} at {position}")));
    assert_eq!(parse("place A on B2"), Err(CommandError::Usage("place {letter} at {position}")));
    assert_eq!(parse("replace AB"), Err(CommandError::Usage("replace {letter}")));
    assert_eq!(parse("save ../etc"), Err(CommandError::Usage("save {name}")));
    assert_eq!(parse("save"), Err(CommandError::Usage("save {name}")));
}

#[cfg(test)]
fn game() -> GameState {
    GameState::new(
        [
            Player::new("Alice", 0, hand("C-3, A-1, T-1, Q-10")).unwrap(),
            Player::new("Bob", 0, hand("Z-10")).unwrap(),
        ],
        board(15, 15, ""),
        TileBag::from_tile_list("E-1\nS-1").unwrap(),
        0,
    ).unwrap()
}

#[test]
fn place_outcomes() {
    let dict = dictionary(&["cat"]);
    let rules = ScoreRules::default();
    let mut state = game();

    let outcome = Action::Place(intents("C@H8, T@H9")).attempt(&mut state, &dict, &rules);
    assert_eq!(outcome, TurnOutcome::Rejected(ValidationError::NotAWord("CT".to_owned())));
    assert!(!outcome.ends_turn());
    assert_eq!(state.current_player().last_action(), Some(ActionKind::Place));

    let outcome = Action::Place(intents("C@H8, A@H9, T@H10")).attempt(&mut state, &dict, &rules);
    assert!(outcome.ends_turn());
    match outcome {
        TurnOutcome::Played(report) => assert_eq!(report.points, 5),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn other_outcomes() {
    let dict = dictionary(&[]);
    let rules = ScoreRules::default();
    let mut state = game();
    let x = Letter::from_char('X').unwrap();
    let q = Letter::from_char('Q').unwrap();

    assert_eq!(Action::Help.attempt(&mut state, &dict, &rules), TurnOutcome::Help);
    assert_eq!(
        Action::Replace(x).attempt(&mut state, &dict, &rules),
        TurnOutcome::ReplaceFailed(ReplaceError::MissingTile(x)),
    );
    assert_eq!(Action::Replace(q).attempt(&mut state, &dict, &rules), TurnOutcome::Replaced(q));
    assert_eq!(state.current_player().last_action(), Some(ActionKind::Replace));

    assert!(Action::Pass.attempt(&mut state, &dict, &rules).ends_turn());
    assert!(!state.did_quit());

    let outcome = Action::Quit.attempt(&mut state, &dict, &rules);
    assert!(outcome.ends_turn());
    assert!(state.is_game_over());
}

#[test]
fn save_outcome() {
    let dict = dictionary(&[]);
    let rules = ScoreRules::default();
    let mut state = game();
    let path = std::env::temp_dir().join(format!("scrabble-duel-action-{}.sav", std::process::id()));

    let outcome = Action::Save(path.clone()).attempt(&mut state, &dict, &rules);
    assert_eq!(outcome, TurnOutcome::Saved(path.clone()));
    assert!(!outcome.ends_turn());
    assert_eq!(GameState::load_from_path(&path).unwrap().to_save_string(), state.to_save_string());
    std::fs::remove_file(&path).unwrap();

    let missing_dir = std::env::temp_dir().join("scrabble-duel-no-such-dir").join("game.sav");
    match Action::Save(missing_dir).attempt(&mut state, &dict, &rules) {
        TurnOutcome::SaveFailed { .. } => {},
        other => panic!("unexpected {:?}", other),
    }
}
