
use std::convert::TryInto;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use structopt::StructOpt;

use scrabble_duel::action::{Action, Command, CommandError, TurnOutcome, HELP};
use scrabble_duel::dictionary::load_dictionary;
use scrabble_duel::render;
use scrabble_duel::score_rules::EnglishScrabbleScoring;
use scrabble_duel::state::Player;
use scrabble_duel::{Board, Dictionary, GameState, PlacementIntent, ScoreRules, TileBag};

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// The dictionary of words that are allowed to be played.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    dictionary: PathBuf,

    /// The tiles of a new game, one `A-1` per line. Not present means the standard english tiles
    tile_list: Option<PathBuf>,

    #[serde(default = "default_rows")]
    rows: usize,

    #[serde(default = "default_cols")]
    cols: usize,

    /// Not present means a seed is derived from the clock
    seed: Option<u64>,

    #[serde(default = "yes")]
    colour: bool,
}

fn default_rows() -> usize { scrabble_duel::DEFAULT_ROWS }
fn default_cols() -> usize { scrabble_duel::DEFAULT_COLS }
fn yes() -> bool { true }

#[derive(Debug, StructOpt)]
#[structopt(name = "scrabble", about = "Play scrabble against a friend on the same terminal")]
struct Opt {
    /// The config file, any format supported by `config`. Settings can also be given as
    /// `SCRABBLE_` environment variables
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The dictionary of words that are allowed to be played.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// The tiles in the bag of a new game, one tile per line such as `A-1`
    #[structopt(short = "t", long = "tile-list")]
    tile_list: Option<String>,

    /// Number of rows of the board of a new game, at most 26
    #[structopt(long = "rows")]
    rows: Option<usize>,

    /// Number of columns of the board of a new game, at most 99
    #[structopt(long = "cols")]
    cols: Option<usize>,

    /// The seed used to shuffle the tile bag of a new game, at most 9223372036854775807
    #[structopt(short = "s", long = "seed")]
    seed: Option<u64>,

    /// Draw the board without colours
    #[structopt(long = "no-colour")]
    no_colour: bool,
}

fn load_config(opt: Opt) -> Result<Settings, config::ConfigError> {
    let mut s = config::Config::new();

    if let Some(f) = opt.config {
        s.merge(config::File::with_name(&f))?;
    }

    s.merge(config::Environment::with_prefix("SCRABBLE"))?;

    let too_large = |key: &str| config::ConfigError::Message(format!("{} is too large", key));
    if let Some(d) = opt.dict {
        s.set("dictionary", d)?;
    }
    if let Some(t) = opt.tile_list {
        s.set("tile_list", t)?;
    }
    if let Some(rows) = opt.rows {
        s.set::<i64>("rows", rows.try_into().map_err(|_| too_large("rows"))?)?;
    }
    if let Some(cols) = opt.cols {
        s.set::<i64>("cols", cols.try_into().map_err(|_| too_large("cols"))?)?;
    }
    if let Some(seed) = opt.seed {
        s.set::<i64>("seed", seed.try_into().map_err(|_| too_large("seed"))?)?;
    }
    if opt.no_colour {
        s.set("colour", false)?;
    }

    s.try_into()
}

/// Lines typed by the players, None once stdin is closed
struct Input<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> Input<R> {
    fn prompt(&mut self) -> Option<String> {
        print!("> ");
        let _ = io::stdout().flush();
        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(err) => {
                log::warn!("cannot read input: {}", err);
                None
            },
        }
    }
}

struct Session<D> {
    dictionary: D,
    rules: ScoreRules,
    /// The unshuffled bag every new game starts from
    bag: TileBag,
    settings: Settings,
}

fn load_bag(tile_list: Option<&Path>) -> TileBag {
    match tile_list {
        Some(path) => {
            let list = std::fs::read_to_string(path).expect("reading the tile list");
            TileBag::from_tile_list(&list).expect("parsing the tile list")
        },
        None => TileBag::standard(&EnglishScrabbleScoring),
    }
}

impl<D: Dictionary> Session<D> {
    fn new_game(&self, input: &mut Input<impl BufRead>) -> Option<GameState> {
        let board = Board::new(self.settings.rows, self.settings.cols).expect("board size");
        let seed = self.settings.seed.unwrap_or_else(|| {
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or_default()
        });

        println!("Starting a New Game");
        println!();
        loop {
            let first = prompt_name(1, input)?;
            let second = prompt_name(2, input)?;
            match GameState::new_game([first.as_str(), second.as_str()], board.clone(), self.bag.clone(), seed) {
                Ok(state) => {
                    println!("Let's Play!");
                    println!();
                    return Some(state)
                },
                Err(err) => {
                    println!("{}", err);
                    println!();
                },
            }
        }
    }

    /// Some(None) if the file could not be loaded
    fn load_game(&self, input: &mut Input<impl BufRead>) -> Option<Option<GameState>> {
        println!("Enter the filename from which to load a game");
        println!();
        let file = input.prompt()?;
        match GameState::load_from_path(Path::new(file.trim())) {
            Ok(state) => {
                println!("Scrabble game successfully loaded");
                println!();
                Some(Some(state))
            },
            Err(err) => {
                println!("Failed to load save file ({})", err);
                Some(None)
            },
        }
    }

    /// Returns None if stdin was closed before the end of the game
    fn run_game(&self, mut state: GameState, input: &mut Input<impl BufRead>) -> Option<()> {
        while !state.is_game_over() {
            let player = state.current_player();
            println!("{}, it's your turn", player.name());
            for p in state.players() {
                println!("Score for {}: {}", p.name(), p.score());
            }
            println!("{}", render::draw_board(state.board(), self.settings.colour));
            println!();
            println!("Your hand is");
            println!("{}", render::hand_string(player.hand()));
            println!();

            self.run_turn(&mut state, input)?;
        }

        println!("Game over");
        for p in state.players() {
            println!("Score for {}: {}", p.name(), p.score());
        }
        match state.winner() {
            Some(i) => println!("Player {} won!", state.players()[i].name()),
            None => println!("The game is a draw!"),
        }
        println!();
        Some(())
    }

    fn run_turn(&self, state: &mut GameState, input: &mut Input<impl BufRead>) -> Option<()> {
        loop {
            let line = input.prompt()?;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Unknown) => {
                    println!("Invalid Input: Not recognised as a valid command.");
                    println!("Use command 'help' for a list of available commands.");
                    continue
                },
                Err(err) => {
                    println!("Invalid Input: {}", err);
                    continue
                },
            };

            let action = match command {
                Command::Place(first) => Action::Place(collect_placements(first, input)?),
                Command::PlaceDone => {
                    println!("Invalid Input: No tiles placed yet, use 'place {{letter}} at {{position}}' first.");
                    continue
                },
                Command::Replace(letter) => Action::Replace(letter),
                Command::Pass => Action::Pass,
                Command::Save(name) => Action::Save(PathBuf::from(name)),
                Command::Quit => Action::Quit,
                Command::Help => Action::Help,
            };

            let outcome = action.attempt(state, &self.dictionary, &self.rules);
            self.report(&outcome);
            if outcome.ends_turn() {
                state.end_turn();
                return Some(())
            }
        }
    }

    fn report(&self, outcome: &TurnOutcome) {
        match outcome {
            TurnOutcome::Played(report) => {
                if report.bingo {
                    println!("Played word '{}' (+{} points)", report.word, report.points - self.rules.extra_bonus);
                    println!("BINGO!!! (+{} points)", self.rules.extra_bonus);
                } else {
                    println!("Played word '{}' (+{} points)", report.word, report.points);
                }
                println!();
            },
            TurnOutcome::Rejected(err) => println!("Invalid Input: Move is not valid ({}).", err),
            TurnOutcome::Replaced(letter) => println!("Replaced tile {}", letter),
            TurnOutcome::ReplaceFailed(err) => println!("Invalid Input: {}", err),
            TurnOutcome::Saved(path) => println!("Game successfully saved to {}", path.display()),
            TurnOutcome::SaveFailed { path, reason } => println!("Failed to save game to {} ({})", path.display(), reason),
            TurnOutcome::Help => println!("{}", HELP),
            TurnOutcome::Passed | TurnOutcome::Quit => {},
        }
    }
}

fn prompt_name(n: usize, input: &mut Input<impl BufRead>) -> Option<String> {
    loop {
        println!("Please enter a name for player {} (letters only)", n);
        let name = input.prompt()?;
        let name = name.trim();
        if Player::is_valid_name(name) {
            return Some(name.to_owned())
        }
        println!("Invalid name. Must be at least one character and consist of letters only.");
        println!();
    }
}

/// Read `place` commands until `place done`
fn collect_placements(first: PlacementIntent, input: &mut Input<impl BufRead>) -> Option<Vec<PlacementIntent>> {
    let mut placements = vec![first];
    loop {
        match input.prompt()?.parse::<Command>() {
            Ok(Command::Place(p)) => placements.push(p),
            Ok(Command::PlaceDone) => return Some(placements),
            _ => println!("Invalid Input: Expected place command. Enter 'place done' to finish placing tiles."),
        }
    }
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();

    let settings = load_config(opt).expect("config");

    let dictionary = load_dictionary(&settings.dictionary).expect("loading the dictionary");
    let bag = load_bag(settings.tile_list.as_deref());
    let session = Session {
        dictionary,
        rules: ScoreRules::default(),
        bag,
        settings,
    };

    let stdin = io::stdin();
    let mut input = Input { lines: stdin.lock().lines() };

    println!("Welcome to Scrabble!");
    println!("--------------------");

    loop {
        println!();
        println!("Menu");
        println!("----");
        println!("1. New Game");
        println!("2. Load Game");
        println!("3. Quit");
        println!();

        let choice = match input.prompt() {
            Some(choice) => choice,
            None => break,
        };
        let state = match choice.trim() {
            "1" => match session.new_game(&mut input) {
                Some(state) => state,
                None => break,
            },
            "2" => match session.load_game(&mut input) {
                Some(Some(state)) => state,
                Some(None) => continue,
                None => break,
            },
            "3" => {
                println!("Bye!");
                break
            },
            _ => {
                println!("Invalid selection. Please enter a number from 1 to 3.");
                continue
            },
        };

        if session.run_game(state, &mut input).is_some() {
            println!("Bye!");
        }
        break
    }
}

#[cfg(test)]
fn settings_from(args: &[&str]) -> Result<Settings, config::ConfigError> {
    let args = std::iter::once("scrabble").chain(args.iter().copied());
    load_config(Opt::from_iter(args))
}

#[test]
fn command_line_settings() {
    let settings = settings_from(&["-d", "words.txt", "-s", "42", "--rows", "9", "--no-colour"]).unwrap();
    assert_eq!(settings.dictionary, PathBuf::from("words.txt"));
    assert_eq!(settings.seed, Some(42));
    assert_eq!(settings.rows, 9);
    assert_eq!(settings.cols, scrabble_duel::DEFAULT_COLS);
    assert!(!settings.colour);

    let settings = settings_from(&["-d", "words.txt", "-s", "9223372036854775807"]).unwrap();
    assert_eq!(settings.seed, Some(i64::MAX as u64));

    match settings_from(&["-d", "words.txt", "-s", "9223372036854775808"]) {
        Err(config::ConfigError::Message(msg)) => assert_eq!(msg, "seed is too large"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn starting_bag() {
    assert_eq!(load_bag(None).len(), 98);

    let path = std::env::temp_dir().join(format!("scrabble-duel-tiles-{}.txt", std::process::id()));
    std::fs::write(&path, "A-1\nQ 10\n").unwrap();
    let bag = load_bag(Some(&path));
    assert_eq!(bag.tiles().map(|t| t.to_string()).collect::<Vec<_>>(), vec!["A-1", "Q-10"]);
    std::fs::remove_file(&path).unwrap();
}
