
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::play::{self, PlacementIntent, ValidationError};
use super::{Board, Dictionary, Hand, Letter, ScoreRules, TileBag, TileSupply, HAND_SIZE};

/// The kind of the last thing a player did on their turn
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Place,
    Replace,
    Pass,
    Save,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("invalid player name '{0}', must be letters only")]
    InvalidName(String),
    #[error("both players are named '{0}'")]
    SameNames(String),
    #[error("invalid player turn index {0}, must be 0 or 1")]
    InvalidTurn(usize),
    #[error("player '{name}' holds {n_tiles} tiles, at most {max} allowed")]
    HandTooLarge { name: String, n_tiles: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplaceError {
    #[error("no tile '{0}' found in hand")]
    MissingTile(Letter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    score: u32,
    hand: Hand,
    /// Not saved, a reloaded game starts with no last action
    last_action: Option<ActionKind>,
}

impl Player {
    pub fn new(name: &str, score: u32, hand: Hand) -> Result<Self, StateError> {
        if !Self::is_valid_name(name) {
            return Err(StateError::InvalidName(name.to_owned()))
        }
        if hand.len() > HAND_SIZE {
            return Err(StateError::HandTooLarge { name: name.to_owned(), n_tiles: hand.len(), max: HAND_SIZE })
        }
        Ok(Self {
            name: name.to_owned(),
            score,
            hand,
            last_action: None,
        })
    }

    /// At least one letter, and nothing but letters
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn last_action(&self) -> Option<ActionKind> {
        self.last_action
    }
}

/// What a committed move did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayReport {
    pub word: String,
    /// Including the bingo bonus
    pub points: u32,
    pub bingo: bool,
    pub drawn: usize,
}

/// A two player game: the board, the bag, and whose turn it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: [Player; 2],
    board: Board,
    bag: TileBag,
    current: usize,
    quit: bool,
}

impl GameState {
    pub fn new(players: [Player; 2], board: Board, bag: TileBag, current: usize) -> Result<Self, StateError> {
        if players[0].name == players[1].name {
            return Err(StateError::SameNames(players[0].name.clone()))
        }
        if current > 1 {
            return Err(StateError::InvalidTurn(current))
        }
        Ok(Self {
            players,
            board,
            bag,
            current,
            quit: false,
        })
    }

    /// Shuffle the bag with the given seed and deal a hand to each player, the first player starts
    pub fn new_game(names: [&str; 2], board: Board, mut bag: TileBag, seed: u64) -> Result<Self, StateError> {
        bag.shuffle(&mut StdRng::seed_from_u64(seed));
        let players = [
            Player::new(names[0], 0, Hand::new())?,
            Player::new(names[1], 0, Hand::new())?,
        ];
        let mut state = Self::new(players, board, bag, 0)?;
        for player in state.players.iter_mut() {
            player.hand.draw_from(&mut state.bag);
        }
        log::info!("new game between {} and {} (seed {})", names[0], names[1], seed);
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn bag(&self) -> &TileBag {
        &self.bag
    }
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
    pub fn current_index(&self) -> usize {
        self.current
    }
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Validate the move of the current player, and apply it only if it is legal
    pub fn play(
        &mut self,
        candidate: &[PlacementIntent],
        dictionary: &(impl Dictionary + ?Sized),
        rules: &ScoreRules,
    ) -> Result<PlayReport, ValidationError> {
        let found = play::validate(candidate, &self.board, &self.players[self.current].hand, dictionary)?;

        let player = &mut self.players[self.current];
        let letters = candidate.iter().map(|p| p.letter).collect::<Vec<_>>();
        let tiles = player.hand.remove_all(&letters).map_err(ValidationError::MissingTile)?;
        for (tile, p) in tiles.iter().zip(candidate) {
            self.board.place(*tile, p.position);
        }

        let points = play::score(&tiles, rules);
        player.score += points;
        let drawn = player.hand.draw_from(&mut self.bag);

        let bingo = play::score::is_bingo(tiles.len(), rules);
        log::info!("{} played {} for {} points{}", player.name, found.word, points, if bingo { " (bingo)" } else { "" });
        Ok(PlayReport {
            word: found.word,
            points,
            bingo,
            drawn,
        })
    }

    /// Put the first tile with that letter back in the bag, then draw one
    ///
    /// The returned tile goes to the back of the bag, so it is only drawn again if the bag was empty.
    pub fn replace(&mut self, letter: Letter) -> Result<(), ReplaceError> {
        let player = &mut self.players[self.current];
        let tile = player.hand.remove(letter).ok_or(ReplaceError::MissingTile(letter))?;
        self.bag.put_back(tile);
        if let Some(drawn) = self.bag.take_one() {
            player.hand.add(drawn);
        }
        log::info!("{} replaced a tile {}", player.name, letter);
        Ok(())
    }

    /// Passing twice in a row with an empty bag ends the game
    ///
    /// Must be called before the pass is recorded as the last action. Returns whether the game ended.
    pub fn pass(&mut self) -> bool {
        let player = &self.players[self.current];
        if self.bag.is_empty() && player.last_action == Some(ActionKind::Pass) {
            log::info!("{} passed twice with an empty bag", player.name);
            self.quit = true;
        }
        self.quit
    }

    pub fn record_action(&mut self, action: ActionKind) {
        self.players[self.current].last_action = Some(action);
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn did_quit(&self) -> bool {
        self.quit
    }

    pub fn end_turn(&mut self) {
        self.current = (self.current + 1) % 2;
    }

    pub fn is_game_over(&self) -> bool {
        self.quit
            || self.board.is_full()
            || (self.bag.is_empty() && self.players.iter().any(|p| p.hand.is_empty()))
    }

    /// The index of the player with the highest score, None on a draw
    pub fn winner(&self) -> Option<usize> {
        let (a, b) = (self.players[0].score, self.players[1].score);
        if a == b {
            None
        } else if a > b {
            Some(0)
        } else {
            Some(1)
        }
    }
}

#[cfg(test)]
use super::play::fixtures::{board, dictionary, hand, intents};

#[cfg(test)]
fn two_players(first: &str, second: &str) -> [Player; 2] {
    [
        Player::new("Alice", 0, hand(first)).unwrap(),
        Player::new("Bob", 0, hand(second)).unwrap(),
    ]
}

#[test]
fn player_names() {
    assert!(Player::is_valid_name("A"));
    assert!(Player::is_valid_name("Jeff"));
    assert!(Player::is_valid_name("zZ"));
    assert!(!Player::is_valid_name(""));
    assert!(!Player::is_valid_name("Player1"));
    assert!(!Player::is_valid_name("\u{0}\r\u{ff}"));

    let p = |name| Player::new(name, 0, Hand::new()).unwrap();
    assert_eq!(
        GameState::new([p("Sam"), p("Sam")], board(3, 3, ""), TileBag::default(), 0),
        Err(StateError::SameNames("Sam".to_owned())),
    );
    assert_eq!(
        GameState::new([p("Sam"), p("Kim")], board(3, 3, ""), TileBag::default(), 2),
        Err(StateError::InvalidTurn(2)),
    );

    assert!(Player::new("Sam", 0, hand("A-1, B-3, C-3, D-2, E-1, F-4, G-2")).is_ok());
    assert_eq!(
        Player::new("Sam", 0, hand("A-1, B-3, C-3, D-2, E-1, F-4, G-2, H-4")),
        Err(StateError::HandTooLarge { name: "Sam".to_owned(), n_tiles: 8, max: 7 }),
    );
}

#[test]
fn commit_a_move() {
    let bag = TileBag::from_tile_list("E-1\nK-5").unwrap();
    let mut state = GameState::new(two_players("A-1, Q-10, A-2", "Z-10"), board(15, 15, "C@B1, R@B3, S@B4"), bag, 0).unwrap();
    let dict = dictionary(&["cars"]);

    let report = state.play(&intents("A@B2"), &dict, &ScoreRules::default()).unwrap();
    assert_eq!(report, PlayReport { word: "CARS".to_owned(), points: 1, bingo: false, drawn: 2 });
    assert_eq!(state.board().tile_at("B2".parse().unwrap()).map(|t| t.to_string()), Some("A-1".to_owned()));
    assert_eq!(state.current_player().score(), 1);
    assert_eq!(state.current_player().hand(), &hand("Q-10, A-2, E-1, K-5"));
    assert!(state.bag().is_empty());
    // the other player is untouched
    assert_eq!(state.players()[1].hand(), &hand("Z-10"));
}

#[test]
fn commit_a_bingo() {
    let mut state = GameState::new(
        two_players("P-3, L-1, A-1, Y-4, I-1, N-1, G-2", "Z-10"),
        board(15, 15, ""),
        TileBag::default(),
        0,
    ).unwrap();
    let dict = dictionary(&["playing"]);
    let report = state.play(&intents("P@H2, L@H3, A@H4, Y@H5, I@H6, N@H7, G@H8"), &dict, &ScoreRules::default()).unwrap();
    assert_eq!(report.points, 13 + 50);
    assert!(report.bingo);
    assert_eq!(state.current_player().score(), 63);
    assert!(state.current_player().hand().is_empty());
    assert!(state.is_game_over());
}

#[test]
fn rejected_move_changes_nothing() {
    let mut state = GameState::new(two_players("A-1, T-1", "Z-10"), board(15, 15, "C@B1"), TileBag::from_tile_list("E-1").unwrap(), 0).unwrap();
    let before = state.clone();
    let dict = dictionary(&["cat"]);
    assert_eq!(
        state.play(&intents("A@B2, T@B4"), &dict, &ScoreRules::default()),
        Err(ValidationError::Hole("B3".parse().unwrap())),
    );
    assert_eq!(
        state.play(&intents("T@B2, A@B3"), &dict, &ScoreRules::default()),
        Err(ValidationError::NotAWord("CTA".to_owned())),
    );
    assert_eq!(state, before);
    assert!(state.play(&intents("A@B2, T@B3"), &dict, &ScoreRules::default()).is_ok());
}

#[test]
fn replace_a_tile() {
    let mut state = GameState::new(two_players("A-1, Q-10", "Z-10"), board(15, 15, ""), TileBag::from_tile_list("E-1").unwrap(), 0).unwrap();
    let q = Letter::from_char('Q').unwrap();
    state.replace(q).unwrap();
    assert_eq!(state.current_player().hand(), &hand("A-1, E-1"));
    assert_eq!(state.bag().tiles().map(|t| t.to_string()).collect::<Vec<_>>(), vec!["Q-10"]);

    let before = state.clone();
    assert_eq!(state.replace(q), Err(ReplaceError::MissingTile(q)));
    assert_eq!(state, before);
}

#[test]
fn replace_from_a_full_hand() {
    let mut state = GameState::new(
        two_players("A-1, B-3, C-3, D-2, E-1, F-4, G-2", "Z-10"),
        board(15, 15, ""),
        TileBag::from_tile_list("K-5\nL-1\nM-3").unwrap(),
        0,
    ).unwrap();
    state.replace(Letter::from_char('C').unwrap()).unwrap();
    assert_eq!(state.current_player().hand(), &hand("A-1, B-3, D-2, E-1, F-4, G-2, K-5"));
    assert_eq!(state.bag().len(), 3);
    assert_eq!(state.bag().tiles().map(|t| t.to_string()).collect::<Vec<_>>(), vec!["L-1", "M-3", "C-3"]);

    // with only the returned tile in the bag, it comes straight back
    let mut state = GameState::new(two_players("A-1, Q-10", "Z-10"), board(15, 15, ""), TileBag::default(), 0).unwrap();
    state.replace(Letter::from_char('Q').unwrap()).unwrap();
    assert_eq!(state.current_player().hand(), &hand("A-1, Q-10"));
    assert!(state.bag().is_empty());
}

#[test]
fn passing_twice_with_empty_bag_ends_game() {
    let mut state = GameState::new(two_players("A-1", "B-3"), board(15, 15, ""), TileBag::default(), 0).unwrap();
    assert!(!state.pass());
    state.record_action(ActionKind::Pass);
    state.end_turn();
    assert_eq!(state.current_index(), 1);
    assert!(!state.pass());
    state.record_action(ActionKind::Pass);
    state.end_turn();
    assert!(!state.is_game_over());
    assert!(state.pass());
    assert!(state.is_game_over());
}

#[test]
fn new_game_deals_hands() {
    use super::score_rules::EnglishScrabbleScoring;

    let make = |seed| GameState::new_game(
        ["Alice", "Bob"],
        board(15, 15, ""),
        TileBag::standard(&EnglishScrabbleScoring),
        seed,
    ).unwrap();
    let state = make(3);
    assert_eq!(state.players()[0].hand().len(), 7);
    assert_eq!(state.players()[1].hand().len(), 7);
    assert_eq!(state.bag().len(), 98 - 14);
    assert_eq!(state.current_player().name(), "Alice");
    assert_eq!(state, make(3));
    assert!(GameState::new_game(["Al", "Al"], board(3, 3, ""), TileBag::default(), 0).is_err());
}

#[test]
fn winner() {
    let mut state = GameState::new(two_players("A-1", "B-3"), board(3, 3, ""), TileBag::default(), 1).unwrap();
    assert_eq!(state.winner(), None);
    let dict = dictionary(&["b"]);
    state.play(&intents("B@A1"), &dict, &ScoreRules::default()).unwrap();
    assert_eq!(state.winner(), Some(1));
}
