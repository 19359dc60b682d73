
use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    BufWriter,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fst::{Set, SetBuilder};

/// The words that can be played
pub trait Dictionary {
    /// Case insensitive membership
    fn contains_word(&self, word: &str) -> bool;
}

/// Words are stored lowercase
impl<D: AsRef<[u8]>> Dictionary for Set<D> {
    fn contains_word(&self, word: &str) -> bool {
        Set::contains(self, word.to_lowercase())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("cannot read the dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("dictionary file {0} is neither .txt or .fst")]
    UnknownFormat(PathBuf),
    #[error("invalid fst dictionary: {0}")]
    Fst(#[from] fst::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DictionaryError + '_ {
    move |source| DictionaryError::Io { path: path.to_owned(), source }
}

/// Lowercase, sort and deduplicate the words so that they can be inserted in a fst
fn normalize<S: AsRef<str>>(words: impl IntoIterator<Item=S>) -> Vec<String> {
    let mut words = words.into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>();
    words.sort_unstable();
    words.dedup();
    words
}

/// Build an in-memory dictionary from a list of words in any order and case
pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item=S>) -> Result<Set<Vec<u8>>, DictionaryError> {
    let mut build = SetBuilder::memory();
    build.extend_iter(normalize(words))?;
    Ok(build.into_set())
}

fn read_word_list(path: &Path) -> Result<Vec<String>, DictionaryError> {
    let start = Instant::now();
    let file = BufReader::new(File::open(path).map_err(io_error(path))?);
    let words = file.lines().collect::<Result<Vec<_>, _>>().map_err(io_error(path))?;
    log::info!("{} words loaded in {:?}", words.len(), Instant::now() - start);
    Ok(words)
}

/// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
pub fn load_dictionary(path: &Path) -> Result<Set<Vec<u8>>, DictionaryError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("fst") => {
            let start = Instant::now();
            let data = std::fs::read(path).map_err(io_error(path))?;
            let dictionary = Set::new(data)?;
            log::info!("dictionary loaded in {:?}", Instant::now() - start);
            Ok(dictionary)
        },
        Some("txt") => {
            let words = read_word_list(path)?;
            let start = Instant::now();
            let dictionary = from_words(words)?;
            log::info!("dictionary built in {:?}", Instant::now() - start);
            Ok(dictionary)
        },
        _ => Err(DictionaryError::UnknownFormat(path.to_owned())),
    }
}

/// Compile a word list into a fst file, for faster loading
pub fn compile_word_list(list_file: &Path, fst_file: &Path) -> Result<usize, DictionaryError> {
    let words = normalize(read_word_list(list_file)?);

    let start = Instant::now();
    let wtr = BufWriter::new(File::create(fst_file).map_err(io_error(fst_file))?);
    let mut build = SetBuilder::new(wtr)?;
    build.extend_iter(&words)?;
    build.finish()?;
    log::info!("dictionary written in {:?}", Instant::now() - start);
    Ok(words.len())
}

#[test]
fn case_insensitive() {
    let dict = from_words(vec!["Cars", "ARC", "car", "cars"]).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(dict.contains_word("CARS"));
    assert!(dict.contains_word("cars"));
    assert!(dict.contains_word("Arc"));
    assert!(!dict.contains_word("CA"));
    assert!(!dict.contains_word(""));
}

#[test]
fn unknown_extension() {
    match load_dictionary(Path::new("words.csv")) {
        Err(DictionaryError::UnknownFormat(p)) => assert_eq!(p, PathBuf::from("words.csv")),
        other => panic!("unexpected {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn compile_and_reload() {
    let dir = std::env::temp_dir().join(format!("scrabble-duel-dict-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let txt = dir.join("words.txt");
    let fst_path = dir.join("words.fst");
    std::fs::write(&txt, "zebra\nApple\n\nmango\n").unwrap();

    assert_eq!(compile_word_list(&txt, &fst_path).unwrap(), 3);
    let from_fst = load_dictionary(&fst_path).unwrap();
    let from_txt = load_dictionary(&txt).unwrap();
    for word in &["ZEBRA", "apple", "Mango"] {
        assert!(from_fst.contains_word(word));
        assert!(from_txt.contains_word(word));
    }
    assert!(!from_fst.contains_word("kiwi"));

    std::fs::remove_dir_all(&dir).unwrap();
}
