
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "make_fst", about = "Compile a word list into a fst dictionary, which loads faster when starting a game")]
struct Opt {
    /// The input list. One word per line, in any order and case
    #[structopt(short = "i", long = "input-list", parse(from_os_str))]
    list_file: PathBuf,

    /// Where to write the compiled dictionary, usually ending with `.fst`
    #[structopt(short = "o", long = "output-fst", parse(from_os_str))]
    fst_file: PathBuf,
}

fn main() {
    simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).init().unwrap();

    let Opt { list_file, fst_file } = Opt::from_args();

    match scrabble_duel::dictionary::compile_word_list(&list_file, &fst_file) {
        Ok(n_words) => log::info!("{} words written to {}", n_words, fst_file.display()),
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        },
    }
}
