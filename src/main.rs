use anyhow::Result;
use clap::{Parser, Subcommand};

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::time::Instant;

use wordmg::{
    config::Config,
    dictionary::Dictionary,
    gems::GemAssignment,
    letters::{clean_board_text, LetterInventory, QuRule},
    ranker::Ranker,
};

mod display;
use display::*;

/// Ranks the words playable on a 4x4 letter board by the damage they deal
#[derive(Debug, Parser)]
#[command(name = "wordmg", version)]
struct Opts {
    /// JSON config file, command line flags take precedence over it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Word list to load (.json, .bin or one word per line)
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// Encoding of the fused qu tile: fused, guarded or unguarded
    #[arg(short, long, global = true)]
    qu_rule: Option<QuRule>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank one board, or read boards from stdin until EOF or 'quit'
    Rank {
        /// Board letters, e.g. 'rtasqu'
        #[arg(short, long)]
        board: Option<String>,

        /// Gem letters, e.g. 'ruby=t,diamond=ab'
        #[arg(short, long)]
        gems: Option<String>,

        /// Number of words to show, 0 shows every playable word
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Filter and encode a word list into the compiled format
    Compile {
        /// Where to write the compiled dictionary
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Opts::parse();
    log::debug!("command line options: {:?}", opts);

    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dictionary) = opts.dictionary {
        config.dictionary = dictionary;
    }
    if let Some(rule) = opts.qu_rule {
        config.qu_rule = rule;
    }

    match opts.command {
        Command::Compile { output } => compile(&config, output),
        Command::Rank { board, gems, limit } => {
            if let Some(limit) = limit {
                config.display_limit = limit;
            }
            rank(&config, board, gems)
        }
    }
}

fn compile(config: &Config, output: PathBuf) -> Result<()> {
    let start = Instant::now();
    let dictionary = Dictionary::load(&config.dictionary, &config.load_options())?;
    print!("Writing {} words to {} ... ", dictionary.len(), output.display());
    stdout().flush()?;
    dictionary.save_compiled(&output)?;
    println!("Complete in {:.1}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn rank(config: &Config, board: Option<String>, gems: Option<String>) -> Result<()> {
    let dictionary = Dictionary::load(&config.dictionary, &config.load_options())?;
    println!(
        "Loaded {} words from {} ({} qu rule)",
        dictionary.len(),
        config.dictionary.display(),
        config.qu_rule
    );

    // one-shot mode fails on a bad gem spec instead of asking again
    if let Some(board) = board {
        return rank_sample(config, &dictionary, &board, gems.as_deref().unwrap_or(""));
    }

    println!("Enter the board letters, optionally followed by gems (e.g. 'rtasqu ruby=t')");
    let stdin = stdin();
    loop {
        print!("Board > ");
        stdout().flush()?;

        let mut buffer = String::new();
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }
        let mut fields = buffer.split_whitespace();
        let letters = match fields.next() {
            Some("quit") | Some("exit") => break,
            Some(letters) => letters,
            None => continue,
        };
        let gem_spec = fields.collect::<Vec<_>>().join(",");

        if let Err(err) = rank_sample(config, &dictionary, letters, &gem_spec) {
            println!("{}", err);
        }
    }
    Ok(())
}

fn rank_sample(config: &Config, dictionary: &Dictionary, raw: &str, gem_spec: &str) -> Result<()> {
    let letters = clean_board_text(raw, config.qu_rule);
    let gems: GemAssignment = gem_spec.parse()?;

    println!("For letters: \"{}\"", letters);
    display_board(&letters, config.qu_rule, &gems)?;

    let inventory = LetterInventory::from_board(&letters, config.qu_rule);
    let mut ranker = Ranker::new(&inventory).with_limit(config.display_limit);
    if !gems.is_empty() {
        ranker = ranker.with_gems(&gems);
    }

    let start = Instant::now();
    let results = ranker.rank(dictionary.words());
    log::info!(
        "ranked {} playable words in {:.3}ms",
        ranker.matched_count,
        start.elapsed().as_secs_f64() * 1000.0
    );

    display_results(&results, config.qu_rule, config.columns)
}
