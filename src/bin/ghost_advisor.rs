use anyhow::{ensure, Context, Result};
use clap::Parser;
use ghost_solver::policy::{ComputerPlayer, Move};
use ghost_solver::utils::dictionary_from_file;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Suggest the next Ghost move for a fragment", long_about = None)]
struct Args {
    /// Path to the dictionary file (one word per line)
    #[arg(short, long, default_value = "ghost_words")]
    dictionary: PathBuf,

    /// Number of players taking turns
    #[arg(short, long, default_value = "2")]
    players: NonZeroUsize,

    /// Seed for the random tie-break between equally good letters
    #[arg(short, long)]
    seed: Option<u64>,

    /// Letters played so far
    #[arg(default_value = "")]
    fragment: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let fragment = args.fragment.trim().to_ascii_uppercase();
    ensure!(
        fragment.bytes().all(|b| b.is_ascii_uppercase()),
        "Fragment '{}' must contain only letters",
        args.fragment
    );

    let tree = dictionary_from_file(&args.dictionary).with_context(|| {
        format!("Failed to load dictionary from {}", args.dictionary.display())
    })?;

    println!("Fragment '{}' with {} players\n", fragment, args.players);
    if let Some(id) = tree.lookup(&fragment) {
        if tree.node(id).is_terminal() {
            println!("'{}' is already a complete word.\n", fragment);
        }
    }

    let mut computer = ComputerPlayer::seeded(&tree, args.seed);
    let ranking = computer.rank_letters(&fragment, args.players);
    if ranking.is_dead_end() {
        println!("No letter leads to a word.");
    } else {
        println!("Distance from loss by letter:");
        for (letter, value) in &ranking.scores {
            println!("  {}: {}", letter, value);
        }
        if let Some(best) = ranking.best() {
            println!("Best distance {} from {:?}", best, ranking.candidates());
        }
    }
    println!("Letters with no word: {}\n", ranking.rejected);

    match computer.choose_move(&fragment, args.players) {
        Move::Letter(letter) => println!("Suggested move: {}", letter),
        Move::Bluff => println!("Suggested move: bluff"),
    }
    Ok(())
}
