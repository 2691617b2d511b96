use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ghost_solver::game::{Game, Player, PlayerKind, RoundOutcome, Turn};
use ghost_solver::policy::ComputerPlayer;
use ghost_solver::utils::dictionary_from_file;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Seat {
    #[value(name = "h", alias = "human")]
    Human,
    #[value(name = "c", alias = "computer")]
    Computer,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Ghost against humans and computers", long_about = None)]
struct Args {
    /// Path to the dictionary file (one word per line)
    #[arg(short, long, default_value = "ghost_words")]
    dictionary: PathBuf,

    /// Seed for the computer players' tie-breaks
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seats in turn order, e.g. `h c c` for one human against two computers
    #[arg(value_enum, num_args = 2.., required = true)]
    players: Vec<Seat>,
}

/// Prompts until the human enters a valid turn. Returns `None` at end of input.
fn read_turn(name: &str) -> Result<Option<Turn>> {
    loop {
        print!("Enter move (a letter, 'bluff' or 'surrender'), {}: ", name);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        match input.parse::<Turn>() {
            Ok(turn) => return Ok(Some(turn)),
            Err(e) => println!("Bad input! {}", e),
        }
    }
}

fn print_scores(game: &Game) {
    println!("---------------------");
    println!("Scores:");
    for player in game.players() {
        let status = if player.is_out() { " (out)" } else { "" };
        println!("  {}: {}{}", player.name(), player.ghost_letters(), status);
    }
    println!("---------------------");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let tree = dictionary_from_file(&args.dictionary).with_context(|| {
        format!("Failed to load dictionary from {}", args.dictionary.display())
    })?;

    let mut players = Vec::with_capacity(args.players.len());
    let mut computers = Vec::with_capacity(args.players.len());
    let (mut humans, mut bots) = (0, 0);
    for (seat, kind) in args.players.iter().enumerate() {
        match kind {
            Seat::Human => {
                players.push(Player::new(format!("human{}", humans), PlayerKind::Human));
                computers.push(None);
                humans += 1;
            }
            Seat::Computer => {
                players.push(Player::new(format!("computer{}", bots), PlayerKind::Computer));
                let seed = args.seed.map(|s| s.wrapping_add(seat as u64));
                computers.push(Some(ComputerPlayer::seeded(&tree, seed)));
                bots += 1;
            }
        }
    }

    let mut game = Game::new(players)?;
    println!("Starting Ghost with {} words!", tree.word_count());
    print_scores(&game);
    println!("{} starts", game.active_player().name());

    while game.winner().is_none() {
        let seat = game.active();
        let name = game.active_player().name().to_string();
        println!("String: '{}'   ({} to move)", game.fragment(), name);

        let turn = match computers[seat].as_mut() {
            Some(computer) => {
                let turn = Turn::from(computer.choose_move(game.fragment(), game.table_size()));
                println!("{} plays {}", name, turn);
                turn
            }
            None => match read_turn(&name)? {
                Some(turn) => turn,
                None => {
                    println!("\nThanks for playing!");
                    return Ok(());
                }
            },
        };

        if let RoundOutcome::Lost {
            seat,
            reason,
            fragment,
        } = game.apply(&tree, turn)?
        {
            println!(
                "{} {} at '{}'.",
                game.players()[seat].name(),
                reason,
                fragment
            );
            print_scores(&game);
            if game.winner().is_none() {
                println!("{} starts the next round", game.active_player().name());
            }
        }
    }

    if let Some(winner) = game.winner() {
        println!("🎉 {} wins after {} rounds! 🎉", winner.name(), game.rounds());
    }
    Ok(())
}
