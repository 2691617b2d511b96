//! # Ghost Solver Library
//!
//! This library provides the dictionary index and game-value computation behind a
//! computer player for the word game Ghost. In Ghost, players take turns adding a
//! letter to a shared fragment. Whoever completes a word, or cannot extend the
//! fragment toward any word, loses the round.
//!
//! It is used by three binaries:
//! - `ghost`: plays a game between any mix of human and computer players.
//! - `ghost_advisor`: takes a dictionary, a player count and a fragment, then prints
//!   the value of every next letter and the move the computer would make.
//! - `dictionary_filter`: turns a raw word list into one that `LetterTree` accepts.
//!
//! ## Modules
//! - `dictionary`: the prefix tree (`LetterTree`, `LetterNode`), built once and
//!   read-only after that.
//! - `evaluator`: the distance-from-loss valuation, with an optional memo layer
//!   (`DistanceCache`).
//! - `policy`: letter ranking and move selection (`choose_move`, `ComputerPlayer`).
//! - `game`: turns, players, scoring and round resolution.
//! - `utils`: dictionary loading from readers and files, and the prefix-free filter.
//! - `error`: the crate-wide `GhostError`.

pub mod dictionary;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod policy;
pub mod utils;

pub use crate::dictionary::LetterTree;
pub use crate::error::GhostError;
pub use crate::evaluator::{distance_from_loss, distance_from_loss_for_path, DistanceOracle};
pub use crate::policy::{choose_move, Move};
