//! A game of Ghost around one shared dictionary.
//!
//! This module defines:
//! - `Turn`: what a player can do on their turn (append a letter, call bluff, surrender).
//! - `Player`: a seat at the table and its "GHOST" letters.
//! - `Game`: the fragment, whose turn it is, and how each round is resolved.
//!
//! Rules applied by `Game::apply`:
//! - A player who completes a dictionary word loses the round.
//! - Calling bluff challenges the previous player. If some word still starts with the
//!   fragment the challenger loses, otherwise the challenged player does.
//! - A player may surrender and take the loss.
//!
//! Each loss earns the next letter of "GHOST", and a player holding all five letters
//! is out. The loser of a round starts the next one.
use crate::dictionary::LetterTree;
use crate::error::{GhostError, Result};
use crate::policy::Move;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// The letters a player collects, one per lost round.
pub const GHOST: &str = "GHOST";

/// Losses after which a player is out of the game.
pub const MAX_LOSSES: usize = GHOST.len();

/// Fewest seats a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// One action on a player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Letter(char),
    Bluff,
    Surrender,
}

impl From<Move> for Turn {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Letter(letter) => Turn::Letter(letter),
            Move::Bluff => Turn::Bluff,
        }
    }
}

impl FromStr for Turn {
    type Err = GhostError;

    /// Accepts a single letter (any case), `bluff` or `surrender`.
    ///
    /// # Examples
    /// ```
    /// use ghost_solver::game::Turn;
    ///
    /// assert_eq!("q".parse::<Turn>().unwrap(), Turn::Letter('Q'));
    /// assert_eq!(" Bluff ".parse::<Turn>().unwrap(), Turn::Bluff);
    /// assert!("qu".parse::<Turn>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                Ok(Turn::Letter(letter.to_ascii_uppercase()))
            }
            _ if input.eq_ignore_ascii_case("bluff") => Ok(Turn::Bluff),
            _ if input.eq_ignore_ascii_case("surrender") => Ok(Turn::Surrender),
            _ => Err(GhostError::InvalidTurn {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Letter(letter) => write!(f, "{}", letter),
            Turn::Bluff => write!(f, "bluff"),
            Turn::Surrender => write!(f, "surrender"),
        }
    }
}

/// Who decides a seat's turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Computer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    losses: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            name: name.into(),
            kind,
            losses: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    /// The part of "GHOST" this player has earned so far.
    pub fn ghost_letters(&self) -> &'static str {
        &GHOST[..self.losses.min(MAX_LOSSES)]
    }

    pub fn is_out(&self) -> bool {
        self.losses >= MAX_LOSSES
    }

    fn add_loss(&mut self) {
        self.losses += 1;
    }
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossReason {
    /// The player spelled a complete word.
    CompletedWord,
    /// The player called bluff but a word could still be formed.
    FailedChallenge,
    /// The player was challenged and no word starts with the fragment.
    CaughtBluffing,
    Surrendered,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LossReason::CompletedWord => "completed a word",
            LossReason::FailedChallenge => "called a bluff that wasn't one",
            LossReason::CaughtBluffing => "was caught bluffing",
            LossReason::Surrendered => "surrendered",
        };
        f.write_str(text)
    }
}

/// Result of applying one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round goes on with the next player.
    Continue,
    /// The round is over and `seat` took the loss.
    Lost {
        seat: usize,
        reason: LossReason,
        fragment: String,
    },
}

/// Game state: players, the fragment being built, and whose turn it is.
#[derive(Clone, Debug)]
pub struct Game {
    players: Vec<Player>,
    fragment: String,
    active: usize,
    last_mover: Option<usize>,
    rounds: usize,
}

impl Game {
    /// Seats `players` in order. The first player starts the first round.
    ///
    /// Fails with [`GhostError::NotEnoughPlayers`] for fewer than [`MIN_PLAYERS`] seats.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        if players.len() < MIN_PLAYERS {
            return Err(GhostError::NotEnoughPlayers {
                needed: MIN_PLAYERS,
                got: players.len(),
            });
        }
        Ok(Game {
            players,
            fragment: String::new(),
            active: 0,
            last_mover: None,
            rounds: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The letters played so far in the current round.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Seat index of the player to move.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Number of completed rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of players still in the game, which is the rotation the policy plans over.
    pub fn table_size(&self) -> NonZeroUsize {
        let remaining = self.players.iter().filter(|p| !p.is_out()).count();
        NonZeroUsize::new(remaining).unwrap_or(NonZeroUsize::MIN)
    }

    /// The last player standing, once everybody else is out.
    pub fn winner(&self) -> Option<&Player> {
        let mut remaining = self.players.iter().filter(|p| !p.is_out());
        match (remaining.next(), remaining.next()) {
            (Some(winner), None) if self.players.len() > 1 => Some(winner),
            _ => None,
        }
    }

    /// Applies the active player's turn and moves play on.
    ///
    /// # Returns
    /// * `Ok(RoundOutcome::Continue)` when the round goes on.
    /// * `Ok(RoundOutcome::Lost { .. })` when the turn ended the round. The loser has
    ///   already been charged a letter and the fragment has been cleared.
    /// * `Err(GhostError::InvalidTurn)` for a letter outside `A-Z`.
    /// * `Err(GhostError::GameOver)` once a winner is known.
    pub fn apply(&mut self, tree: &LetterTree, turn: Turn) -> Result<RoundOutcome> {
        if let Some(winner) = self.winner() {
            return Err(GhostError::GameOver {
                winner: winner.name().to_string(),
            });
        }

        let mover = self.active;
        match turn {
            Turn::Letter(letter) => {
                if !letter.is_ascii_alphabetic() {
                    return Err(GhostError::InvalidTurn {
                        input: letter.to_string(),
                    });
                }
                self.fragment.push(letter.to_ascii_uppercase());
                let completed = tree
                    .lookup(&self.fragment)
                    .is_some_and(|id| tree.node(id).is_terminal());
                if completed {
                    return Ok(self.end_round(mover, LossReason::CompletedWord));
                }
                self.last_mover = Some(mover);
                self.active = self.next_seat(mover);
                Ok(RoundOutcome::Continue)
            }
            Turn::Bluff => match self.last_mover {
                Some(challenged) if tree.lookup(&self.fragment).is_none() => {
                    Ok(self.end_round(challenged, LossReason::CaughtBluffing))
                }
                _ => Ok(self.end_round(mover, LossReason::FailedChallenge)),
            },
            Turn::Surrender => Ok(self.end_round(mover, LossReason::Surrendered)),
        }
    }

    fn end_round(&mut self, loser: usize, reason: LossReason) -> RoundOutcome {
        let fragment = std::mem::take(&mut self.fragment);
        self.players[loser].add_loss();
        self.last_mover = None;
        self.rounds += 1;
        log::info!(
            "{} {} at '{}' and now has '{}'",
            self.players[loser].name(),
            reason,
            fragment,
            self.players[loser].ghost_letters()
        );
        self.active = if self.players[loser].is_out() {
            self.next_seat(loser)
        } else {
            loser
        };
        RoundOutcome::Lost {
            seat: loser,
            reason,
            fragment,
        }
    }

    /// The first seat after `from` whose player is still in. Falls back to `from`.
    fn next_seat(&self, from: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&seat| !self.players[seat].is_out())
            .unwrap_or(from)
    }
}
