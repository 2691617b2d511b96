//! Move selection for a computer Ghost player.
//!
//! For every letter of the alphabet the policy asks a `DistanceOracle` how far the
//! extended fragment is from a forced loss. It then keeps the letters with the
//! largest value and lets a `TieBreaker` pick one of them. When no letter leads to
//! a dictionary word the only honest move is to call `Move::Bluff`.
use crate::dictionary::{LetterTree, ALPHABET};
use crate::error::GhostError;
use crate::evaluator::{DistanceCache, DistanceOracle};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::num::NonZeroUsize;

/// A decision returned by the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Append this uppercase letter to the fragment.
    Letter(char),
    /// Claim that the fragment cannot be extended toward any word.
    Bluff,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Letter(letter) => write!(f, "{}", letter),
            Move::Bluff => write!(f, "bluff"),
        }
    }
}

/// Chooses among letters that scored equally well.
pub trait TieBreaker {
    /// Returns one of `candidates`. Only returns `None` when `candidates` is empty.
    fn pick(&mut self, candidates: &[char]) -> Option<char>;
}

/// Uniform random choice, the tie-break used in real play.
#[derive(Clone, Debug)]
pub struct RandomTieBreak<R> {
    rng: R,
}

impl<R: Rng> RandomTieBreak<R> {
    pub fn new(rng: R) -> Self {
        RandomTieBreak { rng }
    }
}

impl RandomTieBreak<SmallRng> {
    /// Seeds a `SmallRng` from `seed`, or from the OS when no seed is given.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        RandomTieBreak::new(rng)
    }
}

impl<R: Rng> TieBreaker for RandomTieBreak<R> {
    fn pick(&mut self, candidates: &[char]) -> Option<char> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Always takes the alphabetically first candidate. Useful for reproducible runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl TieBreaker for FirstCandidate {
    fn pick(&mut self, candidates: &[char]) -> Option<char> {
        candidates.first().copied()
    }
}

/// The value of every legal next letter for one fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterRanking {
    /// `(letter, distance from loss)` for each letter that leads toward a word, in
    /// alphabetical order.
    pub scores: Vec<(char, u32)>,
    /// Letters with no dictionary word down their path.
    pub rejected: usize,
}

impl LetterRanking {
    /// The largest distance among the legal letters.
    pub fn best(&self) -> Option<u32> {
        self.scores.iter().map(|&(_, value)| value).max()
    }

    /// The letters that reach [`LetterRanking::best`], alphabetically.
    pub fn candidates(&self) -> Vec<char> {
        match self.best() {
            Some(best) => self
                .scores
                .iter()
                .filter(|&&(_, value)| value == best)
                .map(|&(letter, _)| letter)
                .collect(),
            None => Vec::new(),
        }
    }

    /// True when every letter of the alphabet was rejected.
    pub fn is_dead_end(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Values every possible next letter of `current`.
///
/// Letters whose path is missing from the dictionary are counted in `rejected`
/// instead of being scored, so a legitimate value of `0` is never confused with an
/// impossible letter.
pub fn rank_letters<O>(oracle: &O, current: &str, n_players: NonZeroUsize) -> LetterRanking
where
    O: DistanceOracle + ?Sized,
{
    let mut ranking = LetterRanking::default();
    let mut path = String::with_capacity(current.len() + 1);
    for letter in ALPHABET {
        path.clear();
        path.push_str(current);
        path.push(letter);
        match oracle.distance_for_path(&path, n_players) {
            Ok(value) => {
                log::debug!("{}: distance from loss {}", letter, value);
                ranking.scores.push((letter, value));
            }
            Err(GhostError::InvalidPath { .. }) => {
                log::trace!("{}: no word down that path", letter);
                ranking.rejected += 1;
            }
            Err(e) => {
                log::warn!("{}: skipped ({})", letter, e);
                ranking.rejected += 1;
            }
        }
    }
    ranking
}

/// Picks the next move for `current` with `n_players` at the table.
///
/// Returns `Move::Bluff` when all 26 letters leave the dictionary. Otherwise it
/// returns a letter with the largest distance from loss, and `tie_breaker` decides
/// among equals. The rule is the same whether that distance is positive (a safe
/// continuation exists) or zero (every continuation is equally exposed).
///
/// # Examples
/// ```
/// use ghost_solver::dictionary::LetterTree;
/// use ghost_solver::policy::{choose_move, FirstCandidate, Move};
/// use std::num::NonZeroUsize;
///
/// let tree = LetterTree::build(["CAT", "DOG", "CAB"]).unwrap();
/// let two = NonZeroUsize::new(2).unwrap();
/// assert_eq!(choose_move(&tree, "C", two, &mut FirstCandidate), Move::Letter('A'));
/// assert_eq!(choose_move(&tree, "CX", two, &mut FirstCandidate), Move::Bluff);
/// ```
pub fn choose_move<O, T>(
    oracle: &O,
    current: &str,
    n_players: NonZeroUsize,
    tie_breaker: &mut T,
) -> Move
where
    O: DistanceOracle + ?Sized,
    T: TieBreaker + ?Sized,
{
    let ranking = rank_letters(oracle, current, n_players);
    let candidates = ranking.candidates();
    let Some(&first) = candidates.first() else {
        log::debug!("no legal letters after '{}', calling bluff", current);
        return Move::Bluff;
    };

    if let Some(best) = ranking.best() {
        if best > 0 {
            log::debug!("best distance {} from {:?} cannot lose this turn", best, candidates);
        } else {
            log::debug!("every legal letter {:?} is exposed", candidates);
        }
    }

    let chosen = tie_breaker.pick(&candidates).unwrap_or(first);
    log::debug!("after '{}' choosing {}", current, chosen);
    Move::Letter(chosen)
}

/// A computer opponent: a memoized view of the dictionary plus its tie-breaker.
#[derive(Debug)]
pub struct ComputerPlayer<'t, T = RandomTieBreak<SmallRng>> {
    cache: DistanceCache<'t>,
    tie_breaker: T,
}

impl<'t> ComputerPlayer<'t> {
    /// Uses random tie-breaks; pass a seed for a reproducible game.
    pub fn seeded(tree: &'t LetterTree, seed: Option<u64>) -> Self {
        ComputerPlayer::new(tree, RandomTieBreak::from_seed(seed))
    }
}

impl<'t, T: TieBreaker> ComputerPlayer<'t, T> {
    pub fn new(tree: &'t LetterTree, tie_breaker: T) -> Self {
        ComputerPlayer {
            cache: DistanceCache::new(tree),
            tie_breaker,
        }
    }

    pub fn choose_move(&mut self, current: &str, n_players: NonZeroUsize) -> Move {
        choose_move(&self.cache, current, n_players, &mut self.tie_breaker)
    }

    pub fn rank_letters(&self, current: &str, n_players: NonZeroUsize) -> LetterRanking {
        rank_letters(&self.cache, current, n_players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Remembers what it was offered and answers with the last candidate.
    #[derive(Default)]
    struct Recording {
        offered: Vec<Vec<char>>,
    }

    impl TieBreaker for Recording {
        fn pick(&mut self, candidates: &[char]) -> Option<char> {
            self.offered.push(candidates.to_vec());
            candidates.last().copied()
        }
    }

    #[test]
    fn test_only_letter_toward_a_word() {
        let tree = LetterTree::build(["CAT", "DOG", "CAB"]).unwrap();
        for seed in 0..200 {
            let mut tie_breaker = RandomTieBreak::from_seed(Some(seed));
            assert_eq!(
                choose_move(&tree, "C", players(2), &mut tie_breaker),
                Move::Letter('A')
            );
        }
    }

    #[test]
    fn test_bluff_when_no_letter_is_legal() {
        let tree = LetterTree::build(["AB"]).unwrap();
        for n in 1..=4 {
            assert_eq!(choose_move(&tree, "X", players(n), &mut FirstCandidate), Move::Bluff);
        }
        let ranking = rank_letters(&tree, "X", players(2));
        assert!(ranking.is_dead_end());
        assert_eq!(ranking.rejected, 26);
        assert_eq!(ranking.best(), None);
    }

    #[test]
    fn test_bluff_after_complete_word() {
        let tree = LetterTree::build(["AB"]).unwrap();
        assert_eq!(choose_move(&tree, "AB", players(2), &mut FirstCandidate), Move::Bluff);
    }

    #[test]
    fn test_prefers_larger_distance() {
        // After "C" the next player answers "D" and we are left to complete "CDE".
        let tree = LetterTree::build(["AB", "CDE"]).unwrap();
        let ranking = rank_letters(&tree, "", players(2));
        assert_eq!(ranking.scores, vec![('A', 1), ('C', 0)]);
        assert_eq!(ranking.rejected, 24);
        assert_eq!(ranking.candidates(), vec!['A']);

        let mut recording = Recording::default();
        assert_eq!(choose_move(&tree, "", players(2), &mut recording), Move::Letter('A'));
        assert_eq!(recording.offered, vec![vec!['A']]);
    }

    #[test]
    fn test_zero_value_letters_are_still_legal() {
        let tree = LetterTree::build(["A", "B"]).unwrap();
        let mut recording = Recording::default();
        assert_eq!(choose_move(&tree, "", players(3), &mut recording), Move::Letter('B'));
        assert_eq!(recording.offered, vec![vec!['A', 'B']]);
    }

    #[test]
    fn test_random_tie_break_covers_all_candidates() {
        let tree = LetterTree::build(["AB", "CB", "EB"]).unwrap();
        let mut tie_breaker = RandomTieBreak::from_seed(Some(7));
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..300 {
            match choose_move(&tree, "", players(2), &mut tie_breaker) {
                Move::Letter(letter) => {
                    seen.insert(letter);
                }
                Move::Bluff => panic!("unexpected bluff"),
            }
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec!['A', 'C', 'E']);
    }

    #[test]
    fn test_deterministic_with_fixed_tie_break() {
        let tree = LetterTree::build(["AB", "CB", "DOG", "DONUT", "HELLO"]).unwrap();
        let first = choose_move(&tree, "", players(3), &mut FirstCandidate);
        for _ in 0..20 {
            assert_eq!(choose_move(&tree, "", players(3), &mut FirstCandidate), first);
        }
    }

    #[test]
    fn test_computer_player_matches_unmemoized_policy() {
        let tree = LetterTree::build(["CAT", "CAB", "DOG", "DONUT", "HELLO", "HAT"]).unwrap();
        let mut computer = ComputerPlayer::new(&tree, FirstCandidate);
        for fragment in ["", "C", "D", "DO", "DON", "H", "HE", "Q"] {
            for n in 1..=4 {
                assert_eq!(
                    computer.choose_move(fragment, players(n)),
                    choose_move(&tree, fragment, players(n), &mut FirstCandidate),
                    "fragment {:?} n={}",
                    fragment,
                    n
                );
                assert_eq!(
                    computer.rank_letters(fragment, players(n)),
                    rank_letters(&tree, fragment, players(n))
                );
            }
        }
    }

    #[test]
    fn test_seeded_computer_is_reproducible() {
        let tree = LetterTree::build(["AB", "CB", "EB", "GB"]).unwrap();
        let mut first = ComputerPlayer::seeded(&tree, Some(42));
        let mut second = ComputerPlayer::seeded(&tree, Some(42));
        for _ in 0..20 {
            assert_eq!(first.choose_move("", players(2)), second.choose_move("", players(2)));
        }
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Letter('Q').to_string(), "Q");
        assert_eq!(Move::Bluff.to_string(), "bluff");
    }
}
