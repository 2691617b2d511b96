//! Distance-from-loss valuation over a `LetterTree`.
//!
//! The distance from loss of a node is how many more letters can be played, counted
//! around a table of `n_players`, before somebody is forced to complete a word:
//! - a terminal node is `0`;
//! - any other node is `(max over children + 1) mod n_players`.
//!
//! `distance_from_loss` computes it from scratch. `DistanceCache` gives the same
//! values but remembers every node it has evaluated. Both implement
//! `DistanceOracle`, which is all the move policy needs.
use crate::dictionary::{LetterTree, NodeId};
use crate::error::{GhostError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Anything that can value the node at the end of a path.
pub trait DistanceOracle {
    /// Returns the distance from loss of the node spelled by `path`, or
    /// `GhostError::InvalidPath` if no word starts with `path`.
    fn distance_for_path(&self, path: &str, n_players: NonZeroUsize) -> Result<u32>;
}

fn modulus(n_players: NonZeroUsize) -> u32 {
    u32::try_from(n_players.get()).unwrap_or(u32::MAX)
}

/// Post-order evaluation of the subtree under `node` without recursion.
///
/// `known` holds values already computed for the same player count; every node the
/// traversal finishes is added to it.
fn evaluate(
    tree: &LetterTree,
    node: NodeId,
    n_players: NonZeroUsize,
    known: &mut HashMap<NodeId, u32>,
) -> u32 {
    let modulus = modulus(n_players);
    let mut stack = vec![(node, false)];
    while let Some((id, expanded)) = stack.pop() {
        if known.contains_key(&id) {
            continue;
        }
        let current = tree.node(id);
        if current.is_terminal() {
            known.insert(id, 0);
        } else if !expanded {
            stack.push((id, true));
            stack.extend(
                current
                    .children()
                    .filter(|(_, child)| !known.contains_key(child))
                    .map(|(_, child)| (child, false)),
            );
        } else {
            // Only the root of an empty dictionary has no children here.
            let value = current
                .children()
                .filter_map(|(_, child)| known.get(&child).copied())
                .max()
                .map_or(0, |best| (best + 1) % modulus);
            known.insert(id, value);
        }
    }
    known.get(&node).copied().unwrap_or(0)
}

/// Computes the distance from loss of `node` with `n_players` taking turns.
///
/// The result is always in `0..n_players`. Nothing is cached, so the whole subtree
/// under `node` is walked on every call.
///
/// # Examples
/// ```
/// use ghost_solver::dictionary::LetterTree;
/// use ghost_solver::evaluator::distance_from_loss;
/// use std::num::NonZeroUsize;
///
/// let tree = LetterTree::build(["CAT", "DOG", "CAB"]).unwrap();
/// let two = NonZeroUsize::new(2).unwrap();
/// assert_eq!(distance_from_loss(&tree, tree.lookup("CAT").unwrap(), two), 0);
/// assert_eq!(distance_from_loss(&tree, tree.lookup("CA").unwrap(), two), 1);
/// ```
pub fn distance_from_loss(tree: &LetterTree, node: NodeId, n_players: NonZeroUsize) -> u32 {
    evaluate(tree, node, n_players, &mut HashMap::new())
}

/// Looks up `path` and values the node it reaches.
///
/// # Returns
/// * `Ok(u32)` in `0..n_players`.
/// * `Err(GhostError::InvalidPath)` if no dictionary word starts with `path`.
pub fn distance_from_loss_for_path(
    tree: &LetterTree,
    path: &str,
    n_players: NonZeroUsize,
) -> Result<u32> {
    let node = tree.lookup(path).ok_or_else(|| GhostError::InvalidPath {
        path: path.to_string(),
    })?;
    Ok(distance_from_loss(tree, node, n_players))
}

impl DistanceOracle for LetterTree {
    fn distance_for_path(&self, path: &str, n_players: NonZeroUsize) -> Result<u32> {
        distance_from_loss_for_path(self, path, n_players)
    }
}

/// Memoized distance-from-loss values for one tree, keyed by player count and node.
///
/// The cache belongs to a single caller. Callers that share a tree across threads
/// each keep their own cache.
#[derive(Debug)]
pub struct DistanceCache<'t> {
    tree: &'t LetterTree,
    tables: RefCell<HashMap<NonZeroUsize, HashMap<NodeId, u32>>>,
}

impl<'t> DistanceCache<'t> {
    pub fn new(tree: &'t LetterTree) -> Self {
        DistanceCache {
            tree,
            tables: RefCell::new(HashMap::new()),
        }
    }

    pub fn tree(&self) -> &'t LetterTree {
        self.tree
    }

    /// Same value as [`distance_from_loss`]. The first call under a subtree fills in
    /// every node beneath it.
    pub fn distance_from_loss(&self, node: NodeId, n_players: NonZeroUsize) -> u32 {
        let mut tables = self.tables.borrow_mut();
        let known = tables.entry(n_players).or_default();
        match known.get(&node).copied() {
            Some(value) => value,
            None => evaluate(self.tree, node, n_players, known),
        }
    }

    /// Number of `(node, n_players)` values stored so far.
    pub fn len(&self) -> usize {
        self.tables.borrow().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DistanceOracle for DistanceCache<'_> {
    fn distance_for_path(&self, path: &str, n_players: NonZeroUsize) -> Result<u32> {
        let node = self.tree.lookup(path).ok_or_else(|| GhostError::InvalidPath {
            path: path.to_string(),
        })?;
        Ok(self.distance_from_loss(node, n_players))
    }
}
