//! Prefix-tree dictionary for Ghost.
//!
//! This module defines:
//! - `NodeId`: an index into the tree's node arena.
//! - `LetterNode`: one letter position, with its children and a terminal flag.
//! - `LetterTree`: the whole dictionary. It is built once from a word list, and the
//!   build rejects any list in which one word is a prefix of another.
//! - `WordsUnder`: a lazy iterator over the complete words below a path.
//!
//! Nodes live in a single `Vec` owned by the tree. Children and the parent link are
//! plain indices, so ownership only ever points downward from the tree.
use crate::error::{GhostError, Result};
use crate::utils::parse_entry;
use std::fmt;

/// Number of letters a node can branch on (A-Z).
pub const ALPHABET_SIZE: usize = 26;

/// Every letter a player may append, in order.
pub const ALPHABET: [char; ALPHABET_SIZE] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Returns the child slot for `letter`, or `None` if it is not in `A..=Z`.
fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_uppercase()
        .then(|| (letter as u8 - b'A') as usize)
}

/// Identity of a node inside one `LetterTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, which stands for the empty string.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A single letter position in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterNode {
    letter: Option<char>,
    parent: Option<NodeId>,
    children: [Option<NodeId>; ALPHABET_SIZE],
    is_terminal: bool,
}

impl LetterNode {
    fn new(letter: Option<char>, parent: Option<NodeId>, is_terminal: bool) -> Self {
        LetterNode {
            letter,
            parent,
            children: [None; ALPHABET_SIZE],
            is_terminal,
        }
    }

    /// The letter on the edge into this node; `None` for the root.
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// The parent node. Only useful for diagnostics such as rebuilding a word.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True iff the path from the root to this node spells a dictionary word.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Returns the child reached by `letter`, if any. Letters outside `A..=Z` never match.
    pub fn child(&self, letter: char) -> Option<NodeId> {
        letter_index(letter).and_then(|i| self.children[i])
    }

    /// Iterates over `(letter, child)` pairs in alphabetical order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| child.map(|id| ((b'A' + i as u8) as char, id)))
    }

    pub fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// The dictionary index: a prefix tree in which no word is a prefix of another.
///
/// The tree is immutable once built, so a shared reference can be handed to as many
/// readers as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterTree {
    nodes: Vec<LetterNode>,
    word_count: usize,
}

impl Default for LetterTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LetterTree {
    /// Creates a tree holding no words (just the root).
    pub fn new() -> Self {
        LetterTree {
            nodes: vec![LetterNode::new(None, None, false)],
            word_count: 0,
        }
    }

    /// Builds the dictionary from a sequence of words.
    ///
    /// Each word is trimmed and uppercased, then it must consist of the letters `A-Z`.
    /// Words are inserted in order. The first word that breaks either rule stops the
    /// build, and nothing is returned but the error.
    ///
    /// # Arguments
    /// * `words`: The word list. The position of a word in the sequence (1-based) is
    ///   reported as its line in errors.
    ///
    /// # Returns
    /// * `Ok(LetterTree)` if every word was accepted.
    /// * `Err(GhostError::InvalidDictionaryEntry)` if a word contains anything but letters.
    /// * `Err(GhostError::OverlappingWordStem)` if a word is a prefix of an earlier word,
    ///   extends an earlier word, or repeats one.
    ///
    /// # Examples
    /// ```
    /// use ghost_solver::dictionary::LetterTree;
    /// use ghost_solver::error::GhostError;
    ///
    /// let tree = LetterTree::build(["cat", "dog", "cab"]).unwrap();
    /// assert_eq!(tree.word_count(), 3);
    ///
    /// let err = LetterTree::build(["CAT", "CATS", "DOG"]).unwrap_err();
    /// assert!(matches!(err, GhostError::OverlappingWordStem { line: 2, .. }));
    /// ```
    pub fn build<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = LetterTree::new();
        for (i, raw) in words.into_iter().enumerate() {
            let line = i + 1;
            let word = parse_entry(line, raw.as_ref())?;
            tree.insert(line, &word)?;
        }
        Ok(tree)
    }

    /// Inserts an already-normalized word. `line` is only used for error reporting.
    pub(crate) fn insert(&mut self, line: usize, word: &str) -> Result<()> {
        let overlap = || GhostError::OverlappingWordStem {
            line,
            word: word.to_string(),
        };
        let letters: Vec<char> = word.chars().collect();
        let Some((&last, stem)) = letters.split_last() else {
            return Err(GhostError::InvalidDictionaryEntry {
                line,
                entry: word.to_string(),
            });
        };

        let mut active = NodeId::ROOT;
        for &letter in stem {
            active = match self.node(active).child(letter) {
                Some(next) if self.node(next).is_terminal => return Err(overlap()),
                Some(next) => next,
                None => self.push_child(active, letter, false),
            };
        }

        // An existing node here is either the same word again or the stem of a longer one.
        if self.node(active).child(last).is_some() {
            return Err(overlap());
        }
        self.push_child(active, last, true);
        self.word_count += 1;
        Ok(())
    }

    fn push_child(&mut self, parent: NodeId, letter: char, is_terminal: bool) -> NodeId {
        debug_assert!(letter.is_ascii_uppercase());
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(LetterNode::new(Some(letter), Some(parent), is_terminal));
        self.nodes[parent.0].children[(letter as u8 - b'A') as usize] = Some(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node for `id`.
    ///
    /// `id` must come from this tree; ids from another tree may panic or name an
    /// unrelated node.
    pub fn node(&self, id: NodeId) -> &LetterNode {
        &self.nodes[id.0]
    }

    /// Finds the node at the end of `path`, following one child per letter.
    ///
    /// The empty path is the root. Returns `None` as soon as a letter has no child,
    /// which means no dictionary word starts with `path`. The path is matched
    /// literally: lowercase letters never match.
    ///
    /// # Examples
    /// ```
    /// use ghost_solver::dictionary::LetterTree;
    ///
    /// let tree = LetterTree::build(["CAT", "DOG", "CAB"]).unwrap();
    /// let ca = tree.lookup("CA").unwrap();
    /// assert!(!tree.node(ca).is_terminal());
    /// assert!(tree.node(tree.lookup("CAT").unwrap()).is_terminal());
    /// assert!(tree.lookup("CO").is_none());
    /// ```
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        path.chars()
            .try_fold(NodeId::ROOT, |active, letter| self.node(active).child(letter))
    }

    /// Spells the path from the root down to `id` by walking parent links.
    pub fn spell(&self, id: NodeId) -> String {
        let mut letters = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            letters.extend(node.letter);
            current = node.parent;
        }
        letters.iter().rev().collect()
    }

    /// Lazily lists the complete words strictly below `path`, in alphabetical order.
    ///
    /// The iterator is empty when `path` is not in the tree or already spells a word.
    pub fn words_under(&self, path: &str) -> WordsUnder<'_> {
        let stack = match self.lookup(path) {
            Some(id) if !self.node(id).is_terminal => {
                self.node(id).children().rev().map(|(_, child)| child).collect()
            }
            _ => Vec::new(),
        };
        WordsUnder { tree: self, stack }
    }

    /// Number of words in the dictionary.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

/// Depth-first iterator over the words below a node. Clone it to restart from the
/// same point.
#[derive(Clone, Debug)]
pub struct WordsUnder<'t> {
    tree: &'t LetterTree,
    stack: Vec<NodeId>,
}

impl Iterator for WordsUnder<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(id) = self.stack.pop() {
            let node = self.tree.node(id);
            if node.is_terminal {
                return Some(self.tree.spell(id));
            }
            self.stack
                .extend(node.children().rev().map(|(_, child)| child));
        }
        None
    }
}

impl fmt::Display for LetterTree {
    /// Renders one node per line, indented by depth, with the full word after each
    /// terminal node:
    ///
    /// ```text
    /// C
    ///  A
    ///   B | (CAB)
    ///   T | (CAT)
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut frontier: Vec<(NodeId, usize)> = self
            .node(NodeId::ROOT)
            .children()
            .rev()
            .map(|(_, child)| (child, 0))
            .collect();
        while let Some((id, depth)) = frontier.pop() {
            let node = self.node(id);
            write!(f, "{}", " ".repeat(depth))?;
            if let Some(letter) = node.letter {
                write!(f, "{}", letter)?;
            }
            if node.is_terminal {
                write!(f, " | ({})", self.spell(id))?;
            }
            writeln!(f)?;
            frontier.extend(node.children().rev().map(|(_, child)| (child, depth + 1)));
        }
        Ok(())
    }
}
