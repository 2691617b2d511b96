//! Error types for the Ghost solver.

use thiserror::Error;

/// Everything that can go wrong while loading a dictionary, querying it or
/// reading a player's turn.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GhostError {
    /// A dictionary line is not made purely of the letters A-Z.
    #[error("invalid dictionary entry '{entry}' on line {line} (expected letters A-Z only)")]
    InvalidDictionaryEntry { line: usize, entry: String },

    /// A word shares a stem with an earlier word: one of them is a prefix of the other.
    #[error("word '{word}' on line {line} overlaps the stem of another word")]
    OverlappingWordStem { line: usize, word: String },

    /// No dictionary word starts with this exact letter sequence.
    #[error("no word in the dictionary starts with '{path}'")]
    InvalidPath { path: String },

    #[error("unrecognized turn '{input}' (expected a letter, 'bluff' or 'surrender')")]
    InvalidTurn { input: String },

    #[error("a game needs at least {needed} players, got {got}")]
    NotEnoughPlayers { needed: usize, got: usize },

    #[error("the game is over; {winner} has won")]
    GameOver { winner: String },

    #[error("failed to {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl GhostError {
    /// Wraps an I/O failure with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        GhostError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GhostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_line() {
        let err = GhostError::InvalidDictionaryEntry {
            line: 7,
            entry: "DON'T".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid dictionary entry 'DON'T' on line 7 (expected letters A-Z only)"
        );

        let err = GhostError::OverlappingWordStem {
            line: 2,
            word: "CATS".to_string(),
        };
        assert!(err.to_string().contains("'CATS' on line 2"));
    }

    #[test]
    fn test_io_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = GhostError::io("open dictionary 'words'", source);
        // The cause is reported through `source()`, not repeated in the message.
        assert_eq!(err.to_string(), "failed to open dictionary 'words'");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "missing");
    }
}
