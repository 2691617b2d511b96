use crate::dictionary::LetterTree;
use crate::error::{GhostError, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Normalizes one dictionary entry.
///
/// Surrounding whitespace is trimmed and ASCII letters are uppercased. What remains
/// must be one or more of the letters `A-Z`.
///
/// # Arguments
/// * `line`: The 1-based line (or list position) of the entry, used in the error.
/// * `raw`: The entry as read.
///
/// # Returns
/// * `Ok(String)` holding the uppercase word.
/// * `Err(GhostError::InvalidDictionaryEntry)` if the entry is empty or contains
///   anything other than letters (digits, apostrophes, inner spaces, accented letters).
///
/// # Examples
/// ```
/// use ghost_solver::utils::parse_entry;
///
/// assert_eq!(parse_entry(1, "  ghost\n").unwrap(), "GHOST");
/// assert!(parse_entry(2, "o'clock").is_err());
/// ```
pub fn parse_entry(line: usize, raw: &str) -> Result<String> {
    let word = raw.trim().to_ascii_uppercase();
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(GhostError::InvalidDictionaryEntry {
            line,
            entry: raw.trim().to_string(),
        });
    }
    Ok(word)
}

/// Builds a dictionary from a source holding one word per line.
///
/// Every line must hold one word, so a blank line is as malformed as one with
/// digits in it. The first malformed or overlapping entry aborts the whole load.
pub fn dictionary_from_reader<R: BufRead>(reader: R) -> Result<LetterTree> {
    let mut tree = LetterTree::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line =
            line.map_err(|e| GhostError::io(format!("read dictionary line {}", line_no), e))?;
        let word = parse_entry(line_no, &line)?;
        tree.insert(line_no, &word)?;
    }
    Ok(tree)
}

/// Opens `path` and loads it with [`dictionary_from_reader`].
pub fn dictionary_from_file<P: AsRef<Path>>(path: P) -> Result<LetterTree> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| GhostError::io(format!("open dictionary '{}'", path.display()), e))?;
    let tree = dictionary_from_reader(BufReader::new(file))?;
    log::info!(
        "loaded {} words ({} nodes) from {}",
        tree.word_count(),
        tree.node_count(),
        path.display()
    );
    Ok(tree)
}

/// Result of [`prefix_free`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixFree {
    /// Words that survive, sorted and unique.
    pub kept: Vec<String>,
    /// Words removed because a shorter kept word is their prefix.
    pub dropped: Vec<String>,
}

/// Reduces a raw word list to one that [`LetterTree::build`] accepts.
///
/// In Ghost a longer word can never be reached once its stem is a word, so only
/// the shortest stem is kept. Entries are normalized like dictionary lines and
/// duplicates collapse to one. Blank entries are ignored.
///
/// # Examples
/// ```
/// use ghost_solver::utils::prefix_free;
///
/// let filtered = prefix_free(["cats", "cat", "dog", "catalog"]).unwrap();
/// assert_eq!(filtered.kept, vec!["CAT", "DOG"]);
/// assert_eq!(filtered.dropped, vec!["CATALOG", "CATS"]);
/// ```
pub fn prefix_free<I, S>(words: I) -> Result<PrefixFree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique = BTreeSet::new();
    for (i, raw) in words.into_iter().enumerate() {
        if raw.as_ref().trim().is_empty() {
            continue;
        }
        unique.insert(parse_entry(i + 1, raw.as_ref())?);
    }

    // Sorted order puts a stem directly before everything that extends it.
    let mut result = PrefixFree::default();
    for word in unique {
        let extends_stem = result
            .kept
            .last()
            .is_some_and(|stem| word.starts_with(stem.as_str()));
        if extends_stem {
            log::debug!("dropping {}", word);
            result.dropped.push(word);
        } else {
            result.kept.push(word);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_entry_valid() {
        assert_eq!(parse_entry(1, "cat").unwrap(), "CAT");
        assert_eq!(parse_entry(1, "\tDoG  ").unwrap(), "DOG");
    }

    #[test]
    fn test_parse_entry_invalid() {
        let err = parse_entry(4, "x-ray").unwrap_err();
        assert!(err.to_string().contains("'x-ray' on line 4"));
        assert!(parse_entry(1, "").is_err());
        assert!(parse_entry(1, "café").is_err());
        assert!(parse_entry(1, "ice cream").is_err());
    }

    #[test]
    fn test_dictionary_from_reader_valid() {
        let source = "cat\nDOG\n  cab\n";
        let tree = dictionary_from_reader(Cursor::new(source)).unwrap();
        assert_eq!(tree.word_count(), 3);
        assert!(tree.node(tree.lookup("CAB").unwrap()).is_terminal());
    }

    #[test]
    fn test_dictionary_from_reader_reports_source_line() {
        let source = "cat\ndog\nd0g\n";
        let err = dictionary_from_reader(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, GhostError::InvalidDictionaryEntry { line: 3, .. }));

        let source = "cat\ndog\ncats\n";
        let err = dictionary_from_reader(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, GhostError::OverlappingWordStem { line: 3, .. }));
    }

    #[test]
    fn test_dictionary_from_reader_rejects_blank_lines() {
        let err = dictionary_from_reader(Cursor::new("cat\n\ndog\n")).unwrap_err();
        assert!(matches!(err, GhostError::InvalidDictionaryEntry { line: 2, .. }));

        let err = dictionary_from_reader(Cursor::new("cat\n   \t\ndog\n")).unwrap_err();
        assert!(matches!(err, GhostError::InvalidDictionaryEntry { line: 2, .. }));
    }

    #[test]
    fn test_dictionary_from_file_missing() {
        let err = dictionary_from_file("/nonexistent/ghost_words").unwrap_err();
        assert!(matches!(err, GhostError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ghost_words"));
    }

    #[test]
    fn test_dictionary_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("ghost_words_{}", std::process::id()));
        std::fs::write(&path, "about\nboat\nhello\n").unwrap();
        let tree = dictionary_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tree.word_count(), 3);
    }

    #[test]
    fn test_bundled_word_list_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("ghost_words");
        let tree = dictionary_from_file(path).unwrap();
        assert!(tree.word_count() > 0);
        assert!(tree.node(tree.lookup("GHOST").unwrap()).is_terminal());
    }

    #[test]
    fn test_prefix_free_output_always_builds() {
        let raw = ["a", "ab", "abc", "b", "ba", "cat", "cats", "catalog", "dog", "dog", "do"];
        let filtered = prefix_free(raw).unwrap();
        assert_eq!(filtered.kept, vec!["A", "B", "CAT", "DO"]);
        assert_eq!(filtered.dropped, vec!["AB", "ABC", "BA", "CATALOG", "CATS", "DOG"]);
        assert!(LetterTree::build(&filtered.kept).is_ok());
    }

    #[test]
    fn test_prefix_free_rejects_bad_entries() {
        let err = prefix_free(["cat", "", "r2d2"]).unwrap_err();
        assert!(matches!(err, GhostError::InvalidDictionaryEntry { line: 3, .. }));
    }
}
