use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The fatal case: no corrections can be attempted without a dictionary.
    #[error("failed to read dictionary {path}: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable dictionary built once at startup: a lowercase membership set plus
/// words bucketed by char count for candidate pruning.
///
/// Within a bucket, words keep their source-list order; duplicates in the
/// source list are kept so that "first occurrence" stays well-defined during
/// nearest-neighbor tie-breaks. The membership set dedups naturally.
#[derive(Debug)]
pub struct DictionaryIndex {
    members: HashSet<String>,
    buckets: HashMap<usize, Vec<String>>,
    ordered: Vec<String>,
}

impl DictionaryIndex {
    /// Load a newline-delimited word list: strip whitespace, drop blank
    /// lines, lowercase every entry.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let file = File::open(path).map_err(|source| DictionaryError::Missing {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| DictionaryError::Missing {
                path: path.to_path_buf(),
                source,
            })?;
            lines.push(line);
        }

        Ok(Self::from_words(lines.iter().map(String::as_str)))
    }

    /// Build the index from an in-memory word sequence, preserving order.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut members = HashSet::new();
        let mut buckets: HashMap<usize, Vec<String>> = HashMap::new();
        let mut ordered = Vec::new();

        for word in words {
            let word = word.trim();
            if word.is_empty() {
                continue;
            }
            let word = word.to_lowercase();
            let len = word.chars().count();

            members.insert(word.clone());
            buckets.entry(len).or_default().push(word.clone());
            ordered.push(word);
        }

        Self {
            members,
            buckets,
            ordered,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    /// Words of exactly `len` chars, in source-list order. Empty for lengths
    /// that never occurred.
    pub fn bucket(&self, len: usize) -> &[String] {
        self.buckets.get(&len).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every loaded word (duplicates included) in source-list order.
    pub fn words(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_strips_and_lowercases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  Привет  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "МИР").unwrap();
        file.flush().unwrap();

        let index = DictionaryIndex::load(file.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("привет"));
        assert!(index.contains("мир"));
        assert!(!index.contains("Привет"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = DictionaryIndex::load(Path::new("/nonexistent/russian.utf-8")).unwrap_err();
        assert!(err.to_string().contains("failed to read dictionary"));
    }

    #[test]
    fn every_word_lands_in_its_own_length_bucket() {
        let words = ["привет", "мир", "да", "нет", "слово"];
        let index = DictionaryIndex::from_words(words);

        for word in words {
            let len = word.chars().count();
            assert!(index.bucket(len).iter().any(|w| w == word));
            // ...and in no other bucket.
            for other in index.buckets.keys().filter(|&&l| l != len) {
                assert!(!index.bucket(*other).iter().any(|w| w == word));
            }
        }

        let total: usize = index.buckets.values().map(Vec::len).sum();
        assert_eq!(total, index.len());
    }

    #[test]
    fn buckets_preserve_source_order_and_duplicates() {
        let index = DictionaryIndex::from_words(["кот", "рот", "кот"]);
        assert_eq!(index.bucket(3), ["кот", "рот", "кот"]);
        assert_eq!(index.words(), ["кот", "рот", "кот"]);
    }

    #[test]
    fn empty_dictionary_is_permitted() {
        let index = DictionaryIndex::from_words([]);
        assert!(index.is_empty());
        assert!(index.bucket(5).is_empty());
    }
}
