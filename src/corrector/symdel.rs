use std::collections::{BTreeSet, HashMap, HashSet};

use super::dictionary::DictionaryIndex;
use super::distance::levenshtein;
use super::Correct;
use crate::Correction;

/// Symmetric-delete lookup index, the alternate bulk-correction backend.
///
/// Every dictionary word is mapped from each of its delete-edits up to
/// `max_edit_distance`, so lookup only generates deletes of the input instead
/// of the full insert/substitute neighborhood. Candidates are verified with
/// the true Levenshtein distance before ranking; a miss fails open.
pub struct DeleteIndex {
    max_edit_distance: usize,
    words: Vec<String>,
    members: HashSet<String>,
    deletes: HashMap<String, Vec<u32>>,
}

impl DeleteIndex {
    pub fn from_index(index: &DictionaryIndex, max_edit_distance: usize) -> Self {
        Self::build(index.words().iter().map(String::as_str), max_edit_distance)
    }

    pub fn build<'a, I>(words: I, max_edit_distance: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut this = Self {
            max_edit_distance,
            words: Vec::new(),
            members: HashSet::new(),
            deletes: HashMap::new(),
        };

        for word in words {
            let word = word.trim().to_lowercase();
            if word.is_empty() || !this.members.insert(word.clone()) {
                continue;
            }

            let id = this.words.len() as u32;
            for key in this.edit_keys(&word) {
                this.deletes.entry(key).or_default().push(id);
            }
            this.words.push(word);
        }

        this
    }

    /// The word itself plus every delete-edit within the distance cap.
    fn edit_keys(&self, word: &str) -> HashSet<String> {
        let mut keys = HashSet::new();
        keys.insert(word.to_string());
        deletes_up_to(word, self.max_edit_distance, &mut keys);
        keys
    }

    /// Closest dictionary word within `max_edit_distance`, or `None`.
    /// Ties break to the earliest-loaded word.
    pub fn lookup(&self, word: &str) -> Option<(&str, usize)> {
        if self.members.contains(word) {
            return Some((self.words[self.position_of(word)?].as_str(), 0));
        }

        // Ascending load order keeps the tie-break deterministic even though
        // delete generation iterates a hash set.
        let mut candidates: BTreeSet<u32> = BTreeSet::new();
        for key in self.edit_keys(word) {
            if let Some(ids) = self.deletes.get(&key) {
                candidates.extend(ids);
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for id in candidates {
            let candidate = self.words[id as usize].as_str();
            let dist = levenshtein(word, candidate);
            if dist <= self.max_edit_distance && best.map_or(true, |(_, d)| dist < d) {
                best = Some((candidate, dist));
            }
        }

        best
    }

    fn position_of(&self, word: &str) -> Option<usize> {
        self.deletes
            .get(word)?
            .iter()
            .map(|&id| id as usize)
            .find(|&id| self.words[id] == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Correct for DeleteIndex {
    fn correct(&self, word: &str) -> Correction {
        let word = word.to_lowercase();
        match self.lookup(&word) {
            Some((output, distance)) => Correction {
                input: word,
                output: output.to_string(),
                distance,
            },
            None => Correction::unchanged(word),
        }
    }
}

/// Recursively collect delete-edits of `word` down to `depth` removals.
fn deletes_up_to(word: &str, depth: usize, out: &mut HashSet<String>) {
    if depth == 0 || word.is_empty() {
        return;
    }

    let chars: Vec<char> = word.chars().collect();
    for i in 0..chars.len() {
        let shorter: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
        if out.insert(shorter.clone()) {
            deletes_up_to(&shorter, depth - 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(words: &[&str]) -> DeleteIndex {
        DeleteIndex::build(words.iter().copied(), 2)
    }

    #[test]
    fn member_lookup_is_distance_zero() {
        let idx = index(&["привет", "мир"]);
        assert_eq!(idx.lookup("привет"), Some(("привет", 0)));
    }

    #[test]
    fn finds_substitution_within_cap() {
        let idx = index(&["привет", "привед", "мир"]);
        // Substitutions surface via matching delete keys on both sides.
        assert_eq!(idx.lookup("превет"), Some(("привет", 1)));
    }

    #[test]
    fn finds_insertions_and_deletions() {
        let idx = index(&["слово"]);
        assert_eq!(idx.lookup("слов"), Some(("слово", 1)));
        assert_eq!(idx.lookup("сслово"), Some(("слово", 1)));
    }

    #[test]
    fn beyond_cap_fails_open() {
        let idx = index(&["привет"]);
        assert_eq!(idx.lookup("морковь"), None);
        let r = idx.correct("морковь");
        assert_eq!(r.output, "морковь");
        assert_eq!(r.distance, 0);
    }

    #[test]
    fn tie_breaks_to_earliest_loaded() {
        let idx = index(&["рот", "бот"]);
        assert_eq!(idx.lookup("кот"), Some(("рот", 1)));
    }

    #[test]
    fn duplicate_words_are_loaded_once() {
        let idx = index(&["кот", "кот", "рот"]);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn empty_index_fails_open() {
        let idx = index(&[]);
        assert!(idx.is_empty());
        assert_eq!(idx.correct("мир").output, "мир");
    }
}
