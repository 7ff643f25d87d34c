pub mod dictionary;
pub mod distance;
pub mod symdel;
pub mod tokenizer;

use crate::Correction;
use dictionary::DictionaryIndex;
use distance::levenshtein;

/// A correction backend: total over any input word, never errors.
///
/// Both the length-window scan (`Corrector`) and the symmetric-delete index
/// (`symdel::DeleteIndex`) implement this, so the batch pipeline drives either
/// one unchanged.
pub trait Correct: Sync {
    fn correct(&self, word: &str) -> Correction;
}

/// Nearest-neighbor corrector over a pre-built [`DictionaryIndex`].
///
/// Built once at startup and passed by reference into every call; the index
/// is never mutated afterward.
pub struct Corrector {
    index: DictionaryIndex,
    window_radius: Option<usize>,
}

impl Corrector {
    /// Default configuration: candidates within ±2 chars of the input length.
    pub fn new(index: DictionaryIndex) -> Self {
        Self {
            index,
            window_radius: Some(2),
        }
    }

    /// `Some(r)` restricts candidates to lengths within `r` of the input
    /// (the scalable bulk mode); `None` scans the whole dictionary in source
    /// order (the exhaustive single-word mode).
    pub fn with_window(mut self, window_radius: Option<usize>) -> Self {
        self.window_radius = window_radius;
        self
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    /// Pick the minimum-distance candidate, first one winning ties. The scan
    /// uses a strict `<` so "first encountered" is the documented contract,
    /// not an accident of iteration.
    fn nearest<'a, I>(word: &str, candidates: I) -> Option<Correction>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut best: Option<(&'a String, usize)> = None;

        for candidate in candidates {
            let dist = levenshtein(word, candidate);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((candidate, dist));
            }
        }

        best.map(|(output, distance)| Correction {
            input: word.to_string(),
            output: output.clone(),
            distance,
        })
    }
}

impl Correct for Corrector {
    fn correct(&self, word: &str) -> Correction {
        let word = word.to_lowercase();

        // Dominant fast path: exact members come back untouched, no distance
        // computation.
        if self.index.contains(&word) {
            return Correction::unchanged(word);
        }

        let result = match self.window_radius {
            Some(radius) => {
                let len = word.chars().count();
                let lengths = len.saturating_sub(radius)..=len + radius;
                Self::nearest(&word, lengths.flat_map(|l| self.index.bucket(l)))
            }
            None => Self::nearest(&word, self.index.words()),
        };

        // Empty candidate pool fails open: the word comes back uncorrected.
        result.unwrap_or_else(|| Correction::unchanged(word))
    }
}
