pub mod cli;
pub mod config;
pub mod corrector;
pub mod pipeline;

pub use config::Config;
pub use corrector::dictionary::DictionaryIndex;
pub use corrector::Corrector;

/// Outcome of correcting a single token.
///
/// `distance` is the edit distance between `input` and `output`: zero when the
/// word was already in the dictionary or when correction failed open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub input: String,
    pub output: String,
    pub distance: usize,
}

impl Correction {
    /// Identity result: the word is kept as-is.
    pub fn unchanged(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            input: word.clone(),
            output: word,
            distance: 0,
        }
    }

    pub fn changed(&self) -> bool {
        self.input != self.output
    }
}
