use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::str::FromStr;

lazy_static! {
    static ref CYRILLIC: Regex = Regex::new(r"(?i)\b[а-яё-]+\b").unwrap();
    static ref CYRILLIC_LATIN: Regex = Regex::new(r"(?i)\b[а-яёa-z]+\b").unwrap();
}

/// Which letter class counts as "word characters" during tokenization.
///
/// The script/charset is a deployment choice, not a structural one: anything
/// that is not a recognized name is treated as a custom regex pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alphabet {
    /// Cyrillic letters plus the connecting hyphen: `[а-яё-]+`
    Cyrillic,
    /// Cyrillic and Latin letters: `[а-яёa-z]+`
    CyrillicLatin,
    /// A caller-supplied pattern, compiled case-insensitively.
    Pattern(String),
}

impl FromStr for Alphabet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "cyrillic" | "ru" => Alphabet::Cyrillic,
            "cyrillic-latin" | "ru-en" => Alphabet::CyrillicLatin,
            other => Alphabet::Pattern(other.to_string()),
        })
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::CyrillicLatin
    }
}

/// Extracts candidate words from raw text: maximal runs of the allowed letter
/// class, lowercased, deduplicated to the first occurrence, in first-seen
/// order. That order is the order correction proceeds in.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new(alphabet: &Alphabet) -> Result<Self> {
        let pattern = match alphabet {
            Alphabet::Cyrillic => CYRILLIC.clone(),
            Alphabet::CyrillicLatin => CYRILLIC_LATIN.clone(),
            Alphabet::Pattern(p) => Regex::new(&format!("(?i){p}"))
                .with_context(|| format!("invalid alphabet pattern: {p}"))?,
        };
        Ok(Self { pattern })
    }

    /// Total over any UTF-8 input; worst case yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();

        for m in self.pattern.find_iter(text) {
            let token = m.as_str().to_lowercase();
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(alphabet: Alphabet) -> Tokenizer {
        Tokenizer::new(&alphabet).unwrap()
    }

    #[test]
    fn dedups_case_insensitively_in_first_seen_order() {
        let t = tokenizer(Alphabet::CyrillicLatin);
        assert_eq!(t.tokenize("Привет, привет! Мир."), ["привет", "мир"]);
    }

    #[test]
    fn punctuation_and_digits_are_separators() {
        let t = tokenizer(Alphabet::CyrillicLatin);
        assert_eq!(t.tokenize("раз1два,три"), ["раз", "два", "три"]);
    }

    #[test]
    fn latin_excluded_by_cyrillic_alphabet() {
        let t = tokenizer(Alphabet::Cyrillic);
        assert_eq!(t.tokenize("кто-то word слово"), ["кто-то", "слово"]);

        let t = tokenizer(Alphabet::CyrillicLatin);
        assert_eq!(t.tokenize("мир word"), ["мир", "word"]);
    }

    #[test]
    fn tokenization_is_total() {
        let t = tokenizer(Alphabet::CyrillicLatin);
        assert!(t.tokenize("").is_empty());
        assert!(t.tokenize("123 !!! ---").is_empty());
    }

    #[test]
    fn custom_pattern() {
        let t = tokenizer(Alphabet::Pattern(r"\b[a-z']+\b".into()));
        assert_eq!(t.tokenize("Don't СТОП panic"), ["don't", "panic"]);
    }

    #[test]
    fn alphabet_names_parse() {
        assert_eq!("cyrillic".parse::<Alphabet>().unwrap(), Alphabet::Cyrillic);
        assert_eq!(
            "ru-en".parse::<Alphabet>().unwrap(),
            Alphabet::CyrillicLatin
        );
        assert_eq!(
            r"[a-z]+".parse::<Alphabet>().unwrap(),
            Alphabet::Pattern(r"[a-z]+".into())
        );
    }
}
