/// Levenshtein distance between two strings, measured in `char`s.
///
/// Classic DP recurrence with two rolling rows instead of a full matrix, so
/// memory stays O(min(len1, len2)). Symmetric, zero iff the operands are
/// identical. No case or whitespace normalization happens here; callers
/// pre-normalize.
pub fn levenshtein(s1: &str, s2: &str) -> usize {
    if s1 == s2 {
        return 0;
    }

    let mut short: Vec<char> = s1.chars().collect();
    let mut long: Vec<char> = s2.chars().collect();

    // The shorter string governs row width; distance is symmetric.
    if short.len() > long.len() {
        std::mem::swap(&mut short, &mut long);
    }

    let width = short.len() + 1;
    let mut previous: Vec<usize> = (0..width).collect();
    let mut current = vec![0usize; width];

    for (i, long_ch) in long.iter().enumerate() {
        current[0] = i + 1;

        for (j, short_ch) in short.iter().enumerate() {
            let add = previous[j + 1] + 1;
            let delete = current[j] + 1;
            let change = previous[j] + usize::from(short_ch != long_ch);
            current[j + 1] = add.min(delete).min(change);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[width - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("привет", "привет"), 0);
    }

    #[test]
    fn empty_versus_any_is_char_count() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        // Cyrillic chars are multi-byte; length must still count chars.
        assert_eq!(levenshtein("", "мир"), 3);
    }

    #[test]
    fn known_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("hello", "hallo"), 1);
        assert_eq!(levenshtein("привет", "превет"), 1);
        assert_eq!(levenshtein("hello", "world"), 4);
    }

    #[test]
    fn symmetry() {
        let pairs = [
            ("kitten", "sitting"),
            ("превет", "привет"),
            ("", "word"),
            ("аб", "ба"),
        ];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn bounds_hold() {
        let pairs = [("abc", "abcdef"), ("мир", "м"), ("xyz", "abc")];
        for (a, b) in pairs {
            let d = levenshtein(a, b);
            let (la, lb) = (a.chars().count(), b.chars().count());
            assert!(d >= la.abs_diff(lb));
            assert!(d <= la.max(lb));
        }
    }
}
