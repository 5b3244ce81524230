//! Fixed hint table for the word-chain game.

/// Points deducted for each hint.
pub const HINT_PENALTY: u32 = 2;

const HINTS: &[(char, &[&str])] = &[
    ('a', &["apple", "anchor", "arrow"]),
    ('b', &["banana", "bridge", "button"]),
    ('c', &["candle", "castle", "cloud"]),
    ('d', &["dragon", "desert", "door"]),
    ('e', &["eagle", "engine", "earth"]),
    ('f', &["forest", "feather", "flame"]),
    ('g', &["guitar", "garden", "globe"]),
    ('h', &["harbor", "hammer", "honey"]),
    ('i', &["island", "iron", "igloo"]),
    ('j', &["jungle", "jacket", "jewel"]),
    ('k', &["kettle", "kingdom", "kite"]),
    ('l', &["lemon", "ladder", "lantern"]),
    ('m', &["mountain", "mirror", "magnet"]),
    ('n', &["needle", "number", "night"]),
    ('o', &["ocean", "orange", "owl"]),
    ('p', &["pencil", "planet", "piano"]),
    ('q', &["queen", "quilt", "quiet"]),
    ('r', &["river", "rocket", "rabbit"]),
    ('s', &["sunset", "spider", "silver"]),
    ('t', &["tiger", "tunnel", "tomato"]),
    ('u', &["umbrella", "uniform", "universe"]),
    ('v', &["violin", "valley", "velvet"]),
    ('w', &["window", "wizard", "whale"]),
    ('x', &["xylophone"]),
    ('y', &["yellow", "yogurt", "yacht"]),
    ('z', &["zebra", "zipper", "zero"]),
];

/// First table word for `letter` that is not already in `used`.
pub fn suggest(letter: char, used: &[String]) -> Option<&'static str> {
    let letter = letter.to_ascii_lowercase();
    HINTS
        .iter()
        .find(|(l, _)| *l == letter)
        .and_then(|(_, words)| words.iter().copied().find(|w| !used.iter().any(|u| u == w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_letter_has_hints_that_start_with_it() {
        for (letter, words) in HINTS {
            assert!(!words.is_empty());
            assert!(words.iter().all(|w| w.starts_with(*letter)), "{letter}");
        }
        assert_eq!(HINTS.len(), 26);
    }

    #[test]
    fn skips_words_already_used() {
        let used = vec!["tiger".to_string()];
        assert_eq!(suggest('t', &used), Some("tunnel"));
        assert_eq!(suggest('T', &[]), Some("tiger"));
    }

    #[test]
    fn runs_out() {
        let used = vec!["xylophone".to_string()];
        assert_eq!(suggest('x', &used), None);
        assert_eq!(suggest('7', &[]), None);
    }
}
