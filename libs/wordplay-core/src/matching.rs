//! Approximate string matching for spoken and typed answers.

use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
}

/// Normalize a spoken or typed word for comparison.
///
/// Lowercases and drops whitespace and punctuation, so `"Don't!"` becomes
/// `"dont"`.
pub fn normalize_word(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_punctuation() && !is_unicode_punctuation(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// Covers curly quotes and dashes that speech recognizers like to emit.
fn is_unicode_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2014}' | '\u{2026}' | '\u{00BF}' | '\u{00A1}'
    )
}

/// Compare a typed answer to the correct answer.
pub fn compare_answers(
    typed: &str,
    correct: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    let typed = normalize_whitespace(typed);
    let correct = normalize_whitespace(correct);

    let (is_correct, similarity) = match mode {
        MatchingMode::Exact => {
            let same = typed == correct;
            (same, if same { 1.0 } else { 0.0 })
        }
        MatchingMode::CaseInsensitive => {
            let same = typed.to_lowercase() == correct.to_lowercase();
            (same, if same { 1.0 } else { 0.0 })
        }
        MatchingMode::Fuzzy => {
            let similarity =
                normalized_similarity(&typed.to_lowercase(), &correct.to_lowercase());
            (similarity >= fuzzy_threshold, similarity)
        }
    };

    MatchResult {
        is_correct,
        similarity,
        matching_mode: mode,
    }
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Calculate normalized similarity (0.0 to 1.0) based on Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
