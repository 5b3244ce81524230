//! Pronunciation practice: judging speech recognition output against a target word.
//!
//! Recognition and synthesis are platform services (a browser, a mobile OS, a
//! desktop engine). They are reached through [`SpeechPlatform`] so the judging
//! logic runs anywhere, including tests.

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;
use crate::matching::{levenshtein_distance, normalize_word};
use crate::types::Difficulty;

/// Recognizer confidence an approximate match must exceed.
pub const MIN_FUZZY_CONFIDENCE: f64 = 0.8;

/// One ranked hypothesis from a speech recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f64,
}

impl Alternative {
    pub fn new(transcript: impl Into<String>, confidence: f64) -> Self {
        Self {
            transcript: transcript.into(),
            confidence,
        }
    }
}

/// Outcome of judging one recognition event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub success: bool,
    /// First alternative as heard, before normalization.
    pub transcript: String,
    /// Smallest edit distance among the alternatives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_distance: Option<usize>,
    /// Largest distance an approximate match may have.
    pub threshold: usize,
}

/// Edit distance tolerated for a target of `len` characters: floor(0.2 * len).
pub fn distance_threshold(len: usize) -> usize {
    len / 5
}

/// Judge recognizer alternatives against a target word.
///
/// An alternative matches when its normalized transcript equals the normalized
/// target, or when it is within [`distance_threshold`] edits and the recognizer
/// was more than [`MIN_FUZZY_CONFIDENCE`] sure of it. A target that normalizes
/// to nothing never matches.
pub fn evaluate(target: &str, alternatives: &[Alternative]) -> Evaluation {
    let target = normalize_word(target);
    let threshold = distance_threshold(target.chars().count());

    let mut success = false;
    let mut best_distance: Option<usize> = None;

    if !target.is_empty() {
        for alt in alternatives {
            let heard = normalize_word(&alt.transcript);
            let distance = levenshtein_distance(&heard, &target);
            best_distance = Some(best_distance.map_or(distance, |d| d.min(distance)));

            if heard == target || (distance <= threshold && alt.confidence > MIN_FUZZY_CONFIDENCE) {
                success = true;
            }
        }
    }

    Evaluation {
        success,
        transcript: alternatives
            .first()
            .map(|a| a.transcript.clone())
            .unwrap_or_default(),
        best_distance,
        threshold,
    }
}

/// Recognizer configuration handed to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerSettings {
    pub continuous: bool,
    pub interim_results: bool,
    pub lang: String,
    pub max_alternatives: u8,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            continuous: false,
            interim_results: false,
            lang: "en-US".to_string(),
            max_alternatives: 5,
        }
    }
}

/// Voice used when reading a word aloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// Feedback sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Success,
    Failure,
}

/// Speech services provided by the host platform.
pub trait SpeechPlatform {
    /// Listen once and return ranked alternatives.
    fn recognize(&mut self, settings: &RecognizerSettings) -> Result<Vec<Alternative>, SpeechError>;

    /// Read `text` aloud.
    fn synthesize(&mut self, text: &str, voice: &VoiceSettings) -> Result<(), SpeechError>;

    fn play_sound(&mut self, cue: SoundCue);
}

/// Running totals for a drill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillStats {
    pub attempts: u32,
    pub successes: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// A pronunciation drill over a fixed word list.
///
/// Each round reads the current word aloud, listens, judges the result and
/// plays a feedback cue. The drill moves to the next word only after a success.
#[derive(Debug, Clone)]
pub struct PronunciationDrill {
    words: Vec<String>,
    index: usize,
    stats: DrillStats,
    pub recognizer: RecognizerSettings,
    pub voice: VoiceSettings,
}

impl PronunciationDrill {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            index: 0,
            stats: DrillStats::default(),
            recognizer: RecognizerSettings::default(),
            voice: VoiceSettings::default(),
        }
    }

    /// Drill over the built-in practice list for a difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::new(
            practice_words(difficulty)
                .iter()
                .map(|w| w.to_string())
                .collect(),
        )
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.words.len()
    }

    pub fn stats(&self) -> &DrillStats {
        &self.stats
    }

    /// Move past the current word without attempting it. Breaks the streak.
    pub fn skip(&mut self) {
        if !self.is_finished() {
            self.index += 1;
            self.stats.streak = 0;
        }
    }

    /// Play one round against the platform.
    ///
    /// Recognition errors are returned as-is and leave the stats untouched;
    /// the caller decides when to listen again. Returns `Ok(None)` once every
    /// word has been practiced.
    pub fn play_round<P: SpeechPlatform>(
        &mut self,
        platform: &mut P,
    ) -> Result<Option<Evaluation>, SpeechError> {
        let Some(word) = self.current_word().map(str::to_string) else {
            return Ok(None);
        };

        platform.synthesize(&word, &self.voice)?;
        let alternatives = platform.recognize(&self.recognizer)?;
        let evaluation = evaluate(&word, &alternatives);

        self.stats.attempts += 1;
        if evaluation.success {
            self.stats.successes += 1;
            self.stats.streak += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.stats.streak);
            self.index += 1;
            platform.play_sound(SoundCue::Success);
        } else {
            self.stats.streak = 0;
            platform.play_sound(SoundCue::Failure);
        }

        Ok(Some(evaluation))
    }
}

const EASY_WORDS: &[&str] = &[
    "cat", "dog", "sun", "book", "tree", "fish", "milk", "bird", "rain", "cake",
];

const MEDIUM_WORDS: &[&str] = &[
    "garden", "window", "yellow", "pencil", "orange", "rabbit", "kitchen", "morning", "teacher",
    "blanket",
];

const HARD_WORDS: &[&str] = &[
    "elephant",
    "beautiful",
    "adventure",
    "chocolate",
    "vegetable",
    "comfortable",
    "temperature",
    "necessary",
    "restaurant",
    "pronunciation",
];

/// Built-in practice words for a difficulty.
pub fn practice_words(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => EASY_WORDS,
        Difficulty::Medium => MEDIUM_WORDS,
        Difficulty::Hard => HARD_WORDS,
    }
}
