//! Timed exams: answer tracking, progress and multi-part scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ExamError;
use crate::matching::compare_answers;
use crate::types::MatchingMode;

/// An exam made of titled parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    /// Percentage needed to pass, 0-100.
    #[serde(default = "default_pass_percentage")]
    pub pass_percentage: f64,
    pub parts: Vec<ExamPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamPart {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct: usize,
    },
    Typed {
        answer: String,
        #[serde(default)]
        matching_mode: MatchingMode,
        #[serde(default = "default_fuzzy_threshold")]
        fuzzy_threshold: f64,
    },
}

/// A candidate's answer: an option index or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Text(String),
}

fn default_pass_percentage() -> f64 {
    60.0
}

fn default_points() -> u32 {
    1
}

fn default_fuzzy_threshold() -> f64 {
    0.8
}

impl Exam {
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.parts.iter().flat_map(|p| p.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }
}

impl Question {
    /// Points earned for `answer`.
    fn grade(&self, answer: &Answer) -> u32 {
        let correct = match (&self.kind, answer) {
            (QuestionKind::MultipleChoice { correct, .. }, Answer::Choice(choice)) => {
                choice == correct
            }
            (
                QuestionKind::Typed {
                    answer: expected,
                    matching_mode,
                    fuzzy_threshold,
                },
                Answer::Text(text),
            ) => compare_answers(text, expected, *matching_mode, *fuzzy_threshold).is_correct,
            _ => false,
        };
        if correct {
            self.points
        } else {
            0
        }
    }
}

/// How far through an exam the candidate is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartResult {
    pub title: String,
    pub earned: u64,
    pub possible: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub parts: Vec<PartResult>,
    pub earned: u64,
    pub possible: u64,
    pub percentage: f64,
    pub passed: bool,
}

/// One candidate's answers to an exam.
#[derive(Debug, Clone)]
pub struct ExamAttempt<'a> {
    exam: &'a Exam,
    answers: HashMap<String, Answer>,
}

impl<'a> ExamAttempt<'a> {
    pub fn new(exam: &'a Exam) -> Self {
        Self {
            exam,
            answers: HashMap::new(),
        }
    }

    /// Record or replace the answer to a question.
    pub fn answer(&mut self, question_id: &str, answer: Answer) -> Result<(), ExamError> {
        let question = self
            .exam
            .question(question_id)
            .ok_or_else(|| ExamError::UnknownQuestion(question_id.to_string()))?;

        match (&question.kind, &answer) {
            (QuestionKind::MultipleChoice { options, .. }, Answer::Choice(choice)) => {
                if *choice >= options.len() {
                    return Err(ExamError::ChoiceOutOfRange {
                        question: question_id.to_string(),
                        choice: *choice,
                    });
                }
            }
            (QuestionKind::Typed { .. }, Answer::Text(_)) => {}
            _ => return Err(ExamError::AnswerKindMismatch(question_id.to_string())),
        }

        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Withdraw an answer. Returns whether one was recorded.
    pub fn clear(&mut self, question_id: &str) -> bool {
        self.answers.remove(question_id).is_some()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn progress(&self) -> Progress {
        let total = self.exam.questions().count();
        let answered = self.answers.len();
        let percent = if total == 0 {
            0.0
        } else {
            answered as f64 / total as f64 * 100.0
        };
        Progress {
            answered,
            total,
            percent,
        }
    }

    pub fn score(&self) -> ExamResult {
        let parts: Vec<PartResult> = self
            .exam
            .parts
            .iter()
            .map(|part| PartResult {
                title: part.title.clone(),
                earned: part
                    .questions
                    .iter()
                    .filter_map(|q| self.answers.get(&q.id).map(|a| u64::from(q.grade(a))))
                    .sum(),
                possible: part.questions.iter().map(|q| u64::from(q.points)).sum(),
            })
            .collect();

        // Totals are u64 so client-supplied u32 points cannot overflow.
        let earned: u64 = parts.iter().map(|p| p.earned).sum();
        let possible: u64 = parts.iter().map(|p| p.possible).sum();
        let percentage = if possible == 0 {
            0.0
        } else {
            earned as f64 / possible as f64 * 100.0
        };

        ExamResult {
            parts,
            earned,
            possible,
            percentage,
            passed: possible > 0 && percentage >= self.exam.pass_percentage,
        }
    }
}
