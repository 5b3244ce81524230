//! Test fixtures and factory functions for request bodies.

use serde_json::{json, Value};

/// A two-part exam with one multiple-choice and two typed questions.
pub fn sample_exam() -> Value {
    json!({
        "id": "unit-3",
        "title": "Animals",
        "pass_percentage": 70.0,
        "parts": [
            {
                "title": "Listening",
                "questions": [
                    {
                        "id": "q1",
                        "prompt": "Which one is a cat?",
                        "points": 2,
                        "kind": "multiple_choice",
                        "options": ["perro", "gato", "pez"],
                        "correct": 1
                    }
                ]
            },
            {
                "title": "Writing",
                "questions": [
                    {
                        "id": "q2",
                        "prompt": "Translate 'dog'",
                        "kind": "typed",
                        "answer": "perro",
                        "points": 3
                    },
                    {
                        "id": "q3",
                        "prompt": "Translate 'fish'",
                        "kind": "typed",
                        "answer": "pez",
                        "matching_mode": "exact"
                    }
                ]
            }
        ]
    })
}

/// Body for POST /api/exams/score.
pub fn score_exam_request(answers: Value) -> Value {
    json!({ "exam": sample_exam(), "answers": answers })
}

/// Body for POST /api/pronunciation/evaluate.
pub fn evaluate_request(target: &str, alternatives: &[(&str, f64)]) -> Value {
    json!({
        "target": target,
        "alternatives": alternatives
            .iter()
            .map(|(transcript, confidence)| json!({ "transcript": transcript, "confidence": confidence }))
            .collect::<Vec<_>>()
    })
}
