//! Keyword-matched quiz questions and answer grading.

use serde::Serialize;

use crate::mock::catalog;
use crate::study::{QuestionType, QuizQuestion};

const CELL_KEYWORDS: &[&str] = &["cell", "mitochondria", "biology"];
const HISTORY_KEYWORDS: &[&str] = &["revolution", "history", "war"];

/// Questions for a quiz on `topic`. Known topics get the canned question, others a template.
pub fn quiz_for_topic(topic: &str) -> Vec<QuizQuestion> {
    let lower = topic.to_lowercase();
    if CELL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return vec![catalog::powerhouse_question()];
    }
    if HISTORY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return vec![catalog::revolution_question()];
    }

    let topic = topic.trim();
    vec![
        QuizQuestion {
            question_text: format!("Which statement best describes the core idea of {}?", topic),
            question_type: QuestionType::MultipleChoice,
            options: Some(vec![
                format!("A definition that explains what {} is and why it matters", topic),
                "An unrelated historical date".to_string(),
                "A random vocabulary word".to_string(),
                "None of the above".to_string(),
            ]),
            correct_answer: format!("A definition that explains what {} is and why it matters", topic),
            explanation: Some(format!(
                "Start every topic by being able to say what {} is in your own words.",
                topic
            )),
        },
        QuizQuestion {
            question_text: format!("True or false: {} is easier to remember with spaced review.", topic),
            question_type: QuestionType::TrueFalse,
            options: Some(vec!["True".to_string(), "False".to_string()]),
            correct_answer: "True".to_string(),
            explanation: Some("Reviewing at growing intervals moves material into long-term memory.".to_string()),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedAnswer {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Grade `answer` (trimmed, case-insensitive) and attach tutor feedback.
pub fn grade_answer(question: &QuizQuestion, answer: &str) -> GradedAnswer {
    let given = answer.trim();
    let given_lower = given.to_lowercase();
    let correct = given_lower == question.correct_answer.trim().to_lowercase();

    let explanation = if question.question_text == catalog::POWERHOUSE_QUESTION {
        if correct {
            catalog::POWERHOUSE_CORRECT.to_string()
        } else if given_lower == "nucleus" {
            catalog::POWERHOUSE_INCORRECT.to_string()
        } else {
            templated_feedback(question, given, correct)
        }
    } else {
        templated_feedback(question, given, correct)
    };

    GradedAnswer {
        correct,
        correct_answer: question.correct_answer.clone(),
        explanation,
    }
}

fn templated_feedback(question: &QuizQuestion, given: &str, correct: bool) -> String {
    let why = question.explanation.as_deref().unwrap_or_default();
    if correct {
        format!("Great job! {} is correct. {}", question.correct_answer, why)
            .trim_end()
            .to_string()
    } else {
        format!(
            "You answered {}, but the correct answer is {}. {}",
            given, question.correct_answer, why
        )
        .trim_end()
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biology_topic_gets_powerhouse_question() {
        let qs = quiz_for_topic("Cell Biology");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].correct_answer, "Mitochondria");
        assert_eq!(qs[0].options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn history_topic_gets_short_answer() {
        let qs = quiz_for_topic("american revolution");
        assert_eq!(qs[0].question_type, QuestionType::ShortAnswer);
        assert_eq!(qs[0].correct_answer, "1783");
    }

    #[test]
    fn unknown_topic_interpolates() {
        let qs = quiz_for_topic("  plate tectonics ");
        assert_eq!(qs.len(), 2);
        assert!(qs[0].question_text.contains("plate tectonics?"));
    }

    #[test]
    fn grading_uses_canned_feedback_for_powerhouse() {
        let q = catalog::powerhouse_question();
        let right = grade_answer(&q, " mitochondria ");
        assert!(right.correct);
        assert!(right.explanation.starts_with("Excellent!"));

        let wrong = grade_answer(&q, "Nucleus");
        assert!(!wrong.correct);
        assert!(wrong.explanation.starts_with("You chose B (Nucleus)"));

        let other = grade_answer(&q, "Ribosome");
        assert!(other.explanation.starts_with("You answered Ribosome, but the correct answer is Mitochondria."));
    }

    #[test]
    fn grading_folds_non_ascii_case() {
        let q = QuizQuestion {
            question_text: "Which pastry is filled with cream and topped with icing?".to_string(),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: "Éclair".to_string(),
            explanation: None,
        };
        let graded = grade_answer(&q, "éCLAIR");
        assert!(graded.correct);
        assert_eq!(graded.explanation, "Great job! Éclair is correct.");
    }

    #[test]
    fn grading_short_answer() {
        let q = catalog::revolution_question();
        assert!(grade_answer(&q, "1783").correct);
        assert!(!grade_answer(&q, "1776").correct);
    }
}
