//! Study content types shared by the mock workflows and chat-backed generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenerationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Kind of quiz question. Model output may name kinds we don't know; those are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::Other(kind) => kind,
        }
    }
}

impl From<String> for QuestionType {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "multiple-choice" => QuestionType::MultipleChoice,
            "true-false" => QuestionType::TrueFalse,
            "short-answer" => QuestionType::ShortAnswer,
            _ => QuestionType::Other(kind),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GenerationError::InvalidDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tutor feedback on a quiz answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorExplanation {
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_concepts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_resources: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_question_uses_camel_case_wire_names() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"questionText":"Q","questionType":"true-false","correctAnswer":"True"}"#,
        )
        .unwrap();
        assert_eq!(q.question_type, QuestionType::TrueFalse);
        assert!(q.options.is_none());
    }

    #[test]
    fn unknown_question_type_is_kept_verbatim() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"questionText":"Q","questionType":"fill-in-the-blank","correctAnswer":"A"}"#,
        )
        .unwrap();
        assert_eq!(q.question_type, QuestionType::Other("fill-in-the-blank".to_string()));
        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["questionType"], "fill-in-the-blank");
    }

    #[test]
    fn difficulty_rejects_unknown_levels() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "Difficulty must be easy, medium, or hard");
    }
}
