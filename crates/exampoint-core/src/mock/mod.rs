//! Mocked study workflows: keyword dispatchers behind fixed delays.
//!
//! Nothing here calls a model. Delays come from [`MockLatency`]; there is no
//! cancellation or retry.

mod catalog;
pub mod flashcards;
pub mod material;
pub mod quiz;
pub mod tutor;

use serde::Serialize;

use crate::config::MockLatency;
use crate::error::MockError;
use crate::study::{Flashcard, QuizQuestion};

pub use flashcards::flashcards_from_text;
pub use material::{describe_upload, UploadedFile};
pub use quiz::{grade_answer, quiz_for_topic, GradedAnswer};
pub use tutor::tutor_response;

/// Acknowledgement for an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub name: String,
    pub size: u64,
}

/// Acknowledgement for pasted study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialReceipt {
    pub characters: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockStudio {
    latency: MockLatency,
}

impl MockStudio {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    pub async fn flashcards_for_topic(&self, topic: &str) -> Result<Vec<Flashcard>, MockError> {
        let topic = non_empty(topic, "a topic")?;
        tokio::time::sleep(self.latency.flashcards()).await;
        let cards = flashcards_from_text(topic);
        tracing::debug!(count = cards.len(), "mock: flashcards generated from topic");
        Ok(cards)
    }

    /// Read failures surface before the simulated processing delay.
    pub async fn flashcards_from_upload(&self, file: &UploadedFile) -> Result<Vec<Flashcard>, MockError> {
        let text = describe_upload(file)?;
        tokio::time::sleep(self.latency.flashcards()).await;
        let cards = flashcards_from_text(&text);
        tracing::debug!(file = %file.name, count = cards.len(), "mock: flashcards generated from upload");
        Ok(cards)
    }

    pub async fn upload_files(&self, files: &[UploadedFile]) -> Vec<UploadReceipt> {
        tokio::time::sleep(self.latency.upload()).await;
        files
            .iter()
            .map(|f| UploadReceipt {
                name: f.name.clone(),
                size: f.size,
            })
            .collect()
    }

    pub async fn submit_material(&self, text: &str) -> Result<MaterialReceipt, MockError> {
        let text = non_empty(text, "some study material")?;
        tokio::time::sleep(self.latency.material()).await;
        Ok(MaterialReceipt {
            characters: text.chars().count(),
        })
    }

    pub async fn quiz(&self, topic: &str) -> Result<Vec<QuizQuestion>, MockError> {
        let topic = non_empty(topic, "a topic")?;
        tokio::time::sleep(self.latency.quiz()).await;
        Ok(quiz_for_topic(topic))
    }

    pub async fn ask_tutor(&self, question: &str) -> Result<String, MockError> {
        let question = non_empty(question, "a question")?;
        tokio::time::sleep(self.latency.tutor()).await;
        Ok(tutor_response(question))
    }
}

fn non_empty<'a>(value: &'a str, what: &'static str) -> Result<&'a str, MockError> {
    let v = value.trim();
    if v.is_empty() {
        Err(MockError::EmptyInput(what))
    } else {
        Ok(v)
    }
}
