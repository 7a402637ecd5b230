//! Uploaded study material -> source text for flashcard generation.

use serde::{Deserialize, Serialize};

use crate::error::MockError;

/// Descriptor of a file the client already read. `text` is present for text files only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub text: Option<String>,
}

impl UploadedFile {
    pub fn is_text(&self) -> bool {
        self.mime.contains("text") || self.name.ends_with(".txt")
    }
}

/// Text to feed the flashcard dispatcher. Non-text files become a metadata placeholder.
pub fn describe_upload(file: &UploadedFile) -> Result<String, MockError> {
    if file.is_text() {
        return file
            .text
            .clone()
            .ok_or_else(|| MockError::Unreadable(file.name.clone()));
    }
    Ok(format!(
        "[File uploaded: {}]\n\nFile type: {}\nFile size: {:.2} KB\n\n\
         In production, this content would be extracted and analyzed using AI to generate relevant flashcards.",
        file.name,
        file.mime,
        file.size as f64 / 1024.0
    ))
}
