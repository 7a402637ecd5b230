//! Chat-completion bridge for AI flashcards, quiz questions and tutor explanations.
//!
//! Every request is a system/user message pair sent to an OpenAI-compatible
//! endpoint with a fixed model and routing headers. The model is asked to
//! answer with bare JSON inside `choices[0].message.content`; that text is
//! parsed with only array/object shape checks. Nothing is retried.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ChatConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::study::{Difficulty, Flashcard, QuestionType, QuizQuestion, TutorExplanation};

const DEFAULT_FLASHCARD_COUNT: u32 = 5;
const DEFAULT_QUESTION_COUNT: u32 = 5;

static DEFAULT_QUESTION_TYPES: [QuestionType; 2] = [QuestionType::MultipleChoice, QuestionType::TrueFalse];

/// Routing headers expected by the chat-completion proxy.
pub const ROUTE_HEADERS: [(&str, &str); 3] = [
    ("X-CREAO-API-NAME", "OpenAIGPTChat"),
    ("X-CREAO-API-PATH", "/v1/ai/zWwyutGgvEGWwzSa/chat/completions"),
    ("X-CREAO-API-ID", "688a0b64dc79a2533460892c"),
];

/// Anything that can turn a system/user prompt pair into the model's text reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `what` names the artifact being generated and is used in error messages.
    async fn complete(&self, what: &'static str, system: &str, user: &str) -> GenerationResult<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageResponse>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// reqwest-backed [`ChatBackend`].
pub struct ChatCompletionClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl ChatCompletionClient {
    /// Build from config. `Ok(None)` when no endpoint is configured.
    pub fn from_config(cfg: &ChatConfig) -> Result<Option<Self>, reqwest::Error> {
        let Some(endpoint) = cfg.endpoint() else {
            return Ok(None);
        };
        let client = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Some(Self {
            endpoint: endpoint.to_string(),
            api_key: cfg.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: cfg.model.clone(),
            client,
        }))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatBackend for ChatCompletionClient {
    async fn complete(&self, what: &'static str, system: &str, user: &str) -> GenerationResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut req = self.client.post(&self.endpoint).json(&body);
        for (name, value) in ROUTE_HEADERS {
            req = req.header(name, value);
        }
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        tracing::debug!(what, model = %self.model, "chat: sending completion request");
        let res = req.send().await.map_err(|e| GenerationError::Upstream {
            what,
            detail: e.to_string(),
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| GenerationError::Upstream {
            what,
            detail: e.to_string(),
        })?;
        if !status.is_success() {
            tracing::warn!(what, status = status.as_u16(), "chat: upstream error");
            return Err(GenerationError::Upstream {
                what,
                detail: format!("HTTP {}: {}", status.as_u16(), text),
            });
        }

        extract_content(&text)
    }
}

/// Pull `choices[0].message.content` out of a raw response body.
pub fn extract_content(body: &str) -> GenerationResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|_| GenerationError::NoData)?;
    parsed
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .ok_or(GenerationError::NoContent)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashcardRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub question_types: Option<Vec<QuestionType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub context: Option<String>,
}

/// Prompt building and response validation on top of a [`ChatBackend`].
pub struct StudyGenerator<B> {
    backend: B,
}

impl<B: ChatBackend> StudyGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn generate_flashcards(&self, input: &FlashcardRequest) -> GenerationResult<Vec<Flashcard>> {
        let topic = non_blank(input.topic.as_deref());
        let content = non_blank(input.content.as_deref());
        let source = content
            .or(topic)
            .ok_or(GenerationError::MissingInput("Either topic or content is required"))?;
        let count = input.count.filter(|c| *c > 0).unwrap_or(DEFAULT_FLASHCARD_COUNT);

        let system = format!(
            "You are an educational AI that creates high-quality flashcards for studying.\n\
             Generate exactly {count} flashcards based on the provided material.\n\
             Return ONLY a valid JSON array of objects, each with \"question\" and \"answer\" string properties.\n\
             Do not include any markdown formatting, code blocks, or additional text.\n\
             Example format: [{{\"question\":\"Q1\",\"answer\":\"A1\"}},{{\"question\":\"Q2\",\"answer\":\"A2\"}}]"
        );
        let user = if content.is_some() {
            format!("Create {count} flashcards from this study material:\n\n{source}")
        } else {
            format!("Create {count} flashcards about: {source}")
        };

        let raw = self.backend.complete("flashcards", &system, &user).await?;
        parse_flashcards(&raw)
    }

    pub async fn generate_quiz_questions(&self, input: &QuizRequest) -> GenerationResult<Vec<QuizQuestion>> {
        if input.subject.trim().is_empty() || input.topic.trim().is_empty() {
            return Err(GenerationError::MissingInput("Subject and topic are required"));
        }
        let count = input.count.filter(|c| *c > 0).unwrap_or(DEFAULT_QUESTION_COUNT);
        let types: Vec<&str> = match &input.question_types {
            Some(t) if !t.is_empty() => t.iter().map(QuestionType::as_str).collect(),
            _ => DEFAULT_QUESTION_TYPES.iter().map(QuestionType::as_str).collect(),
        };
        let difficulty = input.difficulty;

        let system = format!(
            "You are an educational AI that creates quiz questions.\n\
             Generate exactly {count} quiz questions for {difficulty} difficulty level.\n\
             Question types: {listed}.\n\
             Return ONLY a valid JSON array of objects with these properties:\n\
             - questionText: string\n\
             - questionType: \"{alternatives}\"\n\
             - options: string[] (only for multiple-choice, with 4 options)\n\
             - correctAnswer: string\n\
             - explanation: string (brief explanation)\n\n\
             Do not include markdown formatting or code blocks.\n\
             Example: [{{\"questionText\":\"Q\",\"questionType\":\"multiple-choice\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"correctAnswer\":\"A\",\"explanation\":\"Why A is correct\"}}]",
            listed = types.join(", "),
            alternatives = types.join("\" | \""),
        );
        let user = format!(
            "Create {count} {difficulty} difficulty quiz questions about {} in {}.",
            input.topic, input.subject
        );

        let raw = self.backend.complete("quiz questions", &system, &user).await?;
        parse_quiz_questions(&raw)
    }

    pub async fn generate_tutor_explanation(&self, input: &ExplanationRequest) -> GenerationResult<TutorExplanation> {
        if input.question_text.trim().is_empty()
            || input.user_answer.trim().is_empty()
            || input.correct_answer.trim().is_empty()
        {
            return Err(GenerationError::MissingInput(
                "Question text, user answer, and correct answer are required",
            ));
        }

        let system = "You are a patient, encouraging AI tutor.\n\
                      Provide a clear, educational explanation about the answer.\n\
                      Return ONLY a valid JSON object with these properties:\n\
                      - explanation: string (2-3 sentences explaining the concept and why the answer is correct/incorrect)\n\
                      - keyConcepts: string[] (2-4 key concepts related to this question)\n\
                      - additionalResources: string[] (optional, 1-2 study tips)\n\n\
                      Do not include markdown formatting or code blocks.\n\
                      Example: {\"explanation\":\"...\",\"keyConcepts\":[\"concept1\",\"concept2\"],\"additionalResources\":[\"tip1\"]}";

        let (opening, ask) = if input.is_correct {
            (
                "The student answered correctly!",
                "Explain why this answer is correct and reinforce the key concepts.",
            )
        } else {
            (
                "The student answered incorrectly.",
                "Gently explain what the correct answer is and why, and help them understand the concept better.",
            )
        };
        let mut user = format!(
            "{opening}\nQuestion: {}\nTheir answer: {}\nCorrect answer: {}\n\n{ask}",
            input.question_text, input.user_answer, input.correct_answer
        );
        if let Some(ctx) = non_blank(input.context.as_deref()) {
            user.push_str("\n\nContext: ");
            user.push_str(ctx);
        }

        let raw = self.backend.complete("tutor explanation", system, &user).await?;
        parse_explanation(&raw)
    }
}

// Model output is only checked for shape (non-empty array, object with an
// explanation). Individual fields are read leniently.

pub fn parse_flashcards(raw: &str) -> GenerationResult<Vec<Flashcard>> {
    let items = non_empty_array(raw).ok_or(GenerationError::Parse("flashcards"))?;
    Ok(items
        .iter()
        .map(|item| Flashcard::new(text_field(item, "question"), text_field(item, "answer")))
        .collect())
}

pub fn parse_quiz_questions(raw: &str) -> GenerationResult<Vec<QuizQuestion>> {
    let items = non_empty_array(raw).ok_or(GenerationError::Parse("quiz questions"))?;
    Ok(items
        .iter()
        .map(|item| QuizQuestion {
            question_text: text_field(item, "questionText"),
            question_type: QuestionType::from(text_field(item, "questionType")),
            options: text_list(item, "options"),
            correct_answer: text_field(item, "correctAnswer"),
            explanation: item.get("explanation").and_then(text),
        })
        .collect())
}

pub fn parse_explanation(raw: &str) -> GenerationResult<TutorExplanation> {
    let value: Value = serde_json::from_str(raw).map_err(|_| GenerationError::Parse("explanation"))?;
    let explanation = value
        .get("explanation")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .ok_or(GenerationError::Parse("explanation"))?;
    Ok(TutorExplanation {
        explanation: explanation.to_string(),
        key_concepts: text_list(&value, "keyConcepts"),
        additional_resources: text_list(&value, "additionalResources"),
    })
}

fn non_empty_array(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Array(items) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// Strings as-is, other scalars as their JSON text, null as nothing.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_field(item: &Value, key: &str) -> String {
    item.get(key).and_then(text).unwrap_or_default()
}

/// `None` unless the field is an array.
fn text_list(item: &Value, key: &str) -> Option<Vec<String>> {
    item.get(key)?.as_array().map(|a| a.iter().filter_map(text).collect())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
