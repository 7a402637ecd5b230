//! JSON handlers for the study API.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use exampoint_core::{
    mock::{grade_answer, GradedAnswer, MaterialReceipt, UploadReceipt},
    plans::all_plans,
    subscription_overview, tutor_guard, Difficulty, ExplanationRequest, Flashcard, FlashcardRequest,
    GenerationError, GuardView, MockError, QuestionType, QuizQuestion, QuizRequest, Session, SessionError, SignupEvent,
    SignupStats, StudyGenerator, SubscriptionOverview, Tier, TierParseError, TutorExplanation, UploadedFile, User,
};
use exampoint_core::{BillingLinks, ChatCompletionClient, CheckoutOutcome, Plan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Handler failure mapped onto an HTTP status.
#[derive(Debug)]
pub(crate) enum ApiError {
    BadRequest(String),
    Forbidden(GuardView),
    Unavailable(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Forbidden(view) => return (StatusCode::FORBIDDEN, Json(view)).into_response(),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m),
            ApiError::BadGateway(m) => (StatusCode::BAD_GATEWAY, m),
        };
        (
            status,
            Json(serde_json::json!({
                "status": "error",
                "error": message,
            })),
        )
            .into_response()
    }
}

/// `Json` whose rejections use the `ApiError` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub(crate) struct ApiJson<T>(pub(crate) T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<MockError> for ApiError {
    fn from(e: MockError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<TierParseError> for ApiError {
    fn from(e: TierParseError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        if e.is_input_error() {
            return ApiError::BadRequest(e.to_string());
        }
        match e {
            GenerationError::NotConfigured => ApiError::Unavailable(e.to_string()),
            other => {
                tracing::warn!(error = %other, "ai generation failed");
                ApiError::BadGateway(other.to_string())
            }
        }
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub(crate) async fn health() -> &'static str {
    "OK"
}

pub(crate) async fn plans() -> Json<[&'static Plan; 3]> {
    Json(all_plans())
}

#[derive(Serialize)]
pub(crate) struct SessionView {
    authenticated: bool,
    tier: Tier,
    user: Option<User>,
    initials: Option<String>,
}

fn snapshot(session: &Session) -> SessionView {
    SessionView {
        authenticated: session.is_authenticated(),
        tier: session.current_tier(),
        user: session.user().cloned(),
        initials: session.user().map(User::initials),
    }
}

pub(crate) async fn session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(snapshot(&session))
}

#[derive(Deserialize)]
pub(crate) struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: String,
}

pub(crate) async fn signup(State(state): State<AppState>, ApiJson(body): ApiJson<Credentials>) -> ApiResult<SessionView> {
    let mut session = state.session.lock().await;
    session.signup(&body.email, &body.password, &body.name).await?;
    Ok(Json(snapshot(&session)))
}

pub(crate) async fn login(State(state): State<AppState>, ApiJson(body): ApiJson<Credentials>) -> ApiResult<SessionView> {
    let mut session = state.session.lock().await;
    session.login(&body.email, &body.password).await?;
    Ok(Json(snapshot(&session)))
}

pub(crate) async fn logout(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.logout();
    Json(snapshot(&session))
}

#[derive(Serialize)]
pub(crate) struct AccessCheck {
    tier: Tier,
    current: Tier,
    granted: bool,
}

pub(crate) async fn access(State(state): State<AppState>, Path(tier): Path<String>) -> ApiResult<AccessCheck> {
    let required: Tier = tier.parse()?;
    let session = state.session.lock().await;
    Ok(Json(AccessCheck {
        tier: required,
        current: session.current_tier(),
        granted: session.has_access(required),
    }))
}

pub(crate) async fn subscription(State(state): State<AppState>) -> Json<SubscriptionOverview> {
    let session = state.session.lock().await;
    Json(subscription_overview(&session, Utc::now()))
}

#[derive(Deserialize)]
pub(crate) struct CheckoutBody {
    tier: String,
}

pub(crate) async fn checkout(State(state): State<AppState>, ApiJson(body): ApiJson<CheckoutBody>) -> ApiResult<CheckoutOutcome> {
    let tier: Tier = body.tier.parse()?;
    let mut session = state.session.lock().await;
    Ok(Json(state.links.checkout(&mut session, tier)))
}

pub(crate) async fn links(State(state): State<AppState>) -> Json<BillingLinks> {
    Json(state.links.as_ref().clone())
}

#[derive(Deserialize)]
pub(crate) struct TopicBody {
    #[serde(default)]
    topic: String,
}

#[derive(Serialize)]
pub(crate) struct FlashcardSet {
    flashcards: Vec<Flashcard>,
}

pub(crate) async fn flashcards(State(state): State<AppState>, ApiJson(body): ApiJson<TopicBody>) -> ApiResult<FlashcardSet> {
    let flashcards = state.studio.flashcards_for_topic(&body.topic).await?;
    Ok(Json(FlashcardSet { flashcards }))
}

#[derive(Deserialize)]
pub(crate) struct UploadBody {
    #[serde(default)]
    files: Vec<UploadedFile>,
}

#[derive(Serialize)]
pub(crate) struct UploadResult {
    uploaded: Vec<UploadReceipt>,
    flashcards: Vec<Flashcard>,
}

/// Every file is acknowledged; flashcards come from the first one. Both run concurrently.
pub(crate) async fn upload(State(state): State<AppState>, ApiJson(body): ApiJson<UploadBody>) -> ApiResult<UploadResult> {
    let first = body
        .files
        .first()
        .ok_or_else(|| ApiError::BadRequest("Please select a file".to_string()))?;
    let (flashcards, uploaded) = tokio::join!(
        state.studio.flashcards_from_upload(first),
        state.studio.upload_files(&body.files),
    );
    Ok(Json(UploadResult {
        uploaded,
        flashcards: flashcards?,
    }))
}

#[derive(Deserialize)]
pub(crate) struct MaterialBody {
    #[serde(default)]
    text: String,
}

pub(crate) async fn material(State(state): State<AppState>, ApiJson(body): ApiJson<MaterialBody>) -> ApiResult<MaterialReceipt> {
    Ok(Json(state.studio.submit_material(&body.text).await?))
}

#[derive(Serialize)]
pub(crate) struct QuizSet {
    questions: Vec<QuizQuestion>,
}

pub(crate) async fn quiz(State(state): State<AppState>, ApiJson(body): ApiJson<TopicBody>) -> ApiResult<QuizSet> {
    let questions = state.studio.quiz(&body.topic).await?;
    Ok(Json(QuizSet { questions }))
}

#[derive(Deserialize)]
pub(crate) struct AnswerBody {
    question: QuizQuestion,
    #[serde(default)]
    answer: String,
}

pub(crate) async fn answer(ApiJson(body): ApiJson<AnswerBody>) -> ApiResult<GradedAnswer> {
    if body.answer.trim().is_empty() {
        return Err(MockError::EmptyInput("an answer").into());
    }
    Ok(Json(grade_answer(&body.question, &body.answer)))
}

#[derive(Deserialize)]
pub(crate) struct TutorBody {
    #[serde(default)]
    question: String,
}

#[derive(Serialize)]
pub(crate) struct TutorReply {
    reply: String,
}

pub(crate) async fn tutor(State(state): State<AppState>, ApiJson(body): ApiJson<TutorBody>) -> ApiResult<TutorReply> {
    let view = {
        let session = state.session.lock().await;
        tutor_guard().evaluate(&session)
    };
    if !view.is_granted() {
        return Err(ApiError::Forbidden(view));
    }
    let reply = state.studio.ask_tutor(&body.question).await?;
    Ok(Json(TutorReply { reply }))
}

fn generator(state: &AppState) -> Result<&Arc<StudyGenerator<ChatCompletionClient>>, ApiError> {
    state
        .generator
        .as_ref()
        .ok_or_else(|| GenerationError::NotConfigured.into())
}

pub(crate) async fn ai_flashcards(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FlashcardRequest>,
) -> ApiResult<FlashcardSet> {
    let flashcards = generator(&state)?.generate_flashcards(&body).await?;
    tracing::info!(count = flashcards.len(), "ai flashcards generated");
    Ok(Json(FlashcardSet { flashcards }))
}

/// Difficulty arrives as free text so a bad value is a 400 with a readable message.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AiQuizBody {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    question_types: Option<Vec<QuestionType>>,
}

pub(crate) async fn ai_quiz(State(state): State<AppState>, ApiJson(body): ApiJson<AiQuizBody>) -> ApiResult<QuizSet> {
    if body.subject.trim().is_empty() || body.topic.trim().is_empty() || body.difficulty.trim().is_empty() {
        return Err(GenerationError::MissingInput("Subject, topic, and difficulty are required").into());
    }
    let difficulty: Difficulty = body.difficulty.parse()?;
    let request = QuizRequest {
        subject: body.subject,
        topic: body.topic,
        difficulty,
        count: body.count,
        question_types: body.question_types,
    };
    let questions = generator(&state)?.generate_quiz_questions(&request).await?;
    tracing::info!(count = questions.len(), %difficulty, "ai quiz generated");
    Ok(Json(QuizSet { questions }))
}

pub(crate) async fn ai_explanation(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ExplanationRequest>,
) -> ApiResult<TutorExplanation> {
    Ok(Json(generator(&state)?.generate_tutor_explanation(&body).await?))
}

#[derive(Serialize)]
pub(crate) struct SignupReport {
    stats: SignupStats,
    events: Vec<SignupEvent>,
}

pub(crate) async fn signups(State(state): State<AppState>) -> Json<SignupReport> {
    let session = state.session.lock().await;
    Json(SignupReport {
        stats: session.signup_stats(Utc::now()),
        events: session.signup_events().cloned().collect(),
    })
}
