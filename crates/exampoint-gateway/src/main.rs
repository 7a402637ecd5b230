//! ExamPoint gateway: the study API over JSON at 127.0.0.1:8000.
//! One in-memory session per process; AI routes need a chat endpoint in config.

mod api;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use exampoint_core::{BillingLinks, ChatCompletionClient, MockStudio, Session, StudyConfig, StudyGenerator};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<StudyConfig>,
    pub(crate) session: Arc<Mutex<Session>>,
    pub(crate) studio: MockStudio,
    pub(crate) links: Arc<BillingLinks>,
    /// `None` when no chat endpoint is configured; AI routes then answer 503.
    pub(crate) generator: Option<Arc<StudyGenerator<ChatCompletionClient>>>,
}

impl AppState {
    fn from_config(config: StudyConfig) -> Result<Self, reqwest::Error> {
        let generator = ChatCompletionClient::from_config(&config.chat)?.map(|client| {
            tracing::info!(model = %client.model(), "chat completion backend enabled");
            Arc::new(StudyGenerator::new(client))
        });
        if generator.is_none() {
            tracing::warn!("chat.endpoint not set; /api/v1/ai routes are disabled");
        }
        Ok(Self {
            session: Arc::new(Mutex::new(Session::new(config.latency.auth()))),
            studio: MockStudio::new(config.latency),
            links: Arc::new(BillingLinks::new(&config.billing_url, &config.donation_url)),
            generator,
            config: Arc::new(config),
        })
    }
}

fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/v1/plans", get(api::plans))
        .route("/api/v1/session", get(api::session))
        .route("/api/v1/auth/signup", post(api::signup))
        .route("/api/v1/auth/login", post(api::login))
        .route("/api/v1/auth/logout", post(api::logout))
        .route("/api/v1/access/:tier", get(api::access))
        .route("/api/v1/subscription", get(api::subscription))
        .route("/api/v1/subscription/checkout", post(api::checkout))
        .route("/api/v1/links", get(api::links))
        .route("/api/v1/flashcards", post(api::flashcards))
        .route("/api/v1/materials/upload", post(api::upload))
        .route("/api/v1/materials/text", post(api::material))
        .route("/api/v1/quiz", post(api::quiz))
        .route("/api/v1/quiz/answer", post(api::answer))
        .route("/api/v1/tutor", post(api::tutor))
        .route("/api/v1/ai/flashcards", post(api::ai_flashcards))
        .route("/api/v1/ai/quiz", post(api::ai_quiz))
        .route("/api/v1/ai/explanation", post(api::ai_explanation))
        .route("/admin/signups", get(api::signups))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_requests))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StudyConfig::load()?;
    let addr = config.listen_addr();
    let state = AppState::from_config(config)?;
    tracing::info!(app = %state.config.app_name, %addr, "gateway starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}

async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use exampoint_core::{MockLatency, Tier};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = StudyConfig {
            latency: MockLatency::none(),
            ..StudyConfig::default()
        };
        AppState::from_config(config).unwrap()
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_app(test_state());
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_plans_listed_cheapest_first() {
        let (status, json) = call(build_app(test_state()), "GET", "/api/v1/plans", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["tier"], "FREE");
        assert_eq!(json[1]["price"], 7);
        assert_eq!(json[2]["tier"], "ELITE");
    }

    #[tokio::test]
    async fn test_signup_then_session_snapshot() {
        let state = test_state();
        let body = json!({ "email": "ada@example.com", "password": "pw", "name": "Ada Lovelace" });
        let (status, json) = call(build_app(state.clone()), "POST", "/api/v1/auth/signup", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["tier"], "FREE");
        assert_eq!(json["initials"], "AL");

        let (_, report) = call(build_app(state), "GET", "/admin/signups", None).await;
        assert_eq!(report["stats"]["total"], 1);
        assert_eq!(report["events"][0]["user"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_login_missing_password_is_bad_request() {
        let body = json!({ "email": "ada@example.com" });
        let (status, json) = call(build_app(test_state()), "POST", "/api/v1/auth/login", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "password is required");
    }

    #[tokio::test]
    async fn test_tutor_guard_views() {
        let state = test_state();
        let ask = json!({ "question": "What is photosynthesis?" });

        let (status, json) = call(build_app(state.clone()), "POST", "/api/v1/tutor", Some(ask.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["view"], "sign_up_required");

        state.session.lock().await.login("ada@example.com", "pw").await.unwrap();
        let (status, json) = call(build_app(state.clone()), "POST", "/api/v1/tutor", Some(ask.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["view"], "upgrade_required");
        assert_eq!(json["required_tier"], "BASIC");

        state.session.lock().await.upgrade_tier(Tier::Basic);
        let (status, json) = call(build_app(state), "POST", "/api/v1/tutor", Some(ask)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["reply"].as_str().unwrap().starts_with("Photosynthesis"));
    }

    #[tokio::test]
    async fn test_access_check() {
        let (status, json) = call(build_app(test_state()), "GET", "/api/v1/access/elite", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current"], "FREE");
        assert_eq!(json["granted"], false);

        let (status, _) = call(build_app(test_state()), "GET", "/api/v1/access/platinum", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_redirects_paid_tier() {
        let state = test_state();
        let (status, json) = call(
            build_app(state.clone()),
            "POST",
            "/api/v1/subscription/checkout",
            Some(json!({ "tier": "BASIC" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "redirect");
        assert_eq!(json["url"], state.links.billing_url.as_str());
        assert_eq!(state.session.lock().await.current_tier(), Tier::Free);
    }

    #[tokio::test]
    async fn test_mock_flashcards_and_quiz() {
        let state = test_state();
        let (status, json) = call(
            build_app(state.clone()),
            "POST",
            "/api/v1/flashcards",
            Some(json!({ "topic": "What is cell biology?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["flashcards"].as_array().map(Vec::len), Some(5));

        let (status, _) = call(build_app(state.clone()), "POST", "/api/v1/quiz", Some(json!({ "topic": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, quiz) = call(build_app(state.clone()), "POST", "/api/v1/quiz", Some(json!({ "topic": "biology" }))).await;
        let question = quiz["questions"][0].clone();
        let (status, graded) = call(
            build_app(state),
            "POST",
            "/api/v1/quiz/answer",
            Some(json!({ "question": question, "answer": "Mitochondria" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graded["correct"], true);
    }

    #[tokio::test]
    async fn test_upload_requires_a_file() {
        let (status, json) = call(
            build_app(test_state()),
            "POST",
            "/api/v1/materials/upload",
            Some(json!({ "files": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please select a file");
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_text_file_yields_cards_within_one_delay() {
        let state = AppState::from_config(StudyConfig::default()).unwrap();
        let body = json!({
            "files": [
                {
                    "name": "notes.txt",
                    "mime": "text/plain",
                    "size": 64,
                    "text": "Volcanoes form where magma reaches the surface of the crust. Lava cools into igneous rock."
                },
                { "name": "diagram.png", "mime": "image/png", "size": 2048 }
            ]
        });
        let started = tokio::time::Instant::now();
        let (status, json) = call(build_app(state), "POST", "/api/v1/materials/upload", Some(body)).await;
        let elapsed = started.elapsed();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["uploaded"][1]["name"], "diagram.png");
        assert_eq!(json["uploaded"][1]["size"], 2048);
        assert_eq!(json["flashcards"].as_array().map(Vec::len), Some(3));
        assert_eq!(
            json["flashcards"][2]["question"],
            "Summarize the main points from this material"
        );
        assert!(elapsed < Duration::from_millis(2500), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let app = build_app(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/quiz")
            .body(Body::from("topic=biology"))
            .unwrap();
        let (status, json) = {
            let res = build_app(test_state()).oneshot(req).await.unwrap();
            let status = res.status();
            let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice::<Value>(&bytes).unwrap())
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_ai_routes_without_endpoint() {
        let (status, _) = call(
            build_app(test_state()),
            "POST",
            "/api/v1/ai/flashcards",
            Some(json!({ "topic": "Volcanoes" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, json) = call(
            build_app(test_state()),
            "POST",
            "/api/v1/ai/quiz",
            Some(json!({ "subject": "Biology", "topic": "Cells", "difficulty": "extreme" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Difficulty must be easy, medium, or hard");
    }
}
