use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mentor_service::config::MentorConfig;
use mentor_service::services::init_metrics;
use mentor_service::startup::Application;
use std::sync::Once;

// Initialize metrics once for all tests
static INIT_METRICS: Once = Once::new();

pub fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(init_metrics);
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the service with the mock provider (canned non-JSON reply).
    pub async fn spawn_with_mock() -> Self {
        Self::spawn(None).await
    }

    /// Spawn the service with the Gemini provider pointed at the given base
    /// URL (a stub server, or an unreachable address for failure tests).
    pub async fn spawn_with_api_base(api_base: &str) -> Self {
        Self::spawn(Some(api_base.to_string())).await
    }

    async fn spawn(api_base: Option<String>) -> Self {
        ensure_metrics_initialized();
        std::env::set_var("GOOGLE_API_KEY", "test-key");

        let mut config = MentorConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        match api_base {
            Some(base) => {
                config.google.use_mock = false;
                config.google.api_base = base;
            }
            None => config.google.use_mock = true,
        }

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}

/// What the stub Gemini API replies with.
#[derive(Clone)]
pub enum StubReply {
    /// Always this text, regardless of the prompt.
    Fixed(String),
    /// A JSON object `{"echo": <prompt>}` so tests can inspect the prompt
    /// the service actually sent.
    EchoPrompt,
    /// HTTP 429, the way the real API signals quota exhaustion.
    RateLimited,
    /// A candidate blocked by the safety filter: no parts, `finishReason: SAFETY`.
    SafetyFiltered,
    /// HTTP 200 with an empty candidate list.
    NoCandidates,
}

async fn stub_generate(
    State(reply): State<StubReply>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let text = match reply {
        StubReply::Fixed(text) => text,
        StubReply::EchoPrompt => {
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default();
            serde_json::json!({ "echo": prompt }).to_string()
        }
        StubReply::RateLimited => {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" }
                })),
            )
                .into_response();
        }
        StubReply::SafetyFiltered => {
            return Json(serde_json::json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [] },
                    "finishReason": "SAFETY"
                }],
                "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 0 }
            }))
            .into_response();
        }
        StubReply::NoCandidates => {
            return Json(serde_json::json!({
                "candidates": [],
                "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 0 }
            }))
            .into_response();
        }
    };

    Json(serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 17 }
    }))
    .into_response()
}

async fn stub_models() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "models": [] }))
}

async fn spawn_stub(reply: StubReply) -> String {
    let router = Router::new()
        .route("/models/:call", post(stub_generate))
        .route("/models", get(stub_models))
        .with_state(reply);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

/// Spawn a stub Gemini API whose single candidate carries `text`.
pub async fn spawn_stub_gemini(text: &str) -> String {
    spawn_stub(StubReply::Fixed(text.to_string())).await
}

/// Spawn a stub Gemini API that echoes the received prompt back as JSON.
pub async fn spawn_stub_gemini_echo() -> String {
    spawn_stub(StubReply::EchoPrompt).await
}

/// Spawn a stub Gemini API that replies 429 to every generation call.
pub async fn spawn_stub_gemini_rate_limited() -> String {
    spawn_stub(StubReply::RateLimited).await
}

/// Spawn a stub Gemini API whose candidate is blocked by the safety filter.
pub async fn spawn_stub_gemini_safety_filtered() -> String {
    spawn_stub(StubReply::SafetyFiltered).await
}

/// Spawn a stub Gemini API that returns no candidates at all.
pub async fn spawn_stub_gemini_no_candidates() -> String {
    spawn_stub(StubReply::NoCandidates).await
}
