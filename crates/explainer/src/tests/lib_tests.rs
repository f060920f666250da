use super::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::error::ErrorCode;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Debug)]
struct CapturedRequest {
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    reply: Value,
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn handle_generate(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(CapturedRequest {
            path: uri.path().to_string(),
            api_key: headers
                .get("x-goog-api-key")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body,
        });
    }
    (state.status, Json(state.reply))
}

async fn spawn_gemini_server(
    status: StatusCode,
    reply: Value,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        status,
        reply,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/v1beta/models/*rest", post(handle_generate))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

fn tutor_for(endpoint: String) -> Tutor {
    Tutor::from_config(Some(GeminiConfig {
        endpoint,
        model: "gemini-test".into(),
        api_key: "test-key".into(),
    }))
}

#[tokio::test]
async fn gemini_request_carries_framed_prompt_and_key() {
    let reply = json!({
        "candidates": [
            { "content": { "parts": [{ "text": "鈉失去" }, { "text": "一個電子。" }] } },
            { "content": { "parts": [{ "text": "ignored" }] } }
        ]
    });
    let (endpoint, captured) = spawn_gemini_server(StatusCode::OK, reply).await;
    let tutor = tutor_for(format!("{endpoint}/"));

    let answer = tutor.explain("為什麼鈉會失去電子？").await;
    assert_eq!(answer, "鈉失去一個電子。");

    let request = captured.await.expect("captured request");
    assert_eq!(request.path, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(request.api_key.as_deref(), Some("test-key"));
    assert_eq!(
        request.body["contents"][0]["parts"][0]["text"],
        frame_prompt("為什麼鈉會失去電子？")
    );
    assert_eq!(
        request.body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
        0
    );
}

#[tokio::test]
async fn server_error_falls_back_to_unavailable_message() {
    let (endpoint, _captured) =
        spawn_gemini_server(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;
    let tutor = tutor_for(endpoint);

    let err = tutor.try_explain("prompt").await.expect_err("status error");
    assert!(matches!(err, ProviderError::Status { status: 500, .. }));
    assert_eq!(
        tutor.explain("prompt").await,
        FallbackMessages::default().unavailable
    );
}

#[tokio::test]
async fn empty_candidates_use_empty_response_message() {
    let (endpoint, _captured) = spawn_gemini_server(StatusCode::OK, json!({ "candidates": [] })).await;
    let tutor = tutor_for(endpoint);

    assert_eq!(
        tutor.explain("prompt").await,
        "無法產生解釋，請稍後再試。"
    );
}

#[tokio::test]
async fn unreachable_endpoint_uses_unavailable_message() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let tutor = tutor_for(format!("http://{addr}"));
    let err = tutor.try_explain("prompt").await.expect_err("connect error");
    assert!(matches!(err, ProviderError::Transport(_)));
    assert_eq!(
        tutor.explain("prompt").await,
        "AI 服務暫時無法使用，請檢查網路或 API Key。"
    );
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
    let tutor = Tutor::from_config(None);
    assert_eq!(
        tutor.explain("prompt").await,
        "請設定 API Key 以啟用 AI 導師功能。"
    );

    let blank = Tutor::from_config(Some(GeminiConfig::new("  ")));
    let err = blank.try_explain("prompt").await.expect_err("blank key");
    assert!(matches!(err, ProviderError::MissingCredential));
}

struct CannedProvider(&'static str);

#[async_trait]
impl ExplanationProvider for CannedProvider {
    async fn explain(&self, prompt: &str) -> Result<String, ProviderError> {
        assert!(prompt.starts_with("身為一位專業的化學老師"));
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn whitespace_answer_counts_as_empty() {
    let tutor = Tutor::new(Arc::new(CannedProvider(" \n"))).with_fallbacks(FallbackMessages {
        missing_credential: "no key".into(),
        empty_response: "empty".into(),
        unavailable: "down".into(),
    });
    assert_eq!(tutor.explain("prompt").await, "empty");
}

#[test]
fn blank_prompt_falls_back_to_default_prompt() {
    assert_eq!(frame_prompt("   "), frame_prompt(DEFAULT_PROMPT));
    assert!(frame_prompt("").contains("向高中生簡單解釋鈉(Na)和氯(Cl)形成氯化鈉(NaCl)"));
    assert!(frame_prompt("x").ends_with("請將解釋控制在 150 字以內，語氣生動有趣。"));
}

#[test]
fn provider_errors_map_to_provider_failure_code() {
    let err: RedoxError = ProviderError::EmptyResponse.into();
    assert_eq!(err.code(), ErrorCode::ProviderFailure);

    let err = RedoxError::from(ProviderError::Status {
        status: 503,
        body: String::new(),
    });
    assert_eq!(err.code(), ErrorCode::ProviderFailure);
    assert!(err.to_string().contains("503"));
}
