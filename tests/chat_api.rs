use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use bluechat_backend::core::config::{AppConfig, LlmBackend};
use bluechat_backend::llm::LlmService;
use bluechat_backend::rag::{KnowledgeEntry, KnowledgeStore};
use bluechat_backend::server::router::router;
use bluechat_backend::state::AppState;

type Received = Arc<Mutex<Vec<Value>>>;

/// Fake chat-completions backend answering every request with `reply`.
async fn spawn_backend(reply: Value) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let log = log.clone();
            let reply = reply.clone();
            async move {
                log.lock().unwrap().push(body);
                Json(reply)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn groq_config(base_url: &str, api_key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.llm.backend = LlmBackend::Groq;
    config.llm.groq.base_url = base_url.to_string();
    config.llm.groq.api_key = api_key.map(str::to_string);
    config
}

fn app(config: AppConfig, store: KnowledgeStore) -> Router {
    let llm = LlmService::from_config(&config.llm).unwrap();
    router(AppState::new(config, store, llm))
}

fn gravedad_store() -> KnowledgeStore {
    KnowledgeStore::new(vec![KnowledgeEntry::new(
        "física",
        "¿Qué es la gravedad?",
        "La gravedad es una fuerza...",
    )])
}

fn completion(text: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
}

async fn post_chat(app: Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn empty_messages_is_bad_request() {
    let (base, received) = spawn_backend(completion("x")).await;
    let app = app(groq_config(&base, Some("gsk_test")), gravedad_store());

    let (status, body) = post_chat(app.clone(), json!({ "messages": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No messages" }));

    let (status, body) = post_chat(app.clone(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No messages" }));

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No messages" }));

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No messages" }));

    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn greeting_with_empty_store_is_general() {
    let (base, received) = spawn_backend(completion("¡Hola! Soy BlueChat.")).await;
    let app = app(groq_config(&base, Some("gsk_test")), KnowledgeStore::empty());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "user", "content": "hola" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "content": [{ "text": "¡Hola! Soy BlueChat." }], "source": "qwen-general" })
    );
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn matched_question_is_grounded_on_the_knowledge_base() {
    let (base, received) = spawn_backend(completion("Es la atracción entre masas.")).await;
    let app = app(groq_config(&base, Some("gsk_test")), gravedad_store());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "user", "content": "qué es la gravedad" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "bluebook-rag");
    assert_eq!(body["content"][0]["text"], "Es la atracción entre masas.");

    let received = received.lock().unwrap();
    let messages = received[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("La gravedad es una fuerza..."));
    assert_eq!(
        messages[1],
        json!({ "role": "user", "content": "qué es la gravedad" })
    );
    assert_eq!(received[0]["max_tokens"], 500);
    assert_eq!(received[0]["stream"], false);
}

#[tokio::test]
async fn missing_credential_is_reported_without_calling_backend() {
    let (base, received) = spawn_backend(completion("x")).await;
    let app = app(groq_config(&base, None), gravedad_store());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "user", "content": "hola" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "AI service not configured. Please add GROQ_API_KEY secret." })
    );
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_backend_response_is_internal_error() {
    let (base, _received) = spawn_backend(json!({ "object": "chat.completion" })).await;
    let app = app(groq_config(&base, Some("gsk_test")), gravedad_store());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "user", "content": "hola" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal AI Error" }));
}

#[tokio::test]
async fn backend_error_payload_is_not_leaked() {
    let (base, _received) =
        spawn_backend(json!({ "error": { "message": "Rate limit reached for org-123" } })).await;
    let app = app(groq_config(&base, Some("gsk_test")), gravedad_store());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "user", "content": "hola" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal AI Error" }));
}

#[tokio::test]
async fn unknown_role_is_bad_request() {
    let (base, received) = spawn_backend(completion("x")).await;
    let app = app(groq_config(&base, Some("gsk_test")), gravedad_store());

    let (status, body) = post_chat(
        app,
        json!({ "messages": [{ "role": "wizard", "content": "hola" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("wizard"));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_backend_state() {
    let app = app(groq_config("http://127.0.0.1:9", None), gravedad_store());

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["knowledge_entries"], 1);
    assert_eq!(json["backend"], "groq");
    assert_eq!(json["backend_configured"], false);
}

#[tokio::test]
async fn static_dir_serves_the_chat_page() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<title>BlueChat</title>").unwrap();
    let mut config = groq_config("http://127.0.0.1:9", None);
    config.server.static_dir = Some(dir.path().to_path_buf());
    let app = app(config, KnowledgeStore::empty());

    let req = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("BlueChat"));
}
