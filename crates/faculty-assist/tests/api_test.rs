use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use faculty_assist::config::AppConfig;
use faculty_assist::providers::{GenerationOptions, GenerativeModel};
use faculty_assist::server::{build_router, state::AppState};
use faculty_assist::types::{ChatPrompt, PromptPart};
use faculty_assist::{Error, Result};

const STUB_ANSWER: &str = "Mock answer";
const BOUNDARY: &str = "faculty-assist-test-boundary";
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

#[derive(Default)]
struct MockModel {
    calls: AtomicUsize,
    prompts: Mutex<Vec<(ChatPrompt, GenerationOptions)>>,
    fail: bool,
}

#[async_trait::async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, prompt: &ChatPrompt, options: &GenerationOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push((prompt.clone(), options.clone()));
        if self.fail {
            return Err(Error::model("upstream quota exhausted"));
        }
        Ok(STUB_ANSWER.to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-1"
    }
}

impl MockModel {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> (ChatPrompt, GenerationOptions) {
        self.prompts.lock().last().cloned().expect("model was not called")
    }
}

struct TestApp {
    router: Router,
    model: Arc<MockModel>,
    uploads: TempDir,
    _data: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        Self::with(MockModel::default(), |_| {}).await
    }

    async fn with(model: MockModel, configure: impl FnOnce(&mut AppConfig)) -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();

        let mut config = AppConfig::default();
        config.server.upload_dir = uploads.path().to_path_buf();
        config.server.static_dir = data.path().join("client");
        config.knowledge.data_dir = data.path().to_path_buf();
        config.knowledge.website_url = "http://127.0.0.1:1/".to_string();
        configure(&mut config);

        let model = Arc::new(model);
        let state = AppState::with_model(config, model.clone()).await.unwrap();
        let router = build_router(state).unwrap();

        Self {
            router,
            model,
            uploads,
            _data: data,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn uploads_left(&self) -> usize {
        count_files(self.uploads.path())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

fn multipart_request(uri: &str, parts: &[FormPart]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn text_parts(prompt: &ChatPrompt) -> Vec<&str> {
    prompt
        .parts()
        .iter()
        .filter_map(|p| match p {
            PromptPart::Text(t) => Some(t.as_str()),
            PromptPart::InlineData { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn test_chat_tuition_question_links_tuition_resource() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::Text("message", "ค่าเทอมเท่าไหร่")],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with(STUB_ANSWER));
    assert!(response.contains(
        "- [ค่าธรรมเนียมการศึกษาปริญญาตรี](https://www.en.kku.ac.th/web/tuition-fees)"
    ));

    let (prompt, options) = app.model.last_prompt();
    assert_eq!(options, GenerationOptions::chat().with_sampling(0.7, 0.9));
    assert!(text_parts(&prompt)[0].contains("ค่าเทอมเท่าไหร่"));
}

#[tokio::test]
async fn test_chat_without_matching_terms_has_no_links() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request("/chat", &[FormPart::Text("message", "hello")]))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], STUB_ANSWER);
}

#[tokio::test]
async fn test_chat_png_only_is_attached_and_removed() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "schedule.png",
                content_type: "image/png",
                data: PNG_BYTES,
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["response"].as_str().unwrap().is_empty());
    assert_eq!(app.uploads_left(), 0);

    let (prompt, _) = app.model.last_prompt();
    assert_eq!(prompt.parts().len(), 2);
    assert!(text_parts(&prompt)[0].contains("(ไม่มีข้อความ, ผู้ใช้ส่งเฉพาะไฟล์)"));
    match &prompt.parts()[1] {
        PromptPart::InlineData { mime_type, data } => {
            assert_eq!(mime_type, "image/png");
            assert_eq!(data, "iVBORw0KGgoAAAAN");
        }
        other => panic!("expected inline image, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_text_file_is_appended_to_prompt() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(multipart_request(
            "/chat",
            &[
                FormPart::Text("message", "summarise this"),
                FormPart::File {
                    filename: "notes.txt",
                    content_type: "text/plain",
                    data: b"Midterm exams start on 12 August",
                },
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.uploads_left(), 0);

    let (prompt, _) = app.model.last_prompt();
    assert_eq!(prompt.parts().len(), 1);
    assert!(text_parts(&prompt)[0].ends_with("เนื้อหาไฟล์:\nMidterm exams start on 12 August"));
}

#[tokio::test]
async fn test_chat_rejects_unsupported_media_type_before_extraction() {
    let app = TestApp::new().await;

    // Valid PNG bytes, but declared as something else
    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "archive.zip",
                content_type: "application/zip",
                data: PNG_BYTES,
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("application/zip"));
    assert_eq!(app.model.calls(), 0);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_chat_rejects_file_over_limit() {
    let app = TestApp::new().await;
    let oversized = vec![b'a'; 15 * 1024 * 1024 + 1];

    let (status, _) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "big.txt",
                content_type: "text/plain",
                data: &oversized,
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.model.calls(), 0);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_chat_accepts_file_at_configured_limit() {
    let app = TestApp::with(MockModel::default(), |c| c.server.max_upload_size = 64).await;

    let (status, _) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "exact.txt",
                content_type: "text/plain",
                data: &[b'x'; 64],
            }],
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "over.txt",
                content_type: "text/plain",
                data: &[b'x'; 65],
            }],
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_chat_extraction_failure_is_server_error_and_cleans_up() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[FormPart::File {
                filename: "broken.pdf",
                content_type: "application/pdf",
                data: b"this is not a pdf",
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("broken.pdf"));
    assert_eq!(app.model.calls(), 0);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_chat_model_failure_reports_details_and_cleans_up() {
    let model = MockModel {
        fail: true,
        ..MockModel::default()
    };
    let app = TestApp::with(model, |_| {}).await;

    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[
                FormPart::Text("message", "what does this show?"),
                FormPart::File {
                    filename: "timetable.png",
                    content_type: "image/png",
                    data: PNG_BYTES,
                },
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("upstream quota exhausted"));
    assert_eq!(app.model.calls(), 1);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_chat_ignores_empty_file_input() {
    let app = TestApp::new().await;

    // what a browser sends for a file input left empty
    let (status, body) = app
        .send(multipart_request(
            "/chat",
            &[
                FormPart::Text("message", "hello"),
                FormPart::File {
                    filename: "",
                    content_type: "application/octet-stream",
                    data: b"",
                },
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], STUB_ANSWER);
    assert_eq!(app.uploads_left(), 0);

    let (prompt, _) = app.model.last_prompt();
    assert_eq!(prompt.parts().len(), 1);
}

#[tokio::test]
async fn test_ask_upload_empty_file_input_counts_as_missing() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/ask-upload",
            &[FormPart::File {
                filename: "",
                content_type: "application/octet-stream",
                data: b"",
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("file"));
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_ask_requires_question() {
    let app = TestApp::new().await;

    let (status, body) = app.send(json_request("/ask", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = app
        .send(json_request("/ask", serde_json::json!({"question": "  "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_ask_malformed_bodies_are_json_bad_requests() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(json_request("/ask", serde_json::json!({"question": 5})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/ask")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/ask")
                .body(Body::from("question=hi"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: question");

    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_ask_uses_model_default_sampling() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(json_request("/ask", serde_json::json!({"question": "office hours?"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    let (_, options) = app.model.last_prompt();
    assert_eq!(options, GenerationOptions::default());
}

#[tokio::test]
async fn test_ask_succeeds_when_website_is_unreachable() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(json_request(
            "/ask",
            serde_json::json!({"question": "เปิดเทอมเมื่อไหร่"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "เปิดเทอมเมื่อไหร่");
    assert_eq!(body["answer"], STUB_ANSWER);
    assert_eq!(body["sources"], serde_json::json!(["website"]));

    let (prompt, _) = app.model.last_prompt();
    let parts = text_parts(&prompt);
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[2], "คำถาม: เปิดเทอมเมื่อไหร่");
    assert!(parts[3].ends_with("ข้อมูลจากเว็บไซต์:\nnull"));
}

#[tokio::test]
async fn test_ask_uses_sample_images() {
    let app = TestApp::with(MockModel::default(), |c| {
        std::fs::write(c.knowledge.resolve(&c.knowledge.images[0].file), PNG_BYTES).unwrap();
    })
    .await;

    let (status, body) = app
        .send(json_request("/ask", serde_json::json!({"question": "fees?"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], serde_json::json!(["tuition", "website"]));
    // one vision call for the image, one for the answer
    assert_eq!(app.model.calls(), 2);
}

#[tokio::test]
async fn test_ask_upload_requires_file() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/ask-upload",
            &[FormPart::Text("question", "what is this?")],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("file"));
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_ask_upload_image_uses_question_as_hint() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/ask-upload",
            &[
                FormPart::Text("question", "ค่าเทอมเท่าไหร่"),
                FormPart::File {
                    filename: "fees.png",
                    content_type: "image/png",
                    data: PNG_BYTES,
                },
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "ค่าเทอมเท่าไหร่");
    assert_eq!(body["content"], STUB_ANSWER);
    assert_eq!(app.uploads_left(), 0);

    let (prompt, _) = app.model.last_prompt();
    assert_eq!(
        text_parts(&prompt)[0],
        "จากภาพนี้: ค่าเทอมเท่าไหร่ (ตอบอย่างละเอียดและถูกต้อง)"
    );
}

#[tokio::test]
async fn test_ask_upload_text_returns_extracted_content() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(multipart_request(
            "/ask-upload",
            &[FormPart::File {
                filename: "notes.txt",
                content_type: "text/plain",
                data: b"Lab 3 moved to Friday",
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Lab 3 moved to Friday");
    assert!(body.get("question").is_none());
    assert_eq!(app.model.calls(), 0);
    assert_eq!(app.uploads_left(), 0);
}

#[tokio::test]
async fn test_resources_listing() {
    let app = TestApp::new().await;

    let (status, body) = app.send(get("/api/resources")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resources"]["admission"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["resources"]["tuition"][0]["url"],
        "https://www.en.kku.ac.th/web/tuition-fees"
    );
    let last_updated = body["last_updated"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(last_updated).is_ok());
}

#[tokio::test]
async fn test_context_refresh_reports_cache_mode() {
    let app = TestApp::with(MockModel::default(), |c| c.knowledge.cache_context = true).await;

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/context/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], true);
    assert_eq!(body["cached"], true);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // warm-up only runs when the server is started
    let response = app.router.clone().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
