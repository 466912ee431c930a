use abstract_skimmer::{
    api::{self, AppState},
    config::Settings,
    nlp::classifier,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

const BOUNDARY: &str = "predict-test-boundary";

fn test_settings(dir: &std::path::Path) -> Settings {
    Settings {
        pubmed_email: "test@example.com".to_string(),
        pubmed_tool: "abstract_skimmer_tests".to_string(),
        model_dir: dir.join("model"),
        data_dir: dir.join("data"),
        port: 0,
        max_upload_bytes: 1024,
    }
}

async fn test_router(dir: &std::path::Path) -> Router {
    let settings = test_settings(dir);
    let classifier = classifier::load_model(&settings)
        .await
        .expect("classifier loads");
    api::router(AppState {
        settings,
        classifier,
    })
}

fn text_field(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn file_field(filename: &str, value: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{value}\r\n"
    )
}

fn finish(fields: String) -> String {
    format!("{fields}--{BOUNDARY}--\r\n")
}

async fn post_predict(router: Router, body: String) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}

#[tokio::test]
async fn missing_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let (status, body) = post_predict(router, finish(String::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No input provided.");
}

#[tokio::test]
async fn non_pubmed_links_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let body = finish(text_field("pubmed_link", "https://example.com/12345/"));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only valid PubMed links are accepted.");
}

#[tokio::test]
async fn typed_abstract_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let abstract_text = "Hypertension has been a leading cause of death. \
        We aimed to determine whether the new drug lowers blood pressure. \
        Blood pressure decreased significantly compared with placebo.";
    let body = finish(text_field("abstract_text", abstract_text));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().expect("predictions array");
    assert_eq!(predictions.len(), 3);
    let sections = body["sections"].as_array().expect("sections array");
    assert!(!sections.is_empty());
    let grouped: usize = sections
        .iter()
        .map(|s| s["sentences"].as_array().map(Vec::len).unwrap_or(0))
        .sum();
    assert_eq!(grouped, 3);
}

#[tokio::test]
async fn whitespace_text_falls_through_to_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let body = finish(text_field("abstract_text", "   "));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No input provided.");
}

#[tokio::test]
async fn non_txt_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let body = finish(file_field("abstract.pdf", "Some text."));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only .txt files are supported.");
}

#[tokio::test]
async fn txt_upload_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let body = finish(file_field(
        "abstract.txt",
        "We aimed to evaluate the intervention. Outcomes improved significantly.",
    ));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path()).await;
    let body = finish(file_field("abstract.txt", &"x".repeat(2048)));
    let (status, body) = post_predict(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Uploaded file is too large.");
}
