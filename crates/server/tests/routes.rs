use std::path::Path;

use logs_viewer_core::{LogFiles, LogKind};
use logs_viewer_server::LogsViewerPlugin;
use serde_json::{Value, json};

/// A viewer served on an ephemeral port over a temporary log directory.
struct TestServer {
    base_url: String,
    files: LogFiles,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let files = LogFiles::in_dir(dir.path());
        let app = logs_viewer_server::router(&LogsViewerPlugin::new(files.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            files,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn write(&self, kind: LogKind, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(self.files.path(kind), content).unwrap();
    }

    fn read(&self, kind: LogKind) -> String {
        std::fs::read_to_string(self.files.path(kind)).unwrap()
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = reqwest::get(self.url(path)).await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post_json(&self, path: &str) -> (u16, Value) {
        let resp = reqwest::Client::new()
            .post(self.url(path))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn entry_line(n: usize) -> String {
    format!(r#"{{"ts":"2026-02-04T10:00:0{n}Z","runId":"run-{n}","stage":"request","n":{n}}}"#)
}

fn file_is_empty(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false)
}

#[tokio::test]
async fn viewer_page_is_html_for_any_method() {
    let server = TestServer::start().await;

    let resp = reqwest::get(server.url("/logs")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    let body = resp.text().await.unwrap();
    assert!(body.contains("<title>LLM Payload Logs</title>"));

    let resp = reqwest::Client::new()
        .post(server.url("/logs"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn logs_api_returns_newest_window_first() {
    let server = TestServer::start().await;
    let lines: Vec<String> = (1..=5).map(entry_line).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    server.write(LogKind::Raw, &refs);

    let (status, body) = server.get_json("/logs/api?type=raw&limit=2").await;
    assert_eq!(status, 200);
    assert_eq!(body["file"], "raw-stream.jsonl");
    assert_eq!(body["total"], 2);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["index"], 0);
    assert_eq!(entries[0]["n"], 5);
    assert_eq!(entries[1]["index"], 1);
    assert_eq!(entries[1]["n"], 4);
}

#[tokio::test]
async fn logs_api_defaults_for_bad_params() {
    let server = TestServer::start().await;
    let lines: Vec<String> = (1..=3).map(entry_line).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    server.write(LogKind::Payload, &refs);

    let (status, body) = server.get_json("/logs/api?type=bogus&limit=abc").await;
    assert_eq!(status, 200);
    assert_eq!(body["file"], "anthropic-payload.jsonl");
    assert_eq!(body["total"], 3);

    let (_, body) = server.get_json("/logs/api").await;
    assert_eq!(body["file"], "anthropic-payload.jsonl");
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn logs_api_repeated_keys_keep_first_value() {
    let server = TestServer::start().await;
    let payload: Vec<String> = (1..=3).map(entry_line).collect();
    let refs: Vec<&str> = payload.iter().map(String::as_str).collect();
    server.write(LogKind::Payload, &refs);
    let raw: Vec<String> = (4..=6).map(entry_line).collect();
    let refs: Vec<&str> = raw.iter().map(String::as_str).collect();
    server.write(LogKind::Raw, &refs);

    let (status, body) = server.get_json("/logs/api?limit=1&limit=2").await;
    assert_eq!(status, 200);
    assert_eq!(body["file"], "anthropic-payload.jsonl");
    assert_eq!(body["total"], 1);
    assert_eq!(body["entries"][0]["n"], 3);

    let (status, body) = server
        .get_json("/logs/api?type=raw&type=payload&limit=1&limit=3")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["file"], "raw-stream.jsonl");
    assert_eq!(body["total"], 1);
    assert_eq!(body["entries"][0]["n"], 6);
}

#[tokio::test]
async fn logs_api_leading_digits_limit() {
    let server = TestServer::start().await;
    let lines: Vec<String> = (1..=5).map(entry_line).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    server.write(LogKind::Payload, &refs);

    let (status, body) = server.get_json("/logs/api?limit=2abc&bare&=x").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn logs_api_missing_file_is_empty() {
    let server = TestServer::start().await;
    let (status, body) = server.get_json("/logs/api?type=raw").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"file": "raw-stream.jsonl", "total": 0, "entries": []})
    );
}

#[tokio::test]
async fn logs_api_isolates_malformed_lines() {
    let server = TestServer::start().await;
    server.write(
        LogKind::Payload,
        &[r#"{"stage":"request"}"#, "{not json", r#"{"stage":"usage"}"#],
    );

    let (_, body) = server.get_json("/logs/api").await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["stage"], "usage");
    assert_eq!(
        entries[1],
        json!({"index": 1, "raw": "{not json", "parseError": true})
    );
    assert_eq!(entries[2]["stage"], "request");
}

#[tokio::test]
async fn logs_api_allows_any_origin() {
    let server = TestServer::start().await;
    let resp = reqwest::Client::new()
        .get(server.url("/logs/api"))
        .header("Origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn clear_all_truncates_both_files() {
    let server = TestServer::start().await;
    server.write(LogKind::Payload, &[&entry_line(1)]);
    server.write(LogKind::Raw, &[&entry_line(2)]);

    let (status, body) = server.post_json("/logs/api/clear?type=all").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true, "deleted": 2}));
    assert!(file_is_empty(&server.files.path(LogKind::Payload)));
    assert!(file_is_empty(&server.files.path(LogKind::Raw)));

    let (_, body) = server.get_json("/logs/api?type=raw").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn clear_counts_only_existing_files() {
    let server = TestServer::start().await;
    server.write(LogKind::Raw, &[&entry_line(1)]);

    let (_, body) = server.post_json("/logs/api/clear?type=payload").await;
    assert_eq!(body, json!({"success": true, "deleted": 0}));
    assert!(!server.files.path(LogKind::Payload).exists());

    let (_, body) = server.post_json("/logs/api/clear").await;
    assert_eq!(body, json!({"success": true, "deleted": 0}));
    assert!(!server.read(LogKind::Raw).is_empty());
}

#[tokio::test]
async fn clear_rejects_other_methods() {
    let server = TestServer::start().await;
    server.write(LogKind::Payload, &[&entry_line(1)]);
    let before = server.read(LogKind::Payload);

    let (status, body) = server.get_json("/logs/api/clear?type=payload").await;
    assert_eq!(status, 405);
    assert_eq!(body, json!({"success": false, "error": "Method not allowed"}));
    assert_eq!(server.read(LogKind::Payload), before);
}

#[tokio::test]
async fn clear_repeated_keys_still_checks_method_first() {
    let server = TestServer::start().await;
    server.write(LogKind::Payload, &[&entry_line(1)]);
    server.write(LogKind::Raw, &[&entry_line(2)]);
    let before = server.read(LogKind::Raw);

    let (status, body) = server.get_json("/logs/api/clear?type=raw&type=payload").await;
    assert_eq!(status, 405);
    assert_eq!(body, json!({"success": false, "error": "Method not allowed"}));
    assert_eq!(server.read(LogKind::Raw), before);

    let (status, body) = server.post_json("/logs/api/clear?type=raw&type=payload").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true, "deleted": 1}));
    assert!(file_is_empty(&server.files.path(LogKind::Raw)));
    assert!(!server.read(LogKind::Payload).is_empty());
}

#[tokio::test]
async fn clear_reports_truncation_failure_in_body() {
    let server = TestServer::start().await;
    std::fs::create_dir(server.files.path(LogKind::Payload)).unwrap();

    let (status, body) = server.post_json("/logs/api/clear?type=payload").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()), "{body}");
}
