use axum::extract::Multipart;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;

async fn accept(mut multipart: Multipart) -> Json<serde_json::Value> {
    let mut file_name = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if let Some(name) = field.file_name() {
            file_name = name.to_string();
        }
        field.bytes().await.unwrap();
    }
    Json(json!({
        "status": 200,
        "code": 1,
        "msg": "ok",
        "data": format!("https://img.example/{}", file_name),
    }))
}

async fn spawn_server() -> String {
    let app = Router::new().route("/upload", post(accept));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/upload", addr)
}

fn write_config(dir: &TempDir, api_url: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    let body = format!("api_url: {}\nusername: alice\npassword: secret\n", api_url);
    std::fs::write(&path, body).unwrap();
    path
}

fn write_image(dir: &TempDir, name: &str) {
    std::fs::write(dir.path().join(name), b"\x89PNG\r\n\x1a\nbytes").unwrap();
}

async fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_typora-upload"))
        .args(args)
        .current_dir(cwd)
        .env_remove("TYPORA_UPLOAD_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[tokio::test]
async fn no_files_prints_usage_and_fails() {
    // empty directory: reading the default config would fail differently
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &[]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = text(&output.stderr);
    assert!(stderr.starts_with("Usage: typora-upload"), "{}", stderr);
    assert!(!stderr.contains("Error loading config"), "{}", stderr);
}

#[tokio::test]
async fn unreadable_config_fails_before_upload() {
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "a.png");
    let output = run(dir.path(), &["--config", "absent.yaml", "a.png"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(text(&output.stderr).contains("Error loading config"));
}

#[tokio::test]
async fn config_without_password_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir, "a.png");
    std::fs::write(
        dir.path().join("typora-upload-config.yaml"),
        "api_url: http://127.0.0.1:1/upload\nusername: alice\n",
    )
    .unwrap();
    let output = run(dir.path(), &["a.png"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("password is required in config"));
}

#[tokio::test]
async fn all_uploads_succeed() {
    let api_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &api_url);
    write_image(&dir, "one.png");
    write_image(&dir, "two.jpg");

    let config = config.to_string_lossy().into_owned();
    let output = run(dir.path(), &["--config", &config, "one.png", "two.jpg"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        text(&output.stdout),
        "https://img.example/one.png\nhttps://img.example/two.jpg\n"
    );
    assert!(output.stderr.is_empty(), "{}", text(&output.stderr));
}

#[tokio::test]
async fn partial_failure_prints_urls_and_fails() {
    let api_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &api_url);
    write_image(&dir, "one.png");
    write_image(&dir, "three.gif");

    let config = config.to_string_lossy().into_owned();
    let output = run(
        dir.path(),
        &["--config", &config, "one.png", "missing.png", "three.gif"],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        text(&output.stdout),
        "https://img.example/one.png\nhttps://img.example/three.gif\n"
    );
    assert!(text(&output.stderr).starts_with("Upload failed for missing.png: failed to open image"));
}

#[tokio::test]
async fn markdown_flag_wraps_urls() {
    let api_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &api_url);
    write_image(&dir, "one.png");

    let config = config.to_string_lossy().into_owned();
    let output = run(dir.path(), &["--config", &config, "--markdown", "one.png"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "![](https://img.example/one.png)\n");
}
