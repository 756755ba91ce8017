use std::io::Write;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn config_file(server: &MockServer) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").expect("tmp file");
    writeln!(
        file,
        "[api]\nbase_url = \"{}\"\nstart_offset = 0\n\n[session]\ninitial_count = 5",
        server.base_url()
    )
    .expect("write config");
    file
}

fn posts_json(ids: std::ops::RangeInclusive<u64>) -> String {
    let posts: Vec<serde_json::Value> = ids
        .map(|id| serde_json::json!({"id": id, "title": format!("title {id}"), "body": format!("body {id}")}))
        .collect();
    serde_json::Value::Array(posts).to_string()
}

fn postboard() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postboard"));
    cmd.env_remove("POSTBOARD_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn fetch_prints_listing_and_writes_html() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/posts")
            .query_param("_start", "7")
            .query_param("_limit", "3");
        then.status(200)
            .header("content-type", "application/json")
            .body(posts_json(8..=10));
    });

    let dir = tempfile::tempdir().expect("tmp dir");
    let html = dir.path().join("posts.html");

    let assert = postboard()
        .arg("--api-base-url")
        .arg(server.base_url())
        .arg("fetch")
        .arg("3")
        .arg("--start")
        .arg("7")
        .arg("--html")
        .arg(&html)
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Loaded 3 posts."));
    assert!(output.contains("#3 [id 10] title 10"));
    mock.assert();

    let document = std::fs::read_to_string(&html).expect("html written");
    assert_eq!(document.matches("class=\"post\"").count(), 3);
}

#[test]
fn fetch_rejects_out_of_range_count_without_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200).body("[]");
    });

    postboard()
        .arg("--api-base-url")
        .arg(server.base_url())
        .arg("fetch")
        .arg("101")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("post count must be between 1 and 100"));

    mock.assert_calls(0);
}

#[test]
fn invalid_base_url_fails_fast() {
    postboard()
        .arg("--api-base-url")
        .arg("ftp://example.com")
        .arg("fetch")
        .arg("3")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("api.base_url"));
}

#[test]
fn shell_session_runs_full_scenario() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/posts")
            .query_param("_start", "0")
            .query_param("_limit", "5");
        then.status(200)
            .header("content-type", "application/json")
            .body(posts_json(1..=5));
    });
    let put = server.mock(|when, then| {
        when.method("PUT")
            .path("/posts/3")
            .json_body(serde_json::json!({"title": "T", "body": "B"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":3,"title":"T","body":"B"}"#);
    });
    let patch = server.mock(|when, then| {
        when.method("PATCH")
            .path("/posts/3")
            .json_body(serde_json::json!({"title": "T2", "body": "B"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":3,"title":"T2","body":"B"}"#);
    });
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/posts")
            .json_body(serde_json::json!({"title": "X", "body": "Y"}));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":101,"title":"X","body":"Y"}"#);
    });

    let config = config_file(&server);
    let script = "replace 3 --title T --body B\n\
                  patch 3 --title T2\n\
                  create --title X --body Y\n\
                  patch 9 --title nope\n\
                  list\n\
                  quit\n";

    let assert = postboard()
        .arg("--config-file")
        .arg(config.path())
        .write_stdin(script)
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Loaded 5 posts."));
    assert!(output.contains("Post #3 (ID 3) updated successfully!"));
    assert!(output.contains("New post #6 created successfully!"));
    assert!(output.contains("! Invalid post number!"));
    assert!(output.contains("#3 [id 3] T2\n    B\n"));
    assert!(output.contains("#6 [id 6] X\n    Y\n"));

    list.assert();
    put.assert();
    patch.assert();
    create.assert();
}

#[test]
fn shell_reports_service_failures_and_keeps_running() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/posts");
        then.status(503).body("unavailable");
    });

    let config = config_file(&server);
    let assert = postboard()
        .arg("--config-file")
        .arg(config.path())
        .arg("shell")
        .arg("--no-initial-fetch")
        .write_stdin("create --title X --body Y\nlist\n")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("! Failed to create a new post."));
    assert!(output.contains("(no posts)"));
}
