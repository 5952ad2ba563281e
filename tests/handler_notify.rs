mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use linkback::domain::notify::NotifyJob;
use linkback::routes::app_router;
use serde_json::json;

use common::{StaticFetcher, create_test_state, test_entry};

fn payload() -> serde_json::Value {
    json!({
        "title": "Entry A",
        "url": "http://blog.example.com/2026/08/23/entry-a/",
        "html": "<p>with a <a href=\"http://other.example.net/\">link</a></p>",
        "categories": ["rust"],
    })
}

#[tokio::test]
async fn test_notify_queues_directory_and_external_jobs() {
    let mut ctx = create_test_state(
        vec![test_entry(7, "Entry A", "/2026/08/23/entry-a/")],
        StaticFetcher::default(),
        vec![
            "http://ping.example.org/rpc".to_string(),
            "http://other-ping.example.org/rpc".to_string(),
        ],
    );
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.post("/notify").json(&payload()).await;

    response.assert_status(StatusCode::ACCEPTED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["queued"], 3);

    let mut directories = Vec::new();
    let mut external = 0;
    while let Ok(job) = ctx.notify_rx.try_recv() {
        match job {
            NotifyJob::Directory {
                directory_url,
                entry,
            } => {
                assert_eq!(entry.url, "http://blog.example.com/2026/08/23/entry-a/");
                directories.push(directory_url);
            }
            NotifyJob::ExternalLinks { entry } => {
                assert_eq!(entry.categories, vec!["rust".to_string()]);
                external += 1;
            }
        }
    }
    assert_eq!(directories, vec![
        "http://ping.example.org/rpc".to_string(),
        "http://other-ping.example.org/rpc".to_string(),
    ]);
    assert_eq!(external, 1);
}

#[tokio::test]
async fn test_notify_without_directories_only_queues_external_links() {
    let mut ctx = create_test_state(
        vec![test_entry(7, "Entry A", "/2026/08/23/entry-a/")],
        StaticFetcher::default(),
        vec![],
    );
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.post("/notify").json(&payload()).await;

    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(response.json::<serde_json::Value>()["queued"], 1);

    assert!(matches!(
        ctx.notify_rx.try_recv(),
        Ok(NotifyJob::ExternalLinks { .. })
    ));
    assert!(ctx.notify_rx.try_recv().is_err());
}
