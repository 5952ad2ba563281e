mod common;

use axum_test::TestServer;
use linkback::routes::app_router;

use common::{StaticFetcher, create_test_state, test_entry};

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = create_test_state(
        vec![test_entry(1, "Entry A", "/entry-a/")],
        StaticFetcher::default(),
        vec![],
    );
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["notify_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = create_test_state(Vec::new(), StaticFetcher::default(), vec![]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/health").await;
    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("database").is_some());
    assert!(json["checks"].get("notify_queue").is_some());
}
