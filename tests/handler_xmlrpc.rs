mod common;

use axum_test::TestServer;
use linkback::domain::entities::LinkbackKind;
use linkback::infrastructure::xmlrpc::codec::build_method_call;
use linkback::routes::app_router;

use common::{StaticFetcher, create_test_state, test_entry};

const TARGET: &str = "http://blog.example.com/2026/08/23/entry-a/";
const SOURCE: &str = "http://friend.example.org/my-reply/";

fn source_page() -> String {
    format!(
        r#"<html><head><title>My reply</title></head>
        <body><p>I am replying to <a href="{TARGET}">entry A</a> here.</p></body></html>"#
    )
}

fn default_context() -> common::TestContext {
    create_test_state(
        vec![test_entry(7, "Entry A", "/2026/08/23/entry-a/")],
        StaticFetcher::default().with_page(SOURCE, &source_page()),
        vec![],
    )
}

fn server(ctx: &common::TestContext) -> TestServer {
    TestServer::new(app_router(ctx.state.clone())).unwrap()
}

#[tokio::test]
async fn test_ping_registers_a_pingback() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[SOURCE, TARGET]))
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(&format!(
        "<string>Pingback from {SOURCE} to {TARGET} registered.</string>"
    )));

    let rows = ctx.linkbacks.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, LinkbackKind::Pingback);
    assert_eq!(rows[0].title, "My reply");
    assert_eq!(*ctx.entries.pingback_increments.lock().unwrap(), vec![7]);
}

#[tokio::test]
async fn test_response_is_xml() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[SOURCE, TARGET]))
        .await;

    let content_type = response.headers().get("content-type").unwrap();
    assert_eq!(content_type, "text/xml; charset=utf-8");
}

#[tokio::test]
async fn test_duplicate_ping_returns_48() {
    let ctx = default_context();
    let server = server(&ctx);

    let call = build_method_call("pingback.ping", &[SOURCE, TARGET]);
    server.post("/xmlrpc").text(call.clone()).await;
    let response = server.post("/xmlrpc").text(call).await;

    assert!(response.text().contains("<int>48</int>"));
    assert_eq!(ctx.linkbacks.rows.lock().unwrap().len(), 1);
    assert_eq!(ctx.entries.pingback_increments.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_source_equal_to_target_returns_0() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[TARGET, TARGET]))
        .await;

    assert!(response.text().contains("<int>0</int>"));
}

#[tokio::test]
async fn test_unreachable_source_returns_16() {
    let ctx = create_test_state(
        vec![test_entry(7, "Entry A", "/2026/08/23/entry-a/")],
        StaticFetcher::default(),
        vec![],
    );
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[SOURCE, TARGET]))
        .await;

    assert!(response.text().contains("<int>16</int>"));
}

#[tokio::test]
async fn test_foreign_target_returns_32() {
    let foreign = "http://elsewhere.example.net/post/";
    let ctx = create_test_state(
        vec![test_entry(7, "Entry A", "/2026/08/23/entry-a/")],
        StaticFetcher::default().with_page(
            SOURCE,
            &format!(r#"<p><a href="{foreign}">elsewhere</a></p>"#),
        ),
        vec![],
    );
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[SOURCE, foreign]))
        .await;

    assert!(response.text().contains("<int>32</int>"));
}

#[tokio::test]
async fn test_unknown_method_faults() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call("system.listMethods", &[]))
        .await;

    let body = response.text();
    assert!(body.contains("<fault>"));
    assert!(body.contains("-32601"));
}

#[tokio::test]
async fn test_malformed_document_faults() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server.post("/xmlrpc").text("this is not xml").await;

    let body = response.text();
    assert!(body.contains("<fault>"));
    assert!(body.contains("-32700"));
}

#[tokio::test]
async fn test_get_pingbacks_lists_registered_sources() {
    let ctx = default_context();
    let server = server(&ctx);

    server
        .post("/xmlrpc")
        .text(build_method_call("pingback.ping", &[SOURCE, TARGET]))
        .await;

    let response = server
        .post("/xmlrpc")
        .text(build_method_call(
            "pingback.extensions.getPingbacks",
            &[TARGET],
        ))
        .await;

    let body = response.text();
    assert!(body.contains("<array>"));
    assert!(body.contains(&format!("<string>{SOURCE}</string>")));
}

#[tokio::test]
async fn test_get_pingbacks_for_unknown_target_returns_32() {
    let ctx = default_context();
    let server = server(&ctx);

    let response = server
        .post("/xmlrpc")
        .text(build_method_call(
            "pingback.extensions.getPingbacks",
            &["http://blog.example.com/no-such-entry/"],
        ))
        .await;

    assert!(response.text().contains("<int>32</int>"));
}
