//! Validation Endpoint Tests
//!
//! Drives the router in-process, the same way the hosting runtime would:
//! - Response shape and status codes for every request category
//! - Concurrent and repeated invocations
//! - Routing, body limits and file references

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use xsd_validator::server::{build_router, ServerArgs};

const MISSING_FIELDS: &str = "invalid request, needs 'data' and 'schema' fields.";
const UNRESOLVABLE: &str = "invalid json body content, can't resolve 'data' and 'schema' fields.";

const SCHEMA_A: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"><xs:element name='a'/></xs:schema>"#;
const SCHEMA_B: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"><xs:element name='b'/></xs:schema>"#;

fn router() -> Router {
    build_router(&ServerArgs::default())
}

async fn post(router: Router, uri: &str, body: impl Into<Body>) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())?;

    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn post_json(router: Router, body: Value) -> Result<(StatusCode, Value)> {
    post(router, "/", body.to_string()).await
}

/// Test 1: Empty object body
///
/// **What:** POSTs `{}`.
/// **Why:** Missing fields must produce 400 with the fixed missing-fields message.
#[tokio::test]
async fn empty_body_object_is_rejected() -> Result<()> {
    let (status, body) = post_json(router(), json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "validation": false, "info": MISSING_FIELDS }));
    Ok(())
}

/// Test 2: Unparsable or partial bodies
///
/// **What:** POSTs an empty body, garbage, and objects with only one of the two fields.
/// **Why:** A body that cannot be parsed is treated as empty, never as a server error.
#[tokio::test]
async fn unusable_bodies_are_missing_fields() -> Result<()> {
    for raw in ["", "{not json", r#"{"data": "<a/>"}"#, r#"{"schema": "<a/>"}"#] {
        let (status, body) = post(router(), "/", raw).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", raw);
        assert_eq!(body["validation"], json!(false));
        assert_eq!(body["info"], json!(MISSING_FIELDS));
    }
    Ok(())
}

/// Test 3: Non-conforming document
///
/// **What:** `<a/>` against a schema requiring `<b/>`.
/// **Why:** Validity and HTTP status are independent; an invalid document still gets 200.
#[tokio::test]
async fn non_conforming_document_is_200_false() -> Result<()> {
    let (status, body) = post_json(router(), json!({ "data": "<a/>", "schema": SCHEMA_B })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "validation": false, "info": "successful validation" })
    );
    Ok(())
}

/// Test 4: Invalid schema
///
/// **What:** `<a/>` used as the schema.
/// **Why:** Engine failures collapse into the generic 400 message.
#[tokio::test]
async fn invalid_schema_is_rejected() -> Result<()> {
    let (status, body) = post_json(router(), json!({ "data": "<a/>", "schema": "<a/>" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "validation": false, "info": UNRESOLVABLE }));
    Ok(())
}

/// Test 5: Conforming document
///
/// **What:** `<a/>` against a schema declaring `<a/>`.
/// **Why:** The happy path answers 200 with a positive verdict.
#[tokio::test]
async fn conforming_document_is_200_true() -> Result<()> {
    let (status, body) = post_json(router(), json!({ "data": "<a/>", "schema": SCHEMA_A })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "validation": true, "info": "successful validation" })
    );
    Ok(())
}

/// Test 6: Malformed document and non-string fields
///
/// **What:** Unparsable XML, and a numeric `data` field.
/// **Why:** Both are fields that cannot be resolved, answered with the generic 400 message.
#[tokio::test]
async fn unresolvable_fields_are_rejected() -> Result<()> {
    for payload in [
        json!({ "data": "<a><b></a>", "schema": SCHEMA_A }),
        json!({ "data": 7, "schema": SCHEMA_A }),
        json!({ "data": "<a/>", "schema": null }),
    ] {
        let (status, body) = post_json(router(), payload.clone()).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body, json!({ "validation": false, "info": UNRESOLVABLE }));
    }
    Ok(())
}

/// Test 7: Concurrent and repeated invocations
///
/// **What:** Fires the same mix of requests concurrently, twice.
/// **Why:** The handler holds no shared mutable state, so every round gives identical answers.
#[tokio::test]
async fn concurrent_requests_are_independent() -> Result<()> {
    let app = router();
    let payloads = vec![
        json!({ "data": "<a/>", "schema": SCHEMA_A }),
        json!({ "data": "<a/>", "schema": SCHEMA_B }),
        json!({ "data": "<a/>", "schema": "<a/>" }),
        json!({}),
    ];

    let mut rounds = Vec::new();
    for _ in 0..2 {
        let calls = payloads
            .iter()
            .cycle()
            .take(16)
            .map(|p| post_json(app.clone(), p.clone()));
        let results = futures::future::join_all(calls).await;
        let results: Vec<(StatusCode, Value)> = results.into_iter().collect::<Result<_>>()?;
        rounds.push(results);
    }

    assert_eq!(rounds[0], rounds[1]);
    assert_eq!(rounds[0][0].0, StatusCode::OK);
    assert_eq!(rounds[0][1].0, StatusCode::OK);
    assert_eq!(rounds[0][2].0, StatusCode::BAD_REQUEST);
    assert_eq!(rounds[0][3].0, StatusCode::BAD_REQUEST);
    Ok(())
}

/// Test 8: Oversized body
///
/// **What:** Sends a body above the configured limit.
/// **Why:** An unreadable body is treated as absent and keeps the usual response shape.
#[tokio::test]
async fn oversized_body_is_missing_fields() -> Result<()> {
    let args = ServerArgs {
        max_body_bytes: 16,
        ..ServerArgs::default()
    };
    let payload = json!({ "data": "<a/>", "schema": SCHEMA_A }).to_string();
    let (status, body) = post(build_router(&args), "/", payload).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["info"], json!(MISSING_FIELDS));
    Ok(())
}

/// Test 9: Custom route and health check
///
/// **What:** Serves validation on `/validate` and calls `/health`.
/// **Why:** The validation path is configurable for platforms that do not route to `/`.
#[tokio::test]
async fn custom_route_and_health() -> Result<()> {
    let args = ServerArgs {
        route: "/validate".to_string(),
        ..ServerArgs::default()
    };
    let app = build_router(&args);

    let (status, body) = post(
        app.clone(),
        "/validate",
        json!({ "data": "<a/>", "schema": SCHEMA_A }).to_string(),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation"], json!(true));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let health: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(health, json!({ "status": "ok" }));
    Ok(())
}

/// Test 10: File references
///
/// **What:** Configures a reference root and sends file names instead of inline XML.
/// **Why:** References resolve only inside the root; escaping it is an unresolvable field.
#[tokio::test]
async fn file_references_under_root() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("a.xsd"), SCHEMA_A)?;
    std::fs::write(dir.path().join("a.xml"), "<a/>")?;

    let args = ServerArgs {
        reference_root: Some(dir.path().to_path_buf()),
        ..ServerArgs::default()
    };
    let app = build_router(&args);

    let (status, body) =
        post_json(app.clone(), json!({ "data": "a.xml", "schema": "a.xsd" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation"], json!(true));

    let (status, body) =
        post_json(app, json!({ "data": "../a.xml", "schema": "a.xsd" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["info"], json!(UNRESOLVABLE));

    // without a root, the same request is refused
    let (status, _) = post_json(router(), json!({ "data": "a.xml", "schema": "a.xsd" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
