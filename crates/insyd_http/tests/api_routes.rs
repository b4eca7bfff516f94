use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use insyd_core::db::open_db_in_memory;
use insyd_http::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(allow_reset: bool) -> Router {
    build_router(AppState::new(open_db_in_memory().unwrap(), allow_reset))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seeded() -> Router {
    let router = router(true);
    let (status, _) = send(&router, "GET", "/init", None).await;
    assert_eq!(status, StatusCode::OK);
    router
}

#[tokio::test]
async fn init_follow_blog_and_read_notifications() {
    let router = router(true);

    let (status, users) = send(&router, "GET", "/init", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        users,
        json!([
            { "id": 1, "name": "Alice" },
            { "id": 2, "name": "Bob" },
            { "id": 3, "name": "Charlie" }
        ])
    );

    let (status, body) = send(
        &router,
        "POST",
        "/follow",
        Some(json!({ "followerId": 2, "followeeId": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &router,
        "POST",
        "/blog",
        Some(json!({ "userId": 1, "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notified"], 1);

    let (status, body) = send(&router, "GET", "/notifications/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["content"]
        .as_str()
        .unwrap()
        .contains("Alice posted a new blog: hello"));
    assert_eq!(items[0]["userId"], 2);

    let (_, following) = send(&router, "GET", "/following/2", None).await;
    assert_eq!(following, json!([1]));
    let (_, followers) = send(&router, "GET", "/followers/1", None).await;
    assert_eq!(followers, json!([2]));
    let (_, activities) = send(&router, "GET", "/activities/1", None).await;
    assert_eq!(activities[0]["type"], "blog");
}

#[tokio::test]
async fn follow_errors_use_kind_envelope_and_status() {
    let router = seeded().await;
    let edge = json!({ "followerId": 2, "followeeId": 1 });

    send(&router, "POST", "/follow", Some(edge.clone())).await;
    let (status, body) = send(&router, "POST", "/follow", Some(edge)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"], "conflict");
    assert!(body["error"]["message"].is_string());

    let (status, body) = send(
        &router,
        "POST",
        "/follow",
        Some(json!({ "followerId": 1, "followeeId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation_error");

    let (status, body) = send(
        &router,
        "POST",
        "/unfollow",
        Some(json!({ "followerId": 3, "followeeId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");
}

#[tokio::test]
async fn unfollow_then_following_list_is_empty() {
    let router = seeded().await;
    let edge = json!({ "followerId": 2, "followeeId": 1 });

    send(&router, "POST", "/follow", Some(edge.clone())).await;
    let (status, body) = send(&router, "POST", "/unfollow", Some(edge)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, following) = send(&router, "GET", "/following/2", None).await;
    assert_eq!(following, json!([]));
    let (_, notifications) = send(&router, "GET", "/notifications/1", None).await;
    assert_eq!(notifications[0]["content"], "Bob unfollowed you");
}

#[tokio::test]
async fn invalid_input_is_rejected_before_core() {
    let router = seeded().await;

    let (status, body) = send(
        &router,
        "POST",
        "/comment",
        Some(json!({ "userId": 99, "content": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");

    let (status, body) = send(
        &router,
        "POST",
        "/follow",
        Some(json!({ "followerId": "two", "followeeId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation_error");

    let request = Request::builder()
        .method("POST")
        .uri("/blog")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, "GET", "/notifications/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_can_be_created_and_listed() {
    let router = seeded().await;

    let (status, body) = send(&router, "POST", "/users", Some(json!({ "name": " Dana " }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 4, "name": "Dana" }));

    let (status, body) = send(&router, "POST", "/users", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation_error");

    let (_, users) = send(&router, "GET", "/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn reset_is_forbidden_when_disabled() {
    let router = router(false);

    let (status, body) = send(&router, "GET", "/init", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["kind"], "forbidden");

    let (status, _) = send(&router, "POST", "/admin/reset", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn cors_preflight_health_and_unknown_routes() {
    let router = router(true);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/follow")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&router, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");
}
