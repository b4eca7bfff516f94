//! Axum router and request handlers.
//!
//! ```text
//! GET  /init                     reset + seed (legacy path)
//! POST /admin/reset              reset + seed
//! GET  /users                    list users
//! POST /users                    create user
//! POST /follow | /unfollow       change follow edge
//! POST /blog | /comment          post with fan-out
//! GET  /notifications/:user_id   newest first
//! GET  /following/:user_id       followee ids
//! GET  /followers/:user_id       follower ids
//! GET  /activities/:user_id      newest first
//! GET  /health
//! ```

use crate::error::ApiError;
use crate::request::{
    parse_path_id, CreateUserRequest, EdgeResponse, FollowRequest, HealthResponse, PostRequest,
    PostResponse,
};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use insyd_core::{
    core_version, Activity, ActivityKind, AdminService, FeedService, GraphService, Notification,
    PostService, User, UserId,
};
use log::debug;

/// Builds the complete router with CORS applied to every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/init", get(reset))
        .route("/admin/reset", post(reset))
        .route("/users", get(list_users).post(create_user))
        .route("/follow", post(follow))
        .route("/unfollow", post(unfollow))
        .route("/blog", post(post_blog))
        .route("/comment", post(post_comment))
        .route("/notifications/:user_id", get(notifications))
        .route("/following/:user_id", get(following))
        .route("/followers/:user_id", get(followers))
        .route("/activities/:user_id", get(activities))
        .route("/health", get(health))
        .fallback(no_route)
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(state)
}

async fn allow_any_origin(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

async fn no_route() -> ApiError {
    ApiError::not_found("no such route")
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: core_version(),
    })
}

async fn reset(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let allow_reset = state.allow_reset();
    let users = state
        .run(move |conn| AdminService::new(conn, allow_reset).reset_and_seed())
        .await?;
    Ok(Json(users))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .run(|conn| AdminService::new(conn, false).list_users())
        .await?;
    Ok(Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload?;
    let user = state
        .run(move |conn| AdminService::new(conn, false).create_user(&request.name))
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn follow(
    State(state): State<AppState>,
    payload: Result<Json<FollowRequest>, JsonRejection>,
) -> Result<Json<EdgeResponse>, ApiError> {
    let Json(request) = payload?;
    let (follower_id, followee_id) = request.validate()?;
    let outcome = state
        .run(move |conn| GraphService::new(conn).follow(follower_id, followee_id))
        .await?;
    Ok(Json(EdgeResponse {
        success: true,
        activity_id: outcome.activity.id,
    }))
}

async fn unfollow(
    State(state): State<AppState>,
    payload: Result<Json<FollowRequest>, JsonRejection>,
) -> Result<Json<EdgeResponse>, ApiError> {
    let Json(request) = payload?;
    let (follower_id, followee_id) = request.validate()?;
    let outcome = state
        .run(move |conn| GraphService::new(conn).unfollow(follower_id, followee_id))
        .await?;
    Ok(Json(EdgeResponse {
        success: true,
        activity_id: outcome.activity.id,
    }))
}

async fn post_blog(
    State(state): State<AppState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    publish(state, ActivityKind::Blog, payload).await
}

async fn post_comment(
    State(state): State<AppState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    publish(state, ActivityKind::Comment, payload).await
}

async fn publish(
    state: AppState,
    kind: ActivityKind,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    let Json(request) = payload?;
    let user_id = request.validate()?;
    let outcome = state
        .run(move |conn| PostService::new(conn).post(kind, user_id, &request.content))
        .await?;
    Ok(Json(PostResponse {
        success: true,
        activity_id: outcome.activity.id,
        notified: outcome.notified(),
    }))
}

async fn notifications(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let user_id = parse_path_id(&segment)?;
    let items = state
        .run(move |conn| FeedService::from_connection(conn).notifications_for(user_id))
        .await?;
    debug!(
        "event=notifications_list module=http status=ok user_id={} count={}",
        user_id,
        items.len()
    );
    Ok(Json(items))
}

async fn following(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<UserId>>, ApiError> {
    let user_id = parse_path_id(&segment)?;
    let ids = state
        .run(move |conn| GraphService::new(conn).following(user_id))
        .await?;
    Ok(Json(ids))
}

async fn followers(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<UserId>>, ApiError> {
    let user_id = parse_path_id(&segment)?;
    let ids = state
        .run(move |conn| GraphService::new(conn).followers(user_id))
        .await?;
    Ok(Json(ids))
}

async fn activities(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let user_id = parse_path_id(&segment)?;
    let items = state
        .run(move |conn| FeedService::from_connection(conn).activities_for(user_id))
        .await?;
    Ok(Json(items))
}
