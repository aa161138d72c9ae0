use super::*;
use axum::{
    body::{self, Body},
    http::Request,
};
use server_api::ApiContext;
use storage::Storage;
use tower::ServiceExt;

async fn test_app() -> Router {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    build_router(Arc::new(AppState {
        api: ApiContext { storage },
    }))
}

fn ann_json() -> serde_json::Value {
    serde_json::json!({
        "employeeId": "E1",
        "name": "Ann",
        "department": "Engineering",
        "designation": "Dev",
        "primarySkill": "Go",
        "secondarySkill": "",
        "skillRating": 7,
        "yearsOfExperience": 3,
        "email": "ann@x.com"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

fn post_json(uri: &str, value: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .expect("request")
}

#[test]
fn error_codes_map_to_http_statuses() {
    assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(status_for(ErrorCode::Validation), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_for(ErrorCode::Internal),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Request::get("/healthz").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn create_then_list_and_search() {
    let app = test_app().await;
    let (status, body) = send(&app, post_json("/employees", &ann_json())).await;
    assert_eq!(status, StatusCode::OK);
    let created: EmployeeRecord = serde_json::from_slice(&body).expect("json");
    assert_eq!(created.skill_rating, 7);

    let (status, body) = send(
        &app,
        Request::get("/employees").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let all: Vec<EmployeeRecord> = serde_json::from_slice(&body).expect("json");
    assert_eq!(all, vec![created.clone()]);

    let (status, body) = send(
        &app,
        Request::get("/employees/search/E1")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let found: EmployeeRecord = serde_json::from_slice(&body).expect("json");
    assert_eq!(found, created);
}

#[tokio::test]
async fn search_miss_returns_not_found_body() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Request::get("/employees/search/E99")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn create_with_bad_rating_is_rejected() {
    let app = test_app().await;
    let mut payload = ann_json();
    payload["skillRating"] = serde_json::json!(0);
    let (status, _) = send(&app, post_json("/employees", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_then_delete_by_record_id() {
    let app = test_app().await;
    let (_, body) = send(&app, post_json("/employees", &ann_json())).await;
    let created: EmployeeRecord = serde_json::from_slice(&body).expect("json");

    let update = Request::put(format!("/employees/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "designation": "Lead", "name": "" }).to_string(),
        ))
        .expect("request");
    let (status, body) = send(&app, update).await;
    assert_eq!(status, StatusCode::OK);
    let updated: EmployeeRecord = serde_json::from_slice(&body).expect("json");
    assert_eq!(updated.designation, "Lead");
    assert_eq!(updated.name, "Ann");

    let delete = Request::delete(format!("/employees/{}", created.id))
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let delete_again = Request::delete(format!("/employees/{}", created.id))
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, delete_again).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
