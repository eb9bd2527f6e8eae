//! services/api/tests/api_routes.rs
//!
//! End-to-end tests for the HTTP layer: each test builds the full router
//! against a throwaway data directory and drives it with in-memory requests.

use api_lib::adapters::DisabledMailer;
use api_lib::config::Config;
use api_lib::web::{api_router, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app_for(dir: &TempDir) -> Router {
    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().expect("socket addr"),
        data_dir: dir.path().to_path_buf(),
        log_level: tracing::Level::INFO,
        app_url: "http://localhost:8080".to_string(),
        mail: None,
    });
    api_router(Arc::new(AppState::new(config, Arc::new(DisabledMailer))))
}

fn seed(dir: &TempDir, file: &str, contents: Value) {
    let path = dir.path().join(file);
    std::fs::write(path, contents.to_string()).expect("seed fixture");
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

//=========================================================================================
// Payment config
//=========================================================================================

#[tokio::test]
async fn payment_put_then_get_reflects_merged_fields() {
    let dir = TempDir::new().expect("tempdir");
    seed(
        &dir,
        "config-pay.json",
        json!({"originalPrice": 9999.0, "totalAmount": 4999.0, "courseName": "Full Stack"}),
    );
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/payment-config/pay",
        Some(json!({"totalAmount": 2999.0, "discount": 70.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, body) = send(&app, Method::GET, "/api/payment-config/pay", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageId"], json!("pay"));
    assert_eq!(body["data"]["totalAmount"], json!(2999.0));
    assert_eq!(body["data"]["discount"], json!(70.0));
    // Fields the patch did not mention survive the merge.
    assert_eq!(body["data"]["courseName"], json!("Full Stack"));
    assert_eq!(body["data"]["originalPrice"], json!(9999.0));
}

#[tokio::test]
async fn payment_rejects_pages_outside_the_family() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    for bad in ["offline", "hybrid", "bogus"] {
        let uri = format!("/api/payment-config/{}", bad);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            json!("Invalid page ID. Use: pay, pay1, pay2, or online")
        );
    }
}

//=========================================================================================
// Online course catalog
//=========================================================================================

#[tokio::test]
async fn new_online_course_gets_slug_id_and_defaults() {
    let dir = TempDir::new().expect("tempdir");
    seed(&dir, "config-online.json", json!({"courses": [], "batches": []}));
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/online-config/course",
        Some(json!({"name": "Cyber Security!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!("cyber-security"));
    assert_eq!(body["data"]["price"], json!(0.0));
    assert_eq!(body["data"]["duration"], json!("3 Months"));
    assert_eq!(body["data"]["batchCount"], json!(1));
    assert_eq!(body["data"]["icon"], json!("school"));
    assert_eq!(body["data"]["color"], json!("blue"));
}

#[tokio::test]
async fn equivalent_course_names_are_not_deduplicated() {
    let dir = TempDir::new().expect("tempdir");
    seed(&dir, "config-online.json", json!({"courses": [], "batches": []}));
    let app = app_for(&dir);

    for name in ["Cyber Security", "cyber security!"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/online-config/course",
            Some(json!({"name": name})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/api/online-config", None).await;
    let courses = body["data"]["courses"].as_array().expect("courses array");
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["id"], courses[1]["id"]);
}

#[tokio::test]
async fn new_course_requires_a_name() {
    let dir = TempDir::new().expect("tempdir");
    seed(&dir, "config-online.json", json!({"courses": [], "batches": []}));
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/online-config/course",
        Some(json!({"price": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Course name is required"));
}

#[tokio::test]
async fn batches_body_must_be_an_array() {
    let dir = TempDir::new().expect("tempdir");
    seed(&dir, "config-online.json", json!({"courses": [], "batches": []}));
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/online-config/batches",
        Some(json!({"batches": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Batches must be an array"));
}

#[tokio::test]
async fn deleting_a_course_cascades_to_its_batches() {
    let dir = TempDir::new().expect("tempdir");
    seed(
        &dir,
        "config-online.json",
        json!({
            "courses": [
                {"id": "rust", "name": "Rust", "icon": "school", "color": "blue",
                 "price": 99.0, "duration": "3 Months", "batchCount": 2},
                {"id": "go", "name": "Go", "icon": "school", "color": "green",
                 "price": 89.0, "duration": "3 Months", "batchCount": 1}
            ],
            "batches": [
                {"id": "1", "courseId": "rust", "faculty": "A"},
                {"id": "2", "courseId": "go", "faculty": "B"},
                {"id": "3", "courseId": "rust", "faculty": "C"}
            ]
        }),
    );
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/online-config/course/rust",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!("rust"));

    let (_, body) = send(&app, Method::GET, "/api/online-config", None).await;
    let courses = body["data"]["courses"].as_array().expect("courses");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], json!("go"));
    let batches = body["data"]["batches"].as_array().expect("batches");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["courseId"], json!("go"));
}

#[tokio::test]
async fn deleting_an_unknown_course_is_404() {
    let dir = TempDir::new().expect("tempdir");
    seed(&dir, "config-online.json", json!({"courses": [], "batches": []}));
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/online-config/course/nope",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

//=========================================================================================
// Students
//=========================================================================================

#[tokio::test]
async fn student_ids_share_a_month_prefix_and_increment() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let mut ids = Vec::new();
    for n in 1..=3 {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": format!("Student {}", n), "email": format!("s{}@x.io", n)})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["data"]["id"].as_str().expect("id").to_string());
    }

    let prefix = &ids[0][..4];
    for id in &ids {
        assert_eq!(id.len(), 8);
        assert_eq!(&id[..4], prefix);
    }
    assert!(ids[0][4..] < ids[1][4..]);
    assert!(ids[1][4..] < ids[2][4..]);
    assert_eq!(&ids[0][4..], "0001");
}

#[tokio::test]
async fn listing_students_reports_a_count() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    for n in 1..=2 {
        send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": format!("S{}", n)})),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["data"].as_array().expect("list").len(), 2);
}

#[tokio::test]
async fn deleting_an_unknown_student_leaves_the_list_alone() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    send(&app, Method::POST, "/api/students", Some(json!({"name": "Keep"}))).await;

    let (status, _) = send(&app, Method::DELETE, "/api/students/99999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn deleting_a_student_returns_the_removed_record() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "Gone", "email": "gone@x.io"})),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("gone@x.io"));

    let (_, body) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn migration_rejects_non_array_bodies() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students/migrate",
        Some(json!({"students": {"name": "not a list"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Students must be an array"));
}

#[tokio::test]
async fn migration_skips_records_with_known_emails() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "Existing", "email": "known@x.io"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students/migrate",
        Some(json!({"students": [
            {"name": "Dup", "email": "known@x.io"},
            {"name": "Fresh", "email": "fresh@x.io"}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["migratedCount"], json!(1));
    assert_eq!(body["data"]["totalStudents"], json!(2));
}

#[tokio::test]
async fn dashboard_stats_track_the_student_count() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let (status, body) = send(&app, Method::GET, "/api/students/stats/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalStudents"], json!(0));
    assert_eq!(body["data"]["avgCompletion"], json!(68));
    assert_eq!(body["data"]["courseRating"], json!(4.6));
    assert_eq!(body["data"]["reviewCount"], json!(0));
    assert_eq!(body["data"]["trendPercent"], json!(0));
}

//=========================================================================================
// Users
//=========================================================================================

fn signup_body(email: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": "s3cret!pass"
    })
}

#[tokio::test]
async fn signup_validates_fields_and_email_format() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(json!({"firstName": "Ada", "email": "a@b.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("MISSING_FIELDS"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(signup_body("not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("INVALID_EMAIL"));
}

#[tokio::test]
async fn duplicate_signup_is_rejected_without_a_second_record() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(signup_body("ada@x.io")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Mail is not configured in tests, so the email-sent variant never fires.
    assert_eq!(body["message"], json!("SIGNUP_SUCCESS"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(signup_body("ada@x.io")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("ALREADY_REGISTERED"));

    let (_, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn login_checks_credentials_and_never_leaks_passwords() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(signup_body("ada@x.io")),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        Some(json!({"email": "ada@x.io", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("INVALID_CREDENTIALS"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        Some(json!({"email": "ada@x.io", "password": "s3cret!pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("LOGIN_SUCCESS"));
    assert!(body["data"].get("password").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        Some(json!({"email": "ada@x.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("MISSING_FIELDS"));
}

#[tokio::test]
async fn verification_is_one_shot_then_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(&dir);

    send(
        &app,
        Method::POST,
        "/api/users/signup",
        Some(signup_body("ada@x.io")),
    )
    .await;

    // The token never leaves the API, so fish it out of the backing file.
    let raw = std::fs::read_to_string(dir.path().join("users.json")).expect("users file");
    let file: Value = serde_json::from_str(&raw).expect("users json");
    let token = file["users"][0]["verificationToken"]
        .as_str()
        .expect("token")
        .to_string();
    assert_eq!(token.len(), 64);

    let uri = format!("/api/users/verify/{}", token);
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!("Email already verified. You can now log in.")
    );

    let (status, body) = send(&app, Method::GET, "/api/users/verify/deadbeef", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Invalid verification token"));

    let (_, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(body["data"][0]["isVerified"], json!(true));
    assert_eq!(body["data"][0]["verificationToken"], Value::Null);
}
