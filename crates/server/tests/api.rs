use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use server::{Account, Credentials};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

fn credentials() -> Credentials {
    Credentials {
        admin: Account {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        },
        student: Account {
            username: "student".to_string(),
            password: "student123".to_string(),
        },
    }
}

async fn new_engine() -> engine::Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    engine::Engine::builder().database(db).build().await.unwrap()
}

async fn app() -> Router {
    server::app(Arc::new(new_engine().await), credentials())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header("content-type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn add_expense(app: &Router, category: &str, amount: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/expenses/add",
        Some(json!({
            "category": category,
            "amount": amount,
            "description": "weekly order",
            "recordedBy": "warden",
        })),
    )
    .await
}

#[tokio::test]
async fn serves_over_a_bound_listener() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(server::run_with_listener(
        new_engine().await,
        credentials(),
        listener,
    ));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /api/menu/all HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(r#""success":true"#), "{response}");

    server.abort();
}

#[tokio::test]
async fn login_accepts_configured_admin() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "admin123", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"role": "admin", "username": "admin"}));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "nope", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn login_with_unknown_role_is_unauthorized() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "admin123", "role": "chef"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn summary_reports_categories_and_total() {
    let app = app().await;

    for (category, amount) in [
        ("Groceries", json!(100)),
        ("Groceries", json!("50")),
        ("Fruits", json!(30.0)),
    ] {
        let (status, body) = add_expense(&app, category, amount).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Expense added successfully");
    }

    let (status, body) = send(&app, Method::GET, "/api/expenses/summary", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["totalMinor"], 18_000);
    assert_eq!(data["total"], 180.0);

    let rows = data["byCategory"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let groceries = rows
        .iter()
        .find(|row| row["category"] == "Groceries")
        .unwrap();
    assert_eq!(groceries["totalAmountMinor"], 15_000);
    assert_eq!(groceries["totalAmount"], 150.0);
    let sum: i64 = rows
        .iter()
        .map(|row| row["totalAmountMinor"].as_i64().unwrap())
        .sum();
    assert_eq!(sum, 18_000);
}

#[tokio::test]
async fn empty_summary_is_zero() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/expenses/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"byCategory": [], "total": 0.0, "totalMinor": 0})
    );
}

#[tokio::test]
async fn negative_amount_is_a_validation_error() {
    let app = app().await;

    let (status, body) = add_expense(&app, "Dairy", json!(-5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation");

    let (_, body) = send(&app, Method::GET, "/api/expenses/all", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn oversized_amount_is_rejected_and_summary_still_answers() {
    let app = app().await;

    let (status, body) = add_expense(&app, "Dairy", json!("50000000000000000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    for _ in 0..2 {
        let (status, _) = add_expense(&app, "Dairy", json!("100000000000")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/api/expenses/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalMinor"], 20_000_000_000_000_i64);
}

#[tokio::test]
async fn unknown_category_and_malformed_json_are_rejected() {
    let app = app().await;

    let (status, body) = add_expense(&app, "Snacks", json!(10)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/expenses/add")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expense_update_and_delete_round() {
    let app = app().await;

    let (_, created) = add_expense(&app, "Cleaning", json!("12,50")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["amountMinor"], 1_250);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/expenses/update/{id}"),
        Some(json!({"amount": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amountMinor"], 2_000);
    assert_eq!(body["data"]["category"], "Cleaning");
    assert_eq!(body["message"], "Expense updated successfully");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/expenses/delete/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Expense deleted successfully");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/expenses/delete/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn bad_id_in_path_is_a_validation_error() {
    let app = app().await;

    let (status, body) = send(&app, Method::DELETE, "/api/menu/delete/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn menus_listed_by_day_and_filtered() {
    let app = app().await;

    for (day, meal) in [("Friday", "Dinner"), ("Monday", "Lunch"), ("Monday", "Breakfast")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/menu/add",
            Some(json!({"day": day, "mealType": meal, "items": ["Rice", "Dal"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/api/menu/all", None).await;
    let order: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| format!("{} {}", m["day"].as_str().unwrap(), m["mealType"].as_str().unwrap()))
        .collect();
    assert_eq!(order, ["Monday Breakfast", "Monday Lunch", "Friday Dinner"]);

    let (status, body) = send(&app, Method::GET, "/api/menu/day/friday", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/menu/day/Someday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn menu_without_items_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/menu/add",
        Some(json!({"day": "Monday", "mealType": "Lunch", "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn attendance_filters_by_date_and_student() {
    let app = app().await;

    let mut marked_days = Vec::new();
    for name in ["Alice", "ALIstair", "Bob"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/attendance/mark",
            Some(json!({
                "studentName": name,
                "className": "10-A",
                "roomNumber": "101",
                "status": "Present",
                "mealType": "Dinner",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Attendance marked successfully");
        marked_days.push(body["data"]["date"].as_str().unwrap()[..10].to_string());
    }

    let (_, body) = send(&app, Method::GET, "/api/attendance/student/ali", None).await;
    let mut names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["studentName"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["ALIstair", "Alice"]);

    let (_, body) = send(&app, Method::GET, "/api/attendance/date/2024-01-15", None).await;
    assert_eq!(body["data"], json!([]));

    let day = &marked_days[0];
    let expected = marked_days.iter().filter(|d| *d == day).count();
    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/attendance/date/{day}"),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), expected);

    let (status, _) = send(&app, Method::GET, "/api/attendance/date/someday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn students_get_generated_ids() {
    let app = app().await;

    let day_before = chrono::Utc::now().format("%Y%m%d").to_string();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students/add",
        Some(json!({
            "name": "Meera",
            "email": "meera@school.test",
            "className": "9-A",
            "roomNumber": "12",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let student_id = body["data"]["studentId"].as_str().unwrap();
    assert_eq!(student_id.len(), 12);
    let day_after = chrono::Utc::now().format("%Y%m%d").to_string();
    assert!(student_id.starts_with(&day_before) || student_id.starts_with(&day_after));

    let id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = send(&app, Method::GET, "/api/students/all", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/students/delete/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
