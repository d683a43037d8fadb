use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use books_catalog::{api, db, seed};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    seed::seed_demo_data(&db)
        .await
        .expect("Failed to seed demo data");
    api::api_router(db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_authors_sorted_by_last_name() {
    let app = setup_test_app().await;

    let response = send(&app, "GET", "/authors", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let last_names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["lastName"].as_str().unwrap())
        .collect();
    assert_eq!(last_names, vec!["Asimov", "Herbert", "Le Guin", "Tolkien"]);
}

#[tokio::test]
async fn test_list_authors_by_name_fragment() {
    let app = setup_test_app().await;

    // Matches first or last name, case-insensitively
    let json = json_body(send(&app, "GET", "/authors?name=HERB", None).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["firstName"], "Frank");

    let json = json_body(send(&app, "GET", "/authors?name=isaac", None).await).await;
    assert_eq!(json[0]["lastName"], "Asimov");

    let json = json_body(send(&app, "GET", "/authors?name=nobody", None).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_get_author() {
    let app = setup_test_app().await;

    let payload = json!({ "firstName": " Octavia ", "lastName": "Butler" });
    let response = send(&app, "POST", "/authors", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let json = json_body(response).await;
    let id = json["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/authors/{}", id));
    assert_eq!(json["firstName"], "Octavia");

    let response = send(&app, "GET", &format!("/authors/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["lastName"], "Butler");
}

#[tokio::test]
async fn test_create_author_requires_names() {
    let app = setup_test_app().await;

    let payload = json!({ "firstName": "Octavia", "lastName": "  " });
    let response = send(&app, "POST", "/authors", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Last name is required");
}

#[tokio::test]
async fn test_get_author_not_found() {
    let app = setup_test_app().await;

    let response = send(&app, "GET", "/authors/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Author 999 not found");
}

#[tokio::test]
async fn test_genres() {
    let app = setup_test_app().await;

    let json = json_body(send(&app, "GET", "/genres", None).await).await;
    assert_eq!(json.as_array().unwrap().len(), 4);

    let response = send(&app, "POST", "/genres", Some(json!({ "name": "Horror" }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(&app, "GET", &format!("/genres/{}", id), None).await;
    assert_eq!(json_body(response).await["name"], "Horror");

    let json = json_body(send(&app, "GET", "/genres?name=fiction", None).await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Non-Fiction", "Science Fiction"]);

    let response = send(&app, "POST", "/genres", Some(json!({ "name": "" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/genres/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publishing_houses() {
    let app = setup_test_app().await;

    let payload = json!({ "name": "Tor", "country": "US", "city": "New York" });
    let response = send(&app, "POST", "/publishing-houses", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(&app, "GET", &format!("/publishing-houses/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["city"], "New York");

    let json = json_body(send(&app, "GET", "/publishing-houses", None).await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ace Books", "Tor"]);

    let response = send(&app, "GET", "/publishing-houses/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
