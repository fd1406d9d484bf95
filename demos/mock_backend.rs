//! Stand-in booking backend for running the gateway locally.
//!
//! ```text
//! cargo run --example mock_backend
//! BACKEND_URL=http://127.0.0.1:4000 cargo run
//! curl -i -X POST localhost:8080/api/auth/login -d '{"email":"a@b.c"}'
//! ```

use axum::{
    http::{header::SET_COOKIE, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn login(Json(credentials): Json<Value>) -> (HeaderMap, Json<Value>) {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, "session=demo; HttpOnly; Path=/".parse().unwrap());
    (headers, Json(json!({ "user": { "email": credentials["email"], "role": "admin" } })))
}

async fn vehicles() -> Json<Value> {
    Json(json!([
        { "slug": "s-class", "seats": 3 },
        { "slug": "v-class", "seats": 7 }
    ]))
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/vehicles", get(vehicles));

    let addr = SocketAddr::from(([127, 0, 0, 1], 4000));
    println!("Mock booking backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
