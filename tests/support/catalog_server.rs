//! A local stand-in for the catalog endpoint, served with axum.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use storefront_state::Product;

pub enum Reply {
    Products(Vec<Product>),
    Status(StatusCode),
    Body(&'static str),
}

/// Serve `GET /products` with `reply` on an ephemeral port and return the
/// base URL.
pub async fn serve(reply: Reply) -> String {
    let app = match reply {
        Reply::Products(products) => {
            Router::new().route("/products", get(move || async move { Json(products) }))
        }
        Reply::Status(status) => {
            Router::new().route("/products", get(move || async move { status.into_response() }))
        }
        Reply::Body(body) => Router::new().route(
            "/products",
            get(move || async move {
                ([("content-type", "application/json")], body).into_response()
            }),
        ),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
