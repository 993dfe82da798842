//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that makes HTTP requests against the full
//! router with a fresh, empty report store. Methods are intentionally
//! broad to support various test scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::Router;
use http_body_util::BodyExt;
use rozpocet::config::Config;
use rozpocet::error_pages::{error_page_middleware, fallback_handler};
use rozpocet::handlers;
use rozpocet::services::sheet_reader::HEADER_SKIP_ROWS;
use rozpocet::state::{AppState, ReportStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// A test client simulating one browser session against the application.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with an empty report store.
    pub fn new() -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            static_path: PathBuf::from("static"),
            currency: "Kč".into(),
            locale: "cs-CZ".into(),
        };

        Self {
            state: AppState {
                config: Arc::new(config),
                reports: ReportStore::default(),
            },
        }
    }

    /// Router for direct handler testing.
    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Router with the error-page middleware and fallback applied
    /// (mimics production setup).
    pub fn router_with_error_pages(&self) -> Router {
        handlers::routes()
            .fallback(fallback_handler)
            .layer(middleware::from_fn(error_page_middleware))
            .with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request against the full router with error pages.
    pub async fn get_with_error_pages(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router_with_error_pages()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    /// POST a single file as multipart form data and return status plus
    /// the `Location` header (empty when absent).
    pub async fn post_multipart(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        content: &[u8],
    ) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(multipart_request(uri, field, file_name, content))
            .await
            .unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        (status, location)
    }

    /// POST a file through the full router with error pages, returning
    /// status and response body.
    pub async fn post_multipart_with_error_pages(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        content: &[u8],
    ) -> (StatusCode, String) {
        let response = self
            .router_with_error_pages()
            .oneshot(multipart_request(uri, field, file_name, content))
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Upload a sheet and assert the redirect to the report page.
    pub async fn upload_sheet(&self, file_name: &str, content: &[u8]) {
        let (status, location) = self
            .post_multipart("/upload", "file", file_name, content)
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/report");
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn multipart_request(uri: &str, field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// CSV bytes with the fixed title block, a header row and the given
/// data rows, mirroring the layout of the real revenue export.
pub fn sheet_with_rows(data_rows: &[&str]) -> Vec<u8> {
    let mut out = String::new();
    for i in 0..HEADER_SKIP_ROWS {
        out.push_str(&format!("výkaz pro hodnocení plnění rozpočtu {}\n", i + 1));
    }
    out.push_str(
        "Obec,Třída,Seskupení položek,Podseskupení položek,Položka,\
         Schválený,Po změnách,Skutečnost\n",
    );
    for row in data_rows {
        out.push_str(row);
        out.push('\n');
    }
    out.into_bytes()
}

/// A small but realistic revenue sheet.
pub fn sample_sheet() -> Vec<u8> {
    sheet_with_rows(&[
        "Polešovice,Daňové příjmy,Daně z příjmů,FO,Daň z příjmů fyzických osob,5000,5200,5150",
        "Polešovice,Daňové příjmy,Daně z příjmů,PO,Daň z příjmů právnických osob,4000,4100,3900",
        "Polešovice,Daňové příjmy,Poplatky,Místní,Poplatek ze psů,100,100,80",
        "Polešovice,Nedaňové příjmy,Příjmy z vlastní činnosti,,Vodné,800,800,750",
        "Polešovice,Nedaňové příjmy,,,Ostatní příjmy,50,50,20",
    ])
}

/// Sum of the actual amounts in [`sample_sheet`].
pub const SAMPLE_SHEET_TOTAL: f64 = 5150.0 + 3900.0 + 80.0 + 750.0 + 20.0;
