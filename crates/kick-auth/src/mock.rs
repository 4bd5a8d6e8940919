//! Throwaway OAuth server for tests.
//!
//! Answers every request with a canned status and JSON body and records what
//! it received so tests can assert on the wire format.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tokio::net::TcpListener;

/// One request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub body: String,
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

/// Start a mock server; returns its base URL and the request log.
pub async fn start(status: StatusCode, response_body: &'static str) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let handler_log = log.clone();

    tokio::spawn(async move {
        let app = axum::Router::new().fallback(move |request: Request<Body>| {
            let log = handler_log.clone();
            async move {
                let method = request.method().to_string();
                let path = request.uri().path().to_string();
                let query = parse_pairs(request.uri().query().unwrap_or(""));
                let headers = request
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                    .collect();
                let bytes = axum::body::to_bytes(request.into_body(), 1024 * 1024)
                    .await
                    .unwrap();
                let body = String::from_utf8_lossy(&bytes).to_string();
                log.lock().unwrap().push(Recorded {
                    method,
                    path,
                    query,
                    headers,
                    form: parse_pairs(&body),
                    body,
                });
                (status, [(header::CONTENT_TYPE, "application/json")], response_body)
            }
        });
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

fn parse_pairs(s: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(s.as_bytes())
        .into_owned()
        .collect()
}
