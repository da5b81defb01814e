//! Proxy failures and their 500 envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The outbound call itself failed (DNS, connect, TLS, body read).
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with an error status and no chart envelope.
    #[error("Request failed with status code {0}")]
    UpstreamStatus(u16),

    #[error("upstream returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("server I/O error: {0}")]
    Bind(#[source] std::io::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport(err.to_string())
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(json!({ "error": self.to_string() }))
    }
}
