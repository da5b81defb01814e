//! The single proxied route.

use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::http::Method;
use actix_web::{get, web, HttpResponse};

use crate::error::ProxyError;
use crate::upstream::{relay, upstream_url, ChartUpstream};

/// Shared, read-only state for every request.
pub struct ProxyState {
    upstream: Arc<dyn ChartUpstream>,
    upstream_base: String,
}

impl ProxyState {
    pub fn new(upstream: Arc<dyn ChartUpstream>, upstream_base: &str) -> Self {
        Self {
            upstream,
            upstream_base: upstream_base.to_string(),
        }
    }
}

/// Raw query pairs. Decoding into pairs cannot fail, so any query string
/// reaches the upstream.
pub type ChartQuery = Vec<(String, String)>;

/// All values given for `key`, comma-joined; empty when absent.
pub fn query_value(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(stock_chart).service(
        web::resource("/api/stock/{symbol}").route(web::method(Method::OPTIONS).to(preflight)),
    );
}

/// CORS preflight. Allow-Origin and Allow-Methods come from the default headers.
async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header(("Access-Control-Allow-Headers", "*"))
        .finish()
}

/// Forward one chart request upstream and relay the answer.
#[get("/api/stock/{symbol}")]
pub async fn stock_chart(
    path: web::Path<String>,
    query: web::Query<ChartQuery>,
    state: web::Data<ProxyState>,
) -> Result<HttpResponse, ProxyError> {
    let symbol = path.into_inner();
    let url = upstream_url(
        &state.upstream_base,
        &symbol,
        &query_value(&query, "range"),
        &query_value(&query, "interval"),
    );
    log::debug!("[{symbol}] forwarding to {url}");

    let body = state
        .upstream
        .fetch_chart(&url)
        .await
        .and_then(relay)
        .map_err(|e| {
            log::warn!("[{symbol}] upstream request failed: {e}");
            e
        })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
