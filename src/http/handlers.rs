//! Request handlers: resolver outcomes to HTTP responses.
//!
//! Bodies are plain text. Errors use the two-line `Error\n<reason>\n` form.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::canonical::UrlCanonicalizer;
use crate::intel::NetworkIntelResolver;
use crate::journey::{JourneyError, JourneyOutcome, TrainJourneyResolver};
use crate::observability::metrics;
use crate::oui::types::with_multicast;
use crate::oui::{MacLookupError, MacVendorResolver};
use crate::search::{render_index, IndexEntry, SearchProvider};

pub const NOT_AN_IP: &str = "Invalid input (not an IP address)";
pub const NO_JOURNEY: &str = "No matching train journey found";
pub const JOURNEY_FAILED: &str = "Could not look up train journey";

fn text(status: StatusCode, body: String) -> Response {
    (status, body).into_response()
}

fn error(status: StatusCode, reason: impl std::fmt::Display) -> Response {
    text(status, format!("Error\n{reason}\n"))
}

fn finish(route: &'static str, start: Instant, response: Response) -> Response {
    metrics::record_request(route, response.status().as_u16(), start);
    response
}

/// Path with the request query string re-attached.
fn with_query(path: String, raw_query: Option<String>) -> String {
    match raw_query {
        Some(qs) if !qs.is_empty() => format!("{path}?{qs}"),
        _ => path,
    }
}

pub async fn index(State(entries): State<Arc<[IndexEntry]>>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let page = render_index(&format!("http://{host}"), &entries);

    let response = (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        page,
    )
        .into_response();
    finish("index", start, response)
}

pub async fn search(
    State(provider): State<Arc<SearchProvider>>,
    Path(query): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let start = Instant::now();
    let target = provider.target(&query, raw_query.as_deref());
    tracing::debug!(provider = %provider.name, target = %target, "Search redirect");
    finish("search", start, Redirect::to(&target).into_response())
}

pub async fn mac_vendor(State(resolver): State<MacVendorResolver>, Path(query): Path<String>) -> Response {
    let start = Instant::now();

    let response = match resolver.resolve(&query).await {
        Ok(info) => text(StatusCode::OK, format!("{}\n{}\n", info.oui, info.describe())),
        Err(err @ MacLookupError::InvalidInput) => error(StatusCode::BAD_REQUEST, err),
        Err(MacLookupError::NotFound { oui, multicast }) => text(
            StatusCode::NOT_FOUND,
            format!("{oui}\n{}\n", with_multicast("No organisation found", multicast)),
        ),
        Err(err @ (MacLookupError::ResourceMissing(_) | MacLookupError::FormatError { .. })) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
    };
    finish("mac_vendor", start, response)
}

pub async fn canonical_url(
    State(canonicalizer): State<UrlCanonicalizer>,
    Path(url): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let start = Instant::now();
    let response = match canonicalizer.canonicalize(&with_query(url, raw_query)).into_resolved() {
        Ok(resolved) => text(StatusCode::OK, format!("{resolved}\n")),
        Err(err) => error(StatusCode::BAD_REQUEST, err),
    };
    finish("canonical_url", start, response)
}

pub async fn canonical_url_go(
    State(canonicalizer): State<UrlCanonicalizer>,
    Path(url): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let start = Instant::now();
    let response = match canonicalizer.canonicalize(&with_query(url, raw_query)).into_resolved() {
        Ok(resolved) => Redirect::to(&resolved).into_response(),
        Err(err) => error(StatusCode::BAD_REQUEST, err),
    };
    finish("canonical_url_go", start, response)
}

pub async fn network_intel(
    State(resolver): State<NetworkIntelResolver>,
    Path(address): Path<String>,
) -> Response {
    let start = Instant::now();
    let response = match address.parse::<IpAddr>() {
        Ok(addr) => text(StatusCode::OK, resolver.resolve(addr).await.to_string()),
        Err(_) => error(StatusCode::BAD_REQUEST, NOT_AN_IP),
    };
    finish("network_intel", start, response)
}

/// Parameters of the three `/train` routes.
#[derive(Debug, Deserialize)]
pub struct TrainParams {
    number: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

pub async fn train_journey(
    State(resolver): State<TrainJourneyResolver>,
    Path(params): Path<TrainParams>,
) -> Response {
    let start = Instant::now();
    let outcome = resolver
        .resolve(&params.number, params.date.as_deref(), params.country.as_deref())
        .await;

    let response = match outcome {
        Ok(JourneyOutcome::NoMatch) => text(StatusCode::OK, format!("{NO_JOURNEY}\n")),
        Ok(JourneyOutcome::Single(link)) => Redirect::to(&link).into_response(),
        Ok(JourneyOutcome::Choices(choices)) => {
            let body: String = choices
                .iter()
                .map(|choice| format!("* [{}]({})\n", choice.label, choice.link))
                .collect();
            text(StatusCode::OK, body)
        }
        Err(err) if err.is_input_error() => error(StatusCode::BAD_REQUEST, input_reason(&err)),
        Err(err) => {
            tracing::error!(
                number = %params.number,
                date = ?params.date,
                country = ?params.country,
                error = %err,
                "Train journey lookup failed"
            );
            error(StatusCode::INTERNAL_SERVER_ERROR, JOURNEY_FAILED)
        }
    };
    finish("train_journey", start, response)
}

fn input_reason(err: &JourneyError) -> &'static str {
    match err {
        JourneyError::InvalidNumber(_) => "Invalid input (not a journey number)",
        JourneyError::InvalidDate(_) => "Invalid input (date must be YYYY-MM-DD)",
        JourneyError::UnknownCountry(_) => "Invalid input (unknown country code)",
        _ => JOURNEY_FAILED,
    }
}
