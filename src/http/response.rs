//! HTTP response building module
//!
//! Plain-text response builders for the dispatcher, decoupled from the
//! routing and binding logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::logger;

/// Build a plain-text response with the given status
pub fn build_text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let fallback = body.clone();
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_u16(), &e);
            Response::new(Full::new(Bytes::from(fallback)))
        })
}

/// Build 200 OK response carrying a handler's return value
pub fn build_ok_response(body: String) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, body)
}

/// Build 400 Bad Request response
pub fn build_400_response(detail: &str) -> Response<Full<Bytes>> {
    build_text_response(
        StatusCode::BAD_REQUEST,
        format!("400 Bad Request: {detail}"),
    )
}

/// Build 404 Not Found response
pub fn build_404_response(path: &str) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, format!("404 Not Found: {path}"))
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let body = "405 Method Not Allowed";
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", "GET, POST")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(405, &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build 500 Server Error response
///
/// The body names the error kind only; diagnostic detail stays in the
/// error log.
pub fn build_500_response(kind: &str) -> Response<Full<Bytes>> {
    build_text_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("500 Server Error ({kind})"),
    )
}

fn log_build_error(status: u16, err: &impl std::fmt::Debug) {
    logger::log_error(&format!("Failed to build {status} response: {err:?}"));
}
