//! Request dispatch module
//!
//! Entry point for HTTP request processing. Each request runs the same
//! pipeline: normalize the path, find the first matching route, bind the
//! declared arguments, invoke the handler, and write the result. A failed
//! request never takes the server down.

mod bind;

pub use bind::{bind_args, parse_query, BoundArg, Invocation, RequestInfo, ResponseSink};

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response, Uri};

use crate::context::AppContext;
use crate::http;
use crate::logger;
use crate::routing::normalize_request_path;

/// Hyper-facing entry point: dispatch plus access logging.
pub async fn handle_request(
    req: Request<Incoming>,
    peer: SocketAddr,
    context: Arc<AppContext>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = dispatch(&method, &uri, &context);

    if context.config.logging.access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &context.config.logging.access_log_format);
    }

    Ok(response)
}

/// The dispatch pipeline: match, bind, invoke, respond.
///
/// GET and POST are treated identically; every other method is rejected
/// before matching.
pub fn dispatch(method: &Method, uri: &Uri, context: &AppContext) -> Response<Full<Bytes>> {
    if *method != Method::GET && *method != Method::POST {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response();
    }

    // Matching
    let path = normalize_request_path(
        uri.path(),
        context.config.server.context_path.as_deref(),
    );
    let Some(route) = context.routes.find(&path) else {
        logger::log_not_found(&path);
        return http::build_404_response(&path);
    };

    // Binding
    let request = RequestInfo {
        method: method.clone(),
        path: path.clone(),
        query: parse_query(uri),
    };
    let args = match bind_args(route.params(), &request) {
        Ok(args) => args,
        Err(err) => {
            logger::log_dispatch_error(&path, &err);
            return error_response(&err);
        }
    };

    // Invoking
    let mut sink = ResponseSink::new();
    let mut invocation = Invocation::new(&request, &mut sink, &args);
    match route.invoke(&mut invocation) {
        // Responding: a returned value becomes the body.
        Ok(Some(value)) => http::build_ok_response(format!("Server Response:{value}")),
        // The handler authored the response through the sink (an untouched
        // sink yields an empty 200).
        Ok(None) => sink.into_response(),
        Err(err) => {
            logger::log_dispatch_error(&path, &err);
            error_response(&err)
        }
    }
}

fn error_response(err: &crate::error::DispatchError) -> Response<Full<Bytes>> {
    if err.status() == 400 {
        http::build_400_response(&err.to_string())
    } else {
        http::build_500_response("handler error")
    }
}
