//! Argument binding.
//!
//! Turns a request's query string into the argument list a handler was
//! declared with. Query values are percent-decoded; string and integer
//! conversions are supported. A missing or unparsable value fails the
//! request with a client error instead of silently binding nothing.

use std::collections::HashMap;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode, Uri};
use percent_encoding::percent_decode_str;

use crate::error::DispatchError;
use crate::http;
use crate::routing::{ParamBinding, ParamSpec, ScalarKind};

/// Read-only snapshot of the request, handed to handlers that declared a
/// request parameter.
pub struct RequestInfo {
    pub method: Method,
    /// Normalized path (context prefix stripped, slashes collapsed).
    pub path: String,
    pub query: HashMap<String, String>,
}

impl RequestInfo {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Mutable response carrier for handlers that author the response
/// themselves instead of returning a value.
pub struct ResponseSink {
    status: StatusCode,
    body: Option<String>,
}

impl ResponseSink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Append text to the response body.
    pub fn write(&mut self, text: &str) {
        self.body.get_or_insert_with(String::new).push_str(text);
    }

    /// Whether the handler wrote anything through the sink.
    pub const fn is_written(&self) -> bool {
        self.body.is_some()
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        http::build_text_response(self.status, self.body.unwrap_or_default())
    }
}

impl Default for ResponseSink {
    fn default() -> Self {
        Self::new()
    }
}

/// One bound argument, in declared order. Carrier parameters are markers;
/// the handler reaches the actual carriers through [`Invocation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundArg {
    Request,
    Response,
    Str(String),
    Int(i64),
}

/// Parse the query string into single-valued pairs.
///
/// Pairs split on the first `=` only, so values may contain `=`. Both
/// halves are percent-decoded. Later duplicates of a name overwrite
/// earlier ones.
pub fn parse_query(uri: &Uri) -> HashMap<String, String> {
    uri.query()
        .map(|q| {
            q.split('&')
                .filter(|pair| !pair.is_empty())
                .filter_map(|pair| {
                    let mut parts = pair.splitn(2, '=');
                    let key = parts.next()?;
                    let value = parts.next().unwrap_or("");
                    Some((decode(key), decode(value)))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().to_string()
}

/// Bind every declared parameter against the request.
pub fn bind_args(
    params: &[ParamSpec],
    request: &RequestInfo,
) -> Result<Vec<BoundArg>, DispatchError> {
    params
        .iter()
        .map(|spec| match &spec.binding {
            ParamBinding::Request => Ok(BoundArg::Request),
            ParamBinding::Response => Ok(BoundArg::Response),
            ParamBinding::Query { name, kind } => {
                let value = request
                    .query_param(name)
                    .ok_or_else(|| DispatchError::MissingParam { name: name.clone() })?;
                match kind {
                    ScalarKind::Str => Ok(BoundArg::Str(value.to_string())),
                    ScalarKind::Int => {
                        value
                            .parse::<i64>()
                            .map(BoundArg::Int)
                            .map_err(|_| DispatchError::InvalidParam {
                                name: name.clone(),
                                value: value.to_string(),
                                expected: "integer",
                            })
                    }
                }
            }
        })
        .collect()
}

/// Everything a handler gets to see: the request snapshot, the response
/// sink, and the bound arguments in declaration order.
pub struct Invocation<'a> {
    request: &'a RequestInfo,
    response: &'a mut ResponseSink,
    args: &'a [BoundArg],
}

impl<'a> Invocation<'a> {
    pub fn new(
        request: &'a RequestInfo,
        response: &'a mut ResponseSink,
        args: &'a [BoundArg],
    ) -> Self {
        Self {
            request,
            response,
            args,
        }
    }

    pub const fn request(&self) -> &RequestInfo {
        self.request
    }

    pub fn response(&mut self) -> &mut ResponseSink {
        self.response
    }

    /// The string argument at `index` (declaration order).
    pub fn str_arg(&self, index: usize) -> Result<&str, DispatchError> {
        match self.args.get(index) {
            Some(BoundArg::Str(value)) => Ok(value),
            _ => Err(DispatchError::ArgumentKind {
                index,
                expected: "string",
            }),
        }
    }

    /// The integer argument at `index` (declaration order).
    pub fn int_arg(&self, index: usize) -> Result<i64, DispatchError> {
        match self.args.get(index) {
            Some(BoundArg::Int(value)) => Ok(*value),
            _ => Err(DispatchError::ArgumentKind {
                index,
                expected: "integer",
            }),
        }
    }
}
