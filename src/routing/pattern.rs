//! Path normalization and route patterns.
//!
//! Route paths are built by literal concatenation of the controller base
//! path and the route fragment, with repeated slashes collapsed. The
//! normalized path is then compiled as an anchored regular expression, so
//! routes may carry wildcard segments (`/files/.*`).

use regex::Regex;

use crate::error::StartupError;

/// Collapse runs of `/` into a single one
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                out.push(ch);
            }
            prev_slash = true;
        } else {
            out.push(ch);
            prev_slash = false;
        }
    }
    out
}

/// Join a controller base path and a route fragment.
///
/// Literal concatenation, then slash collapsing; the result always starts
/// with `/`. `join_paths("/demo/", "/hello")` is `/demo/hello`.
pub fn join_paths(base: &str, fragment: &str) -> String {
    let mut joined = collapse_slashes(&format!("{base}{fragment}"));
    if !joined.starts_with('/') {
        joined.insert(0, '/');
    }
    joined
}

/// Normalize an incoming request path: strip the configured context-path
/// prefix, collapse repeated slashes, keep a leading `/`.
pub fn normalize_request_path(raw: &str, context_path: Option<&str>) -> String {
    let stripped = match context_path {
        Some(prefix) if !prefix.is_empty() => raw.strip_prefix(prefix).unwrap_or(raw),
        _ => raw,
    };
    let mut path = collapse_slashes(stripped);
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    path
}

/// A compiled route pattern: the normalized path interpreted as a regular
/// expression that must match the whole request path.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    path: String,
    regex: Regex,
}

impl RoutePattern {
    pub fn compile(path: &str) -> Result<Self, StartupError> {
        let regex = Regex::new(&format!("^(?:{path})$")).map_err(|e| {
            StartupError::InvalidRoutePattern {
                pattern: path.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            path: path.to_string(),
            regex,
        })
    }

    /// Full-path match
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}
