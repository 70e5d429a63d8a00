//! Routing module
//!
//! Provides the URL side of the framework:
//! - Path joining and request-path normalization
//! - Regex-compiled route patterns with wildcard support
//! - The ordered, first-match-wins route table

mod pattern;
mod route;

pub use pattern::{join_paths, normalize_request_path, RoutePattern};
pub use route::{
    Controller, HandlerFn, HandlerResult, ParamBinding, ParamSpec, RouteDef, RouteEntry,
    RouteTable, ScalarKind,
};
