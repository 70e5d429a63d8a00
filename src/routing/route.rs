//! Route definitions and the route table.
//!
//! Controllers declare their routes once; the table builder joins base
//! paths with fragments, compiles the patterns, and freezes everything
//! into an ordered list. Dispatch is a linear scan over that list and the
//! first matching pattern wins. Parameter descriptors are computed here,
//! at build time, so per-request dispatch never re-inspects metadata.

use crate::dispatch::Invocation;
use crate::error::DispatchError;
use crate::logger;
use crate::registry::BeanRegistry;
use crate::routing::pattern::{join_paths, RoutePattern};

/// What a handler returns: text to write as the response body, or `None`
/// when the handler authored the response through the sink itself.
pub type HandlerResult = Result<Option<String>, DispatchError>;

/// A route's handler function. Controllers usually build these as closures
/// capturing their injected services.
pub type HandlerFn = Box<dyn Fn(&mut Invocation<'_>) -> HandlerResult + Send + Sync>;

/// How one handler parameter is filled at dispatch time
pub enum ParamBinding {
    /// Bind the request-info snapshot.
    Request,
    /// Bind the response sink.
    Response,
    /// Bind a query parameter by name, converted to the given scalar type.
    Query { name: String, kind: ScalarKind },
}

/// The scalar conversions the binder supports. This set is closed: a
/// parameter type outside it cannot be declared at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    Int,
}

/// Ordered parameter descriptor: position plus binding
pub struct ParamSpec {
    pub index: usize,
    pub binding: ParamBinding,
}

/// One route as declared by a controller: a path fragment relative to the
/// controller's base path, the parameter list, and the handler.
pub struct RouteDef {
    pub path: String,
    pub params: Vec<ParamSpec>,
    pub handler: HandlerFn,
}

impl RouteDef {
    pub fn new<F>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Invocation<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    fn push(mut self, binding: ParamBinding) -> Self {
        let index = self.params.len();
        self.params.push(ParamSpec { index, binding });
        self
    }

    /// Declare a request-snapshot parameter.
    #[must_use]
    pub fn request(self) -> Self {
        self.push(ParamBinding::Request)
    }

    /// Declare a response-sink parameter.
    #[must_use]
    pub fn response(self) -> Self {
        self.push(ParamBinding::Response)
    }

    /// Declare a string query parameter bound by name.
    #[must_use]
    pub fn query_str(self, name: &str) -> Self {
        self.push(ParamBinding::Query {
            name: name.to_string(),
            kind: ScalarKind::Str,
        })
    }

    /// Declare an integer query parameter bound by name.
    #[must_use]
    pub fn query_int(self, name: &str) -> Self {
        self.push(ParamBinding::Query {
            name: name.to_string(),
            kind: ScalarKind::Int,
        })
    }
}

/// The contract controllers implement
pub trait Controller: Send + Sync {
    /// Class-level path fragment prepended to every route.
    fn base_path(&self) -> &str {
        "/"
    }

    /// Routes in declaration order. Called once, at startup.
    fn routes(&self) -> Vec<RouteDef>;
}

/// One frozen route-table entry
pub struct RouteEntry {
    pattern: RoutePattern,
    /// Bean name of the owning controller, for logs and diagnostics.
    controller: String,
    params: Vec<ParamSpec>,
    handler: HandlerFn,
}

impl RouteEntry {
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn invoke(&self, invocation: &mut Invocation<'_>) -> HandlerResult {
        (self.handler)(invocation)
    }
}

/// Ordered route table, built once at startup and immutable afterwards
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the table from every controller bean, in scan order.
    pub fn build(beans: &BeanRegistry) -> Result<Self, crate::error::StartupError> {
        let mut entries = Vec::new();
        for (bean_name, controller) in beans.controllers() {
            let base = controller.base_path().to_string();
            for def in controller.routes() {
                let path = join_paths(&base, &def.path);
                let pattern = RoutePattern::compile(&path)?;
                logger::log_route_mapped(pattern.as_str(), bean_name);
                entries.push(RouteEntry {
                    pattern,
                    controller: bean_name.to_string(),
                    params: def.params,
                    handler: def.handler,
                });
            }
        }
        Ok(Self { entries })
    }

    /// First matching entry wins. No ambiguity detection; order is
    /// controller scan order, then declaration order.
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.pattern.matches(path))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BeanRegistry, ComponentDef};
    use std::sync::Arc;

    struct ProbeController;

    impl Controller for ProbeController {
        fn base_path(&self) -> &str {
            "/demo"
        }

        fn routes(&self) -> Vec<RouteDef> {
            vec![
                RouteDef::new("", |_cx: &mut Invocation| Ok(Some("index".to_string()))),
                RouteDef::new("/hello", |_cx: &mut Invocation| {
                    Ok(Some("hello".to_string()))
                })
                .query_str("name"),
                RouteDef::new("/.*", |_cx: &mut Invocation| {
                    Ok(Some("catch-all".to_string()))
                }),
            ]
        }
    }

    fn probe_registry() -> BeanRegistry {
        let def = ComponentDef::controller(module_path!(), "ProbeController", |_injector| {
            let instance: Arc<dyn Controller> = Arc::new(ProbeController);
            Ok(instance)
        });
        BeanRegistry::build(&[&def]).unwrap()
    }

    #[test]
    fn base_path_with_empty_fragment_maps_the_base() {
        let table = RouteTable::build(&probe_registry()).unwrap();
        let entry = table.find("/demo").unwrap();
        assert_eq!(entry.pattern().as_str(), "/demo");
    }

    #[test]
    fn exactly_one_entry_matches_the_base_path() {
        let table = RouteTable::build(&probe_registry()).unwrap();
        let matches = table
            .entries()
            .iter()
            .filter(|e| e.pattern().as_str() == "/demo")
            .count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn first_match_wins_over_later_catch_all() {
        let table = RouteTable::build(&probe_registry()).unwrap();
        // "/demo/hello" is matched by both "/demo/hello" and "/demo/.*";
        // the earlier declaration must win.
        let entry = table.find("/demo/hello").unwrap();
        assert_eq!(entry.pattern().as_str(), "/demo/hello");

        let entry = table.find("/demo/anything-else").unwrap();
        assert_eq!(entry.pattern().as_str(), "/demo/.*");
    }

    #[test]
    fn unmatched_path_finds_nothing() {
        let table = RouteTable::build(&probe_registry()).unwrap();
        assert!(table.find("/other").is_none());
    }

    #[test]
    fn param_descriptors_are_frozen_in_declaration_order() {
        let table = RouteTable::build(&probe_registry()).unwrap();
        let entry = table.find("/demo/hello").unwrap();
        assert_eq!(entry.params().len(), 1);
        assert_eq!(entry.params()[0].index, 0);
        assert!(matches!(
            &entry.params()[0].binding,
            ParamBinding::Query { name, kind: ScalarKind::Str } if name == "name"
        ));
    }
}
