//! Component descriptors.
//!
//! A `ComponentDef` is the registration-table entry for one controller or
//! service: where it lives in the module tree, what it is called, and how
//! to construct it. Applications collect these in a [`super::ComponentSet`]
//! and the scanner selects the ones under the configured module root.

use std::any::Any;
use std::sync::Arc;

use crate::error::StartupError;
use crate::registry::Injector;
use crate::routing::Controller;

/// A service bean as stored in the registry: type-erased, shared, immutable.
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// Builds a service. Services take no dependencies.
pub type ServiceFactory = fn() -> ServiceInstance;

/// Builds a controller against the already-instantiated service beans.
pub type ControllerFactory =
    fn(&Injector<'_>) -> Result<Arc<dyn Controller>, StartupError>;

/// What kind of bean a component produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Controller,
    Service,
}

#[derive(Debug)]
pub enum Constructor {
    Service(ServiceFactory),
    Controller(ControllerFactory),
}

/// Registration-table entry for one component
#[derive(Debug)]
pub struct ComponentDef {
    /// Module path captured at the registration site via `module_path!()`.
    pub module_path: &'static str,
    /// Simple type name, e.g. `"DemoService"`.
    pub type_name: &'static str,
    /// Explicit bean name; derived from `type_name` when absent.
    pub bean_name: Option<&'static str>,
    pub constructor: Constructor,
}

impl ComponentDef {
    pub const fn service(
        module_path: &'static str,
        type_name: &'static str,
        factory: ServiceFactory,
    ) -> Self {
        Self {
            module_path,
            type_name,
            bean_name: None,
            constructor: Constructor::Service(factory),
        }
    }

    pub const fn controller(
        module_path: &'static str,
        type_name: &'static str,
        factory: ControllerFactory,
    ) -> Self {
        Self {
            module_path,
            type_name,
            bean_name: None,
            constructor: Constructor::Controller(factory),
        }
    }

    /// Give the bean an explicit name instead of the derived one.
    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.bean_name = Some(name);
        self
    }

    pub const fn kind(&self) -> ComponentKind {
        match self.constructor {
            Constructor::Service(_) => ComponentKind::Service,
            Constructor::Controller(_) => ComponentKind::Controller,
        }
    }

    /// The name this component registers under: the explicit name if given,
    /// otherwise the simple type name with its first letter lowered.
    pub fn resolved_name(&self) -> String {
        self.bean_name
            .map_or_else(|| derived_bean_name(self.type_name), ToString::to_string)
    }
}

/// Derive a bean name from a simple type name: `DemoService` becomes
/// `demoService`. Names that do not start with an ASCII uppercase letter
/// are kept as-is.
pub fn derived_bean_name(simple_name: &str) -> String {
    let mut chars = simple_name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            format!("{}{}", first.to_ascii_lowercase(), chars.as_str())
        }
        _ => simple_name.to_string(),
    }
}

/// Simple (unqualified) name of a Rust type.
pub fn simple_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
