//! Component registration, scanning, and the bean container.
//!
//! The build-time half of the framework: a registration table of component
//! definitions, a scanner that selects the ones under the configured module
//! root, and a two-phase bean container (instantiate all services, then
//! wire all controllers).

mod beans;
mod component;
mod scan;

pub use beans::{Bean, BeanRegistry, Injector};
pub use component::{
    derived_bean_name, simple_type_name, ComponentDef, ComponentKind, Constructor,
    ControllerFactory, ServiceFactory, ServiceInstance,
};
pub use scan::{scan, ComponentSet};
