//! Demo application: one controller, one service.
//!
//! The component registrations below are what an application hands to
//! [`crate::AppContext::build`]; the configured scan root decides whether
//! they are picked up.

mod controller;
mod service;

pub use controller::DemoController;
pub use service::DemoService;

use std::sync::Arc;

use crate::registry::{ComponentDef, ComponentSet};
use crate::routing::Controller;

/// Component registrations for the demo application.
#[must_use]
pub fn components() -> ComponentSet {
    let mut set = ComponentSet::new();

    set.register(ComponentDef::service(
        module_path!(),
        "DemoService",
        || Arc::new(DemoService::new()),
    ));

    set.register(ComponentDef::controller(
        module_path!(),
        "DemoController",
        |injector| {
            let service = injector.service::<DemoService>(None)?;
            let instance: Arc<dyn Controller> = Arc::new(DemoController::new(service));
            Ok(instance)
        },
    ));

    set
}
