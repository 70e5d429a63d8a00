//! Demo controller bean.
//!
//! Exercises every binding the dispatcher supports: string and integer
//! query parameters, the request and response carriers, a wildcard
//! pattern, and a deliberately failing handler.

use std::sync::Arc;

use crate::dispatch::Invocation;
use crate::error::DispatchError;
use crate::routing::{Controller, RouteDef};

use super::DemoService;

pub struct DemoController {
    service: Arc<DemoService>,
}

impl DemoController {
    #[must_use]
    pub const fn new(service: Arc<DemoService>) -> Self {
        Self { service }
    }
}

impl Controller for DemoController {
    fn base_path(&self) -> &str {
        "/demo"
    }

    fn routes(&self) -> Vec<RouteDef> {
        let greeter = Arc::clone(&self.service);
        let adder = Arc::clone(&self.service);

        vec![
            // Empty fragment: the route is the base path itself.
            RouteDef::new("", |_cx: &mut Invocation| {
                Ok(Some("demo index".to_string()))
            }),
            // Mirrors the classic (request, response, name) handler shape;
            // the scalar argument sits at index 2.
            RouteDef::new("/hello", move |cx: &mut Invocation| {
                let name = cx.str_arg(2)?.to_string();
                greeter.record_greeting(&name);
                Ok(Some(format!("Hello ,{name}")))
            })
            .request()
            .response()
            .query_str("name"),
            RouteDef::new("/add", move |cx: &mut Invocation| {
                let a = cx.int_arg(0)?;
                let b = cx.int_arg(1)?;
                Ok(Some(adder.add(a, b).to_string()))
            })
            .query_int("a")
            .query_int("b"),
            // Wildcard segment: matches any subpath under /demo/files/.
            RouteDef::new("/files/.*", |cx: &mut Invocation| {
                Ok(Some(format!("serving {}", cx.request().path)))
            })
            .request(),
            // Writes through the sink and returns nothing.
            RouteDef::new("/raw", |cx: &mut Invocation| {
                cx.response().write("raw body from the sink");
                Ok(None)
            })
            .response(),
            // Always fails; used to demonstrate per-request failure isolation.
            RouteDef::new("/boom", |_cx: &mut Invocation| {
                Err(DispatchError::Handler(
                    "demo handler failure".to_string(),
                ))
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_routes_in_stable_order() {
        let controller = DemoController::new(Arc::new(DemoService::new()));
        let routes = controller.routes();

        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["", "/hello", "/add", "/files/.*", "/raw", "/boom"]
        );
    }

    #[test]
    fn hello_route_declares_three_parameters() {
        let controller = DemoController::new(Arc::new(DemoService::new()));
        let routes = controller.routes();
        let hello = routes.iter().find(|r| r.path == "/hello").unwrap();
        assert_eq!(hello.params.len(), 3);
    }
}
