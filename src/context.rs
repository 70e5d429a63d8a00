//! Application context.
//!
//! One object owns everything the dispatcher needs: the configuration,
//! the bean registry, and the route table. It is built once at startup
//! (scan, then beans, then routes) and never mutated afterwards; the
//! server shares it behind an `Arc`.

use crate::config::Config;
use crate::error::StartupError;
use crate::registry::{scan, BeanRegistry, ComponentSet};
use crate::routing::RouteTable;

pub struct AppContext {
    pub config: Config,
    pub beans: BeanRegistry,
    pub routes: RouteTable,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("beans", &self.beans)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the frozen application context.
    ///
    /// Ordering matters: configuration is validated first, the component
    /// scan selects what to build, services are instantiated before
    /// controllers, and routes are compiled last from the finished
    /// registry. Any failure aborts startup.
    pub fn build(config: Config, components: &ComponentSet) -> Result<Self, StartupError> {
        config.validate()?;
        let defs = scan(components, &config.scan.package)?;
        let beans = BeanRegistry::build(&defs)?;
        let routes = RouteTable::build(&beans)?;
        Ok(Self {
            config,
            beans,
            routes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        LoggingConfig, PerformanceConfig, ScanConfig, ServerConfig,
    };
    use crate::demo;
    use crate::dispatch::Invocation;
    use crate::registry::ComponentDef;
    use crate::routing::{Controller, RouteDef};
    use std::sync::Arc;

    fn config_for(package: &str) -> Config {
        Config {
            scan: ScanConfig {
                package: package.to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
                context_path: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
        }
    }

    #[test]
    fn builds_registry_with_one_bean_per_component() {
        let components = demo::components();
        let context = AppContext::build(config_for("rust_mvc.demo"), &components).unwrap();

        // One controller plus one service.
        assert_eq!(context.beans.len(), 2);
        assert!(context.beans.get("demoService").is_some());
        assert!(context.beans.get("demoController").is_some());
        assert!(!context.routes.is_empty());
    }

    #[test]
    fn empty_scan_package_aborts_startup() {
        let err = AppContext::build(config_for("  "), &demo::components()).unwrap_err();
        assert!(matches!(err, StartupError::EmptyScanPackage));
    }

    #[test]
    fn unknown_scan_root_aborts_startup() {
        let err =
            AppContext::build(config_for("rust_mvc.nothing"), &demo::components()).unwrap_err();
        assert!(matches!(err, StartupError::ScanRootNotFound { .. }));
    }

    #[test]
    fn duplicate_bean_names_abort_startup() {
        struct ShadowService;

        let mut components = demo::components();
        // Same resolved name as the demo service.
        components.register(
            ComponentDef::service("rust_mvc::demo", "ShadowService", || {
                Arc::new(ShadowService)
            })
            .named("demoService"),
        );

        let err = AppContext::build(config_for("rust_mvc.demo"), &components).unwrap_err();
        assert!(matches!(err, StartupError::DuplicateBean { .. }));
    }

    #[test]
    fn invalid_route_pattern_aborts_startup() {
        struct BrokenController;

        impl Controller for BrokenController {
            fn routes(&self) -> Vec<RouteDef> {
                vec![RouteDef::new("/(oops", |_cx: &mut Invocation| Ok(None))]
            }
        }

        let mut components = ComponentSet::new();
        components.register(ComponentDef::controller(
            "rust_mvc::demo",
            "BrokenController",
            |_injector| {
                let instance: Arc<dyn Controller> = Arc::new(BrokenController);
                Ok(instance)
            },
        ));

        let err = AppContext::build(config_for("rust_mvc.demo"), &components).unwrap_err();
        assert!(matches!(err, StartupError::InvalidRoutePattern { .. }));
    }
}
