//! Component scan.
//!
//! The registration-table analog of a classpath scan: applications register
//! every component they ship, and the scan selects those whose module path
//! lies under the configured dotted root. The result is sorted by
//! (module path, type name) so discovery order is stable across runs.

use crate::error::StartupError;
use crate::logger;
use crate::registry::ComponentDef;

/// Ordered registration table of all known components
#[derive(Default)]
pub struct ComponentSet {
    defs: Vec<ComponentDef>,
}

impl ComponentSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { defs: Vec::new() }
    }

    pub fn register(&mut self, def: ComponentDef) {
        self.defs.push(def);
    }

    pub fn defs(&self) -> &[ComponentDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Select the components under `package` (dotted module root, `::` also
/// accepted). Fails with `ScanRootNotFound` when nothing is registered
/// there, rather than serving an empty application.
pub fn scan<'a>(
    set: &'a ComponentSet,
    package: &str,
) -> Result<Vec<&'a ComponentDef>, StartupError> {
    let root = package.trim().replace("::", ".");
    let prefix = format!("{root}.");

    let mut found: Vec<&ComponentDef> = set
        .defs()
        .iter()
        .filter(|def| {
            let path = def.module_path.replace("::", ".");
            path == root || path.starts_with(&prefix)
        })
        .collect();

    if found.is_empty() {
        return Err(StartupError::ScanRootNotFound { package: root });
    }

    found.sort_by_key(|def| (def.module_path, def.type_name));
    logger::log_scan_result(&root, found.len());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn service_def(module_path: &'static str, type_name: &'static str) -> ComponentDef {
        ComponentDef::service(module_path, type_name, || Arc::new(0_u32))
    }

    fn set_with(defs: Vec<ComponentDef>) -> ComponentSet {
        let mut set = ComponentSet::new();
        for def in defs {
            set.register(def);
        }
        set
    }

    #[test]
    fn scan_selects_root_and_descendants() {
        let set = set_with(vec![
            service_def("app::demo", "AlphaService"),
            service_def("app::demo::nested", "BetaService"),
            service_def("app::other", "GammaService"),
        ]);

        let found = scan(&set, "app.demo").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.module_path.starts_with("app::demo")));
    }

    #[test]
    fn scan_does_not_match_sibling_prefixes() {
        // "app.demo" must not match "app.demotion"
        let set = set_with(vec![service_def("app::demotion", "AlphaService")]);
        assert!(matches!(
            scan(&set, "app.demo"),
            Err(StartupError::ScanRootNotFound { .. })
        ));
    }

    #[test]
    fn scan_accepts_double_colon_roots() {
        let set = set_with(vec![service_def("app::demo", "AlphaService")]);
        let found = scan(&set, "app::demo").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn empty_root_fails_explicitly() {
        let set = set_with(vec![service_def("app::demo", "AlphaService")]);
        let err = scan(&set, "no.such.root").unwrap_err();
        assert!(matches!(err, StartupError::ScanRootNotFound { .. }));
    }

    #[test]
    fn scan_order_is_sorted_and_stable() {
        // Registration order is deliberately shuffled; scan sorts it.
        let set = set_with(vec![
            service_def("app::demo::z", "ZService"),
            service_def("app::demo::a", "BService"),
            service_def("app::demo::a", "AService"),
        ]);

        let found = scan(&set, "app.demo").unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.type_name).collect();
        assert_eq!(names, vec!["AService", "BService", "ZService"]);
    }
}
