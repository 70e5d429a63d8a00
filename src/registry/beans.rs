//! Bean container and injector.
//!
//! The container is built in two phases so construction order between
//! beans never matters: every service is instantiated first, then every
//! controller is constructed with an [`Injector`] over the finished
//! service map. After `build` returns, the registry is never mutated.

use std::any::Any;
use std::sync::Arc;

use crate::error::StartupError;
use crate::logger;
use crate::registry::component::{
    derived_bean_name, simple_type_name, ComponentDef, Constructor, ServiceInstance,
};
use crate::routing::Controller;

/// A named bean held by the registry
pub enum Bean {
    Controller(Arc<dyn Controller>),
    Service(ServiceInstance),
}

/// Name-to-instance bean registry, ordered by insertion
///
/// Lookup is a linear scan; the container holds a handful of beans and is
/// built exactly once at startup.
#[derive(Default)]
pub struct BeanRegistry {
    entries: Vec<(String, Bean)>,
}

impl std::fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanRegistry")
            .field(
                "beans",
                &self.entries.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl BeanRegistry {
    /// Build the registry from scanned component definitions.
    ///
    /// Phase one instantiates services, phase two wires controllers.
    /// Duplicate bean names abort startup.
    pub fn build(defs: &[&ComponentDef]) -> Result<Self, StartupError> {
        let mut registry = Self {
            entries: Vec::new(),
        };

        // Phase one: services
        for def in defs {
            if let Constructor::Service(factory) = &def.constructor {
                let name = def.resolved_name();
                registry.insert(name.clone(), Bean::Service(factory()))?;
                logger::log_bean_registered(&name, def.type_name);
            }
        }

        // Phase two: controllers, wired against the complete service map
        for def in defs {
            if let Constructor::Controller(factory) = &def.constructor {
                let instance = factory(&Injector {
                    registry: &registry,
                })?;
                let name = def.resolved_name();
                registry.insert(name.clone(), Bean::Controller(instance))?;
                logger::log_bean_registered(&name, def.type_name);
            }
        }

        Ok(registry)
    }

    fn insert(&mut self, name: String, bean: Bean) -> Result<(), StartupError> {
        if self.get(&name).is_some() {
            return Err(StartupError::DuplicateBean { name });
        }
        self.entries.push((name, bean));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Bean> {
        self.entries
            .iter()
            .find(|(bean_name, _)| bean_name == name)
            .map(|(_, bean)| bean)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Controllers in registration order (scan order).
    pub fn controllers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Controller>)> {
        self.entries.iter().filter_map(|(name, bean)| match bean {
            Bean::Controller(controller) => Some((name.as_str(), controller)),
            Bean::Service(_) => None,
        })
    }
}

/// Read-only view over the service beans, handed to controller factories
/// during phase two.
pub struct Injector<'a> {
    pub(super) registry: &'a BeanRegistry,
}

impl Injector<'_> {
    /// Resolve a service bean by explicit name, or by the name derived from
    /// `T`'s simple type name when `name` is `None`.
    pub fn service<T: Any + Send + Sync>(
        &self,
        name: Option<&str>,
    ) -> Result<Arc<T>, StartupError> {
        let bean_name = name.map_or_else(
            || derived_bean_name(simple_type_name::<T>()),
            ToString::to_string,
        );

        match self.registry.get(&bean_name) {
            None => Err(StartupError::NoSuchBean { name: bean_name }),
            Some(Bean::Service(instance)) => Arc::clone(instance)
                .downcast::<T>()
                .map_err(|_| StartupError::BeanTypeMismatch {
                    name: bean_name,
                    expected: std::any::type_name::<T>(),
                }),
            // Controllers are not injectable into anything.
            Some(Bean::Controller(_)) => Err(StartupError::BeanTypeMismatch {
                name: bean_name,
                expected: std::any::type_name::<T>(),
            }),
        }
    }
}
