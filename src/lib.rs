//! A small MVC web framework built on Hyper.
//!
//! Applications describe their controllers and services in an explicit
//! component table. At startup the framework scans that table under a
//! configured module root, instantiates the beans, wires controllers to
//! their services by name, and compiles an ordered route table. Incoming
//! requests are matched first-pattern-wins and dispatched to handler
//! functions with typed query-parameter binding.
//!
//! The whole application state is frozen into an [`context::AppContext`]
//! before serving begins; nothing mutates it afterwards.

pub mod config;
pub mod context;
pub mod demo;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod logger;
pub mod registry;
pub mod routing;
pub mod server;

pub use context::AppContext;
pub use error::{DispatchError, StartupError};
