//! Demo service bean.

use chrono::Local;

use crate::logger;

/// A trivial service the demo controller depends on
pub struct DemoService;

impl DemoService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Record that a greeting was requested.
    pub fn record_greeting(&self, name: &str) {
        logger::log_info(&format!(
            "[DemoService] greeted '{name}' at: {}",
            Local::now()
        ));
    }

    #[must_use]
    pub const fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }
}

impl Default for DemoService {
    fn default() -> Self {
        Self::new()
    }
}
