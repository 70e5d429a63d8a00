//! Logger module
//!
//! Provides logging utilities for the framework including:
//! - Startup lifecycle logging (scan, bean build, route mapping)
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use chrono::Local;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_startup_begin() {
    write_info(&format!("MVC framework starts init at: {}", Local::now()));
}

pub fn log_startup_end() {
    write_info(&format!("MVC framework ends init at: {}", Local::now()));
}

pub fn log_scan_result(package: &str, count: usize) {
    write_info(&format!(
        "[Scan] Found {count} components under '{package}'"
    ));
}

pub fn log_bean_registered(name: &str, type_name: &str) {
    write_info(&format!("[Beans] Registered '{name}' ({type_name})"));
}

pub fn log_route_mapped(pattern: &str, controller: &str) {
    write_info(&format!(
        "[Routes] Mapped '{pattern}' on controller '{controller}'"
    ));
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("MVC server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Scan root: {}", config.scan.package));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_not_found(path: &str) {
    write_info(&format!("[Dispatch] No route matched '{path}'"));
}

/// Full dispatch failure detail goes here; the client only sees the status
/// line and error kind.
pub fn log_dispatch_error(path: &str, err: &impl std::fmt::Display) {
    write_error(&format!("[Dispatch] Request to '{path}' failed: {err}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
