//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honours `RUST_LOG`; falls back to `info` when it is unset.
pub fn init() {
    init_with_default("info");
}

/// Initialize the logging system with an explicit default filter
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one");
    }
}
