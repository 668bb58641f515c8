//! Logging utilities and structured logging support
//!
//! Library code only uses the `log` facade. Binaries pick the backend by
//! calling one of the initializers below once at startup.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    // A second initialization is harmless; keep the first logger.
    let _ = env_logger::try_init();
}

/// Initialize logging with a default level, still overridable through `RUST_LOG`
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_initialization_is_harmless() {
        init_with_level(log::LevelFilter::Trace);
        init();
        init_with_level(log::LevelFilter::Off);
        info!("logger initialized");
    }
}
