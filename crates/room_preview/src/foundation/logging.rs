//! Logging setup
//!
//! The crate logs through the `log` facade; binaries pick the sink.

/// Initialize the logging system
///
/// Defaults to `info` unless `RUST_LOG` says otherwise. Safe to call more
/// than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Initialize logging for tests, capturing output through the test harness
#[cfg(test)]
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
