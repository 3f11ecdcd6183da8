//! Logging Infrastructure
//!
//! Logs go to stderr so stdout stays free for the order JSON and the status
//! line.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this workspace's
/// crates. Calling it twice is harmless.
pub fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("order_form={level},order_client={level}"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}
