pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "pt_trackers=info,ptt_core=info,ptt_storage_json=info";

/// Installs the global subscriber. Logs go to stderr so shell output stays
/// clean. An invalid directive falls back to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
