//! Tracing subscriber setup for the binaries

use call_qc_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber
///
/// `RUST_LOG` wins; otherwise `level_override` or the configured level applies
/// to the workspace crates. Output goes to stderr so CLI stdout stays JSON.
pub fn init_tracing(config: &ObservabilityConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(config.log_level.as_str()).to_lowercase();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("call_qc={level},tower_http=info").into());

    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
