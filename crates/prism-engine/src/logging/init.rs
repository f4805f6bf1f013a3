use std::sync::Once;

/// Filter applied when neither `LoggingConfig::env_filter` nor `RUST_LOG` is set.
///
/// wgpu's internals are chatty at `info`; keep them at `warn`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "prism_refract=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // A test harness may have installed a logger already.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized (filter: {filter})");
    });
}
