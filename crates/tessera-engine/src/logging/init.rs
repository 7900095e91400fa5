use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "tessera_engine=debug,wgpu=warn").
///
/// `wgpu_level` caps the graphics backend crates (`wgpu`, `wgpu_core`,
/// `wgpu_hal`) independently of the main filter. They are noisy at debug.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub wgpu_level: Option<log::LevelFilter>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            wgpu_level: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const WGPU_MODULES: [&str; 3] = ["wgpu", "wgpu_core", "wgpu_hal"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // Module directives must come after the global level to override it.
        if let Some(level) = config.wgpu_level {
            for module in WGPU_MODULES {
                builder.filter_module(module, level);
            }
        }

        builder.write_style(config.write_style);

        // A logger installed by someone else (tests, host app) wins.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
