pub mod config;
pub mod logging;
pub mod observability;
pub mod server;

pub use config::{
    ClientConfig, ConfigStore, Configurable, DEFAULT_CONFIG_FILE, LogConfig, LogFormat, ServerConfig,
};
pub use logging::init_logging;
pub use observability::{InMemoryMetrics, MetricsSink, MetricsSnapshot};
