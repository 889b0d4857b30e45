mod discovery;
mod errors;
mod logging;
mod root;
mod server;

pub use discovery::DiscoveryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::{ServerConfig, DEFAULT_MDNS_PORT, DEFAULT_MULTICAST_GROUP};
