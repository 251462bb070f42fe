pub mod config;
pub mod file_store;
pub mod record_store;

pub use config::{AppConfig, ConfigError, LogFormat};
pub use file_store::LocalFileStore;
pub use record_store::{InMemoryDomainStore, MongoDomainStore};
