use serde::Deserialize;
use std::path::Path;

use crate::domain::UploadPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "domain_registry".to_string(),
            collection: "domains".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: String,
    pub max_body_bytes: usize,
    #[serde(flatten)]
    pub policy: UploadPolicy,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_body_bytes: 25 * 1024 * 1024,
            policy: UploadPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads `$CONFIG_PATH` (or `config.yaml` when present), then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;

        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "SERVER_PORT",
                value: port,
            })?;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = lookup("MONGODB_DATABASE") {
            self.database.name = name;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.uploads.dir = dir;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "LOG_FORMAT",
                        value: format,
                    })
                }
            };
        }
        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.collection, "domains");
        assert_eq!(config.uploads.dir, "uploads");
        assert_eq!(config.uploads.policy, UploadPolicy::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "server:\n  port: 9000\nuploads:\n  dir: /srv/uploads\n  image_extensions: [png]\nlogging:\n  format: json\n",
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.uploads.dir, "/srv/uploads");
        assert_eq!(config.uploads.policy.image_extensions, vec!["png"]);
        assert_eq!(config.uploads.policy.mapper_extensions, vec!["xlsx", "xls"]);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SERVER_PORT", "3000"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("UPLOAD_DIR", "files"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.uri, "mongodb://db:27017");
        assert_eq!(config.uploads.dir, "files");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|key| (key == "SERVER_PORT").then(|| "http".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { key: "SERVER_PORT", .. }));
    }
}
