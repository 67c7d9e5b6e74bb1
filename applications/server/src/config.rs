/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_queue")]
    pub queue: QueueSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

/// Like-count cache settings
///
/// Without `entry_ttl_secs` entries live until invalidated or evicted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    #[serde(default)]
    pub entry_ttl_secs: Option<u64>,
}

impl CacheSettings {
    pub fn entry_ttl(&self) -> Option<Duration> {
        self.entry_ttl_secs.map(Duration::from_secs)
    }
}

/// Export queue settings
///
/// `capacity` bounds each topic; publishing onto a full topic drops the
/// oldest message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueSettings {
    #[serde(default = "default_export_topic")]
    pub export_topic: String,

    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` lookup. Environment
    /// variables use the `TUNESHELF_` prefix and `__` between section and
    /// key, e.g. `TUNESHELF_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path.to_path_buf()));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNESHELF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set TUNESHELF_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.cache.capacity == 0 {
            return Err(ServerError::Config(
                "cache.capacity must be greater than zero".to_string(),
            ));
        }

        if self.queue.capacity == 0 {
            return Err(ServerError::Config(
                "queue.capacity must be greater than zero".to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(ServerError::Config(
                "storage.max_connections must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/tuneshelf.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    1
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        capacity: default_cache_capacity(),
        entry_ttl_secs: None,
    }
}

fn default_cache_capacity() -> usize {
    10_000
}

fn default_queue() -> QueueSettings {
    QueueSettings {
        export_topic: default_export_topic(),
        capacity: default_queue_capacity(),
    }
}

fn default_export_topic() -> String {
    "export:playlists".to_string()
}

fn default_queue_capacity() -> usize {
    1_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cache: default_cache(),
            queue: default_queue(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.cache.capacity, 10_000);
        assert_eq!(config.cache.entry_ttl(), None);
        assert_eq!(config.queue.export_topic, "export:playlists");
        assert_eq!(config.queue.capacity, 1_000);
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());

        config.cache.capacity = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_queue_capacity() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config.queue.capacity = 0;

        match config.validate() {
            Err(ServerError::Config(msg)) => assert!(msg.contains("queue.capacity")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuneshelf.toml");
        std::fs::write(
            &path,
            "[auth]\njwt_secret = \"from-file\"\n\n[cache]\ncapacity = 42\nentry_ttl_secs = 60\n\n[queue]\ncapacity = 8\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.cache.capacity, 42);
        assert_eq!(config.cache.entry_ttl(), Some(Duration::from_secs(60)));
        assert_eq!(config.queue.capacity, 8);
        assert_eq!(config.queue.export_topic, "export:playlists");
        assert_eq!(config.server.port, 5000);
    }
}
