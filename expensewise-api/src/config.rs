use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub storage: Option<StorageConfig>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    pub database_path: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub ttl_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_hours: 24 }
    }
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[storage]
# database_path = "/var/lib/expensewise/expensewise.db"
# upload_dir = "/var/lib/expensewise/uploads"

[session]
ttl_hours = 24
"#;

impl ApiConfig {
    /// Load from `path`, or from the per-user config file, writing a default
    /// one on first run.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        let hours = self.session.clone().unwrap_or_default().ttl_hours.max(1);
        chrono::Duration::hours(hours)
    }

    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        match self.storage.as_ref().and_then(|s| s.database_path.clone()) {
            Some(path) => Ok(path),
            None => Ok(data_dir()?.join("expensewise.db")),
        }
    }

    pub fn upload_dir(&self) -> anyhow::Result<PathBuf> {
        match self.storage.as_ref().and_then(|s| s.upload_dir.clone()) {
            Some(path) => Ok(path),
            None => Ok(data_dir()?.join("uploads")),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("expensewise").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

/// Platform data directory, e.g. `~/.local/share/expensewise` on Linux
fn data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(data_dir.join("expensewise"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_and_reads_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let (config, loaded_from) = ApiConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded_from, path);
        assert!(path.exists());
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
        assert_eq!(
            config.cors.unwrap().allowed_origins,
            vec!["http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn test_storage_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            "[storage]\ndatabase_path = \"/tmp/ew.db\"\nupload_dir = \"/tmp/ew-uploads\"\n\n[session]\nttl_hours = 2\n",
        )
        .unwrap();

        let (config, _) = ApiConfig::load(Some(&path)).unwrap();

        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/ew.db"));
        assert_eq!(config.upload_dir().unwrap(), PathBuf::from("/tmp/ew-uploads"));
        assert_eq!(config.session_ttl(), chrono::Duration::hours(2));
        assert_eq!(config.server().host, "127.0.0.1");
    }
}
