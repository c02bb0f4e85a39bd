mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./fittrack.toml", "~/.config/fittrack/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    let raw = config.database.path.to_string_lossy().into_owned();
    config.database.path = PathBuf::from(shellexpand::tilde(&raw).into_owned());
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.database.path.as_os_str().is_empty() {
        anyhow::bail!("Database path cannot be empty");
    }

    if config.database.pool_size == 0 {
        anyhow::bail!("Database pool size cannot be 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.path, Path::new("fittrack.db"));
        assert_eq!(config.database.pool_size, 4);
    }

    #[test]
    fn test_load_config() {
        let file = write_config(
            r#"
[database]
path = "/tmp/gym.db"
pool_size = 2
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.database.path, Path::new("/tmp/gym.db"));
        assert_eq!(config.database.pool_size, 2);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_tilde_is_expanded() {
        let file = write_config("[database]\npath = \"~/fittrack.db\"\n");
        let config = load_config(file.path()).unwrap();
        assert!(!config.database.path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let file = write_config("[database]\npool_size = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("pool size"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let file = write_config("[database]\npath = \"\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_malformed_config() {
        let file = write_config("[database\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_custom_path() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/fittrack.toml")));
        assert!(result.is_err());
    }
}
