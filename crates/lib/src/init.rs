//! Initialize the configuration directory: create ~/.hookrelay and a default config file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Create the config directory and default config file if they do not exist.
/// - Writes `config.json` with `{}` if missing (every section then takes its defaults).
/// - An existing config file is left untouched.
/// Returns the config directory.
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if !config_path.exists() {
        let default_config = b"{}";
        std::fs::write(config_path, default_config)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    } else {
        log::debug!("config already exists at {}, skipping", config_path.display());
    }

    Ok(config_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("hookrelay-init-{}", uuid::Uuid::new_v4()))
            .join("config.json")
    }

    #[test]
    fn writes_loadable_default_config() {
        let path = temp_path();
        let dir = init_config_dir(&path).unwrap();
        assert_eq!(Some(dir.as_path()), path.parent());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        let (config, _) = load_config(Some(path)).unwrap();
        assert_eq!(config.gateway.port, 15152);
        assert_eq!(config.relay.url_env, "SLACK_URL");
    }

    #[test]
    fn existing_config_is_not_overwritten() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"gateway":{"port":9999}}"#).unwrap();
        init_config_dir(&path).unwrap();
        let (config, _) = load_config(Some(path)).unwrap();
        assert_eq!(config.gateway.port, 9999);
    }
}
