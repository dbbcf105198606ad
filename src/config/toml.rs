//! TOML configuration file parsing

use super::FileConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a TOML configuration from a string
pub fn parse_toml_string(contents: &str) -> Result<FileConfig> {
    let config: FileConfig =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::LibVer;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_config() {
        let config = parse_toml_string(
            r#"
            destination = "/data/endfb-viii.1-hdf5"
            temperatures = [293.6, 600.0]
            libver = "latest"
            tool = "/opt/ndtool"
            threads = 8
            cleanup = true
            "#,
        )
        .unwrap();

        assert_eq!(config.destination, Some(PathBuf::from("/data/endfb-viii.1-hdf5")));
        assert_eq!(config.temperatures, Some(vec![293.6, 600.0]));
        assert_eq!(config.libver, Some(LibVer::Latest));
        assert_eq!(config.threads, Some(8));
        assert_eq!(config.cleanup, Some(true));
    }

    #[test]
    fn test_empty_config() {
        let config = parse_toml_string("").unwrap();
        assert!(config.destination.is_none());
        assert!(config.temperatures.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(parse_toml_string("unknown_key = 1").is_err());
    }
}
