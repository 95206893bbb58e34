use std::path::Path;
use std::time::Duration;

use crate::coordinator::RetryPolicy;
use crate::error::ConfigError;

use super::model::Config;

/// A loaded, validated configuration plus the values derived from it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config: Config,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

/// Load the probe configuration from `path`.
///
/// Files ending in `.yml` or `.yaml` are read as YAML, anything else as
/// JSON. A timeout of zero seconds is rejected since every probe would
/// time out before it started.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?,
    };

    if config.timeout_seconds == 0 {
        return Err(ConfigError::InvalidTimeout {
            value: config.timeout_seconds,
        });
    }

    tracing::debug!(
        path = %path.display(),
        targets = config.urls.len(),
        timeout_seconds = config.timeout_seconds,
        max_retries = config.max_retries,
        "configuration loaded"
    );

    Ok(AppConfig {
        timeout: Duration::from_secs(config.timeout_seconds),
        retry: RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        ),
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create config");
        file.write_all(content.as_bytes()).expect("write config");
        (dir, path)
    }

    #[test]
    fn loads_json() {
        let (_dir, path) = write_config(
            "config.json",
            r#"{"urls": ["https://a.example"], "timeout_seconds": 2, "max_retries": 1}"#,
        );
        let app = load_config(&path).expect("valid config");
        assert_eq!(app.config.urls, vec!["https://a.example"]);
        assert_eq!(app.timeout, Duration::from_secs(2));
        assert_eq!(app.retry.max_retries, 1);
    }

    #[test]
    fn loads_yaml_by_extension() {
        let (_dir, path) = write_config(
            "probes.yaml",
            "urls:\n  - https://a.example\ntimeout_seconds: 4\n",
        );
        let app = load_config(&path).expect("valid config");
        assert_eq!(app.timeout, Duration::from_secs(4));
        assert_eq!(app.retry.max_retries, 0);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(&dir.path().join("absent.json")).expect_err("no file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("error reading config file"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let (_dir, path) = write_config("config.json", r#"{"urls": "#);
        let err = load_config(&path).expect_err("malformed");
        assert!(matches!(err, ConfigError::ParseJson { .. }));
    }

    #[test]
    fn wrong_field_type_is_a_parse_error() {
        let (_dir, path) = write_config("config.json", r#"{"urls": [], "timeout_seconds": -1}"#);
        let err = load_config(&path).expect_err("negative timeout");
        assert!(matches!(err, ConfigError::ParseJson { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let (_dir, path) = write_config("config.json", r#"{"urls": [], "timeout_seconds": 0}"#);
        let err = load_config(&path).expect_err("zero timeout");
        assert!(matches!(err, ConfigError::InvalidTimeout { value: 0 }));
    }

    #[test]
    fn empty_url_list_is_valid() {
        let (_dir, path) = write_config("config.json", r#"{"urls": [], "timeout_seconds": 1}"#);
        let app = load_config(&path).expect("valid config");
        assert!(app.config.targets().is_empty());
    }
}
