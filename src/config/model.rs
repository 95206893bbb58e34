use serde::Deserialize;

use crate::coordinator::Target;

/// The probe configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// URLs to probe, in display order. Duplicates are probed separately.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Per-attempt timeout, in seconds. Must be at least 1.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra attempts for a probe that timed out or hit a network error.
    #[serde(default)]
    pub max_retries: u32,

    /// Pause before each retry, in milliseconds.
    #[serde(default)]
    pub retry_delay_ms: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn targets(&self) -> Vec<Target> {
        self.urls
            .iter()
            .enumerate()
            .map(|(index, url)| Target::new(index, url.clone()))
            .collect()
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str("{}").expect("Invalid JSON");
        assert!(config.urls.is_empty());
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_delay_ms, 0);
    }

    #[test]
    fn test_json_deserialization() {
        let json = r#"{
            "urls": ["https://www.google.com", "https://www.github.com"],
            "timeout_seconds": 5,
            "max_retries": 2
        }"#;

        let config: Config = serde_json::from_str(json).expect("Invalid JSON");
        assert_eq!(
            config.urls,
            vec!["https://www.google.com", "https://www.github.com"]
        );
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_yaml_deserialization() {
        let yaml = r#"
            urls:
                - https://www.example.com
                - https://www.example.com
            timeout_seconds: 3
            retry_delay_ms: 250
        "#;

        let config: Config = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(config.urls.len(), 2);
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.retry_delay_ms, 250);
    }

    #[test]
    fn test_duplicate_urls_are_separate_targets() {
        let config = Config {
            urls: vec!["https://a.example".into(), "https://a.example".into()],
            timeout_seconds: 1,
            max_retries: 0,
            retry_delay_ms: 0,
        };
        let targets = config.targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].index, 0);
        assert_eq!(targets[1].index, 1);
        assert_eq!(targets[0].url, targets[1].url);
    }
}
