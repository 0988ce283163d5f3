use crate::config::settings::{CacheKind, LogFormat, LoggingConfig, ServiceConfig};
use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let raw = fs::read_to_string(path)?;
    let mut config: ServiceConfig = serde_yaml::from_str(&raw)?;

    // Apply defaults
    if config.settings.logging.is_none() {
        config.settings.logging = Some(LoggingConfig {
            level: "info".into(),
            format: LogFormat::Compact,
        });
    }

    // Validate
    if config.settings.server.host.trim().is_empty() || config.settings.server.port.trim().is_empty() {
        bail!("settings.server.host and settings.server.port must be set");
    }
    if config.cache.kind == CacheKind::Redis && config.cache.redis_url.is_none() {
        bail!("cache.redis_url is required when cache.kind is 'redis'");
    }
    if config.cache.ttl_seconds == 0 {
        bail!("cache.ttl_seconds must be positive");
    }

    Ok(config)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let file = write_config(
            r#"
settings:
  server: { host: "127.0.0.1", port: "8787" }
credentials:
  email: { value: "user@example.com" }
  password: { value: "hunter2" }
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.settings.logging.as_ref().unwrap().level, "info");
        assert_eq!(config.cache.kind, CacheKind::Disabled);
        assert_eq!(config.cache.ttl_seconds, 216_000);
        assert_eq!(config.upstream.timeout_ms, 5_000);
        assert!(config.upstream.url.contains("onemap.gov.sg"));
        assert!(!config.settings.metrics.is_enabled);
    }

    #[test]
    fn redis_cache_requires_url() {
        let file = write_config(
            r#"
settings:
  server: { host: "127.0.0.1", port: "8787" }
credentials:
  email: { from_env: ONEMAP_EMAIL }
  password: { from_env: ONEMAP_PASSWORD }
cache:
  kind: redis
"#,
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("redis_url"));
    }

    #[test]
    fn full_config_round_trips() {
        let file = write_config(
            r#"
settings:
  server: { host: "0.0.0.0", port: "8080" }
  logging: { level: debug, format: json }
  metrics: { path: /metrics, is_enabled: true }
upstream:
  url: http://127.0.0.1:9999/getToken
  timeout_ms: 2500
credentials:
  email: { from_env: ONEMAP_EMAIL }
  password: { from_env: ONEMAP_PASSWORD }
cache:
  kind: memory
  ttl_seconds: 600
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.settings.logging.as_ref().unwrap().format, LogFormat::Json);
        assert_eq!(config.cache.kind, CacheKind::Memory);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.upstream.url, "http://127.0.0.1:9999/getToken");
        assert!(config.settings.metrics.is_enabled);
    }
}
