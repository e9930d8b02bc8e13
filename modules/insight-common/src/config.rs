use std::env;
use std::path::PathBuf;

use crate::error::InsightError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Record store
    pub insights_path: PathBuf,
    /// Snapshot reload interval in seconds; 0 disables the reload loop.
    pub cache_reload_secs: u64,

    // Web server
    pub web_host: String,
    pub web_port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            insights_path: PathBuf::from("data/jsondata.json"),
            cache_reload_secs: 0,
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, InsightError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InsightError> {
        let defaults = Config::default();

        let insights_path = lookup("INSIGHTS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.insights_path);
        let web_host = lookup("WEB_HOST").unwrap_or(defaults.web_host);
        let web_port = parse_or("WEB_PORT", lookup("WEB_PORT"), defaults.web_port)?;
        let cache_reload_secs = parse_or(
            "CACHE_RELOAD_SECS",
            lookup("CACHE_RELOAD_SECS"),
            defaults.cache_reload_secs,
        )?;
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            insights_path,
            cache_reload_secs,
            web_host,
            web_port,
            allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, InsightError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| InsightError::Config(format!("{key} must be a number, got {v:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.insights_path, PathBuf::from("data/jsondata.json"));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.cache_reload_secs, 0);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("INSIGHTS_PATH", "/srv/insights.json"),
            ("WEB_PORT", "8080"),
            ("CACHE_RELOAD_SECS", "600"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();
        assert_eq!(config.insights_path, PathBuf::from("/srv/insights.json"));
        assert_eq!(config.web_port, 8080);
        assert_eq!(config.cache_reload_secs, 600);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup(&[("WEB_PORT", "http")])).unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }
}
