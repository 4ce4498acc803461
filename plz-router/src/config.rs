//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::address::ResolverConfig;
use crate::cache::CacheConfig;
use crate::geocode::NominatimConfig;

const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything `main` needs to wire the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PLZ_BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `PLZ_GEOCODER_URL`; the public Nominatim instance when unset
    pub geocoder_url: Option<String>,
    /// `PLZ_GEOCODER_USER_AGENT`
    pub geocoder_user_agent: Option<String>,
    /// `PLZ_GEOCODE_TIMEOUT_SECS`
    pub geocode_timeout: Duration,
    /// `PLZ_GEOCODER_DISABLED`; resolve from the local table only
    pub geocoder_disabled: bool,
    /// `PLZ_GEOCODER_MOCK_FILE`; answer geocoding from a JSON file instead of the network
    pub geocoder_mock_file: Option<PathBuf>,
    /// `PLZ_GEOCODE_CACHE_TTL_SECS`
    pub geocode_cache_ttl: Duration,
    /// `PLZ_CITY_TABLE`; the embedded table when unset
    pub city_table: Option<PathBuf>,
    /// `PLZ_CONTACTS`; the embedded contacts when unset
    pub contacts: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = var("PLZ_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "PLZ_BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        config.geocoder_url = var("PLZ_GEOCODER_URL");
        config.geocoder_user_agent = var("PLZ_GEOCODER_USER_AGENT");
        if let Some(value) = var("PLZ_GEOCODE_TIMEOUT_SECS") {
            config.geocode_timeout = parse_secs("PLZ_GEOCODE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = var("PLZ_GEOCODER_DISABLED") {
            config.geocoder_disabled = parse_flag("PLZ_GEOCODER_DISABLED", &value)?;
        }
        config.geocoder_mock_file = var("PLZ_GEOCODER_MOCK_FILE").map(PathBuf::from);
        if let Some(value) = var("PLZ_GEOCODE_CACHE_TTL_SECS") {
            config.geocode_cache_ttl = parse_secs("PLZ_GEOCODE_CACHE_TTL_SECS", &value)?;
        }
        config.city_table = var("PLZ_CITY_TABLE").map(PathBuf::from);
        config.contacts = var("PLZ_CONTACTS").map(PathBuf::from);

        Ok(config)
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the geocoding timeout.
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    /// Turn the geocoding fallback off.
    pub fn without_geocoder(mut self) -> Self {
        self.geocoder_disabled = true;
        self
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default().with_geocode_timeout(self.geocode_timeout)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.geocode_cache_ttl,
            ..CacheConfig::default()
        }
    }

    /// Nominatim client settings with any overrides applied.
    ///
    /// The HTTP timeout is kept a little above the resolver's bound so the
    /// resolver's own timeout is what normally fires.
    pub fn nominatim_config(&self) -> NominatimConfig {
        let mut config =
            NominatimConfig::new().with_timeout(self.geocode_timeout.as_secs().saturating_add(1));
        if let Some(url) = &self.geocoder_url {
            config = config.with_base_url(url);
        }
        if let Some(agent) = &self.geocoder_user_agent {
            config = config.with_user_agent(agent);
        }
        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            geocoder_url: None,
            geocoder_user_agent: None,
            geocode_timeout: Duration::from_secs(DEFAULT_GEOCODE_TIMEOUT_SECS),
            geocoder_disabled: false,
            geocoder_mock_file: None,
            geocode_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            city_table: None,
            contacts: None,
        }
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.geocode_timeout, Duration::from_secs(5));
        assert_eq!(config.geocode_cache_ttl, Duration::from_secs(3600));
        assert!(!config.geocoder_disabled);
        assert!(config.city_table.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_vars(&[
            ("PLZ_BIND_ADDR", "0.0.0.0:8080"),
            ("PLZ_GEOCODER_URL", "http://localhost:7070"),
            ("PLZ_GEOCODER_USER_AGENT", "test-agent"),
            ("PLZ_GEOCODE_TIMEOUT_SECS", "2"),
            ("PLZ_GEOCODER_DISABLED", "true"),
            ("PLZ_GEOCODER_MOCK_FILE", "/tmp/places.json"),
            ("PLZ_GEOCODE_CACHE_TTL_SECS", "60"),
            ("PLZ_CITY_TABLE", "/etc/plz/cities.json"),
            ("PLZ_CONTACTS", "/etc/plz/contacts.json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.geocoder_url.as_deref(), Some("http://localhost:7070"));
        assert_eq!(config.geocode_timeout, Duration::from_secs(2));
        assert!(config.geocoder_disabled);
        assert_eq!(
            config.geocoder_mock_file,
            Some(PathBuf::from("/tmp/places.json"))
        );
        assert_eq!(config.geocode_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.city_table, Some(PathBuf::from("/etc/plz/cities.json")));
        assert_eq!(config.contacts, Some(PathBuf::from("/etc/plz/contacts.json")));

        let nominatim = config.nominatim_config();
        assert_eq!(nominatim.base_url, "http://localhost:7070");
        assert_eq!(nominatim.user_agent, "test-agent");
        assert_eq!(nominatim.timeout_secs, 3);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = from_vars(&[("PLZ_GEOCODER_URL", "  "), ("PLZ_CITY_TABLE", "")]).unwrap();
        assert!(config.geocoder_url.is_none());
        assert!(config.city_table.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = from_vars(&[("PLZ_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("PLZ_BIND_ADDR"));

        assert!(from_vars(&[("PLZ_GEOCODE_TIMEOUT_SECS", "soon")]).is_err());
        assert!(from_vars(&[("PLZ_GEOCODE_TIMEOUT_SECS", "0")]).is_err());
        assert!(from_vars(&[("PLZ_GEOCODER_DISABLED", "maybe")]).is_err());
    }

    #[test]
    fn flags() {
        for (value, expected) in [("1", true), ("YES", true), ("off", false), ("false", false)] {
            let config = from_vars(&[("PLZ_GEOCODER_DISABLED", value)]).unwrap();
            assert_eq!(config.geocoder_disabled, expected, "value {value}");
        }
    }

    #[test]
    fn derived_configs() {
        let config = ServerConfig::default()
            .with_geocode_timeout(Duration::from_secs(7))
            .without_geocoder();
        assert!(config.geocoder_disabled);
        assert_eq!(config.resolver_config().geocode_timeout, Duration::from_secs(7));
        assert_eq!(config.cache_config().ttl, Duration::from_secs(3600));
        assert_eq!(config.nominatim_config().timeout_secs, 8);
    }
}
