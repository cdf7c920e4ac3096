//! Server settings, read once from the environment.
//!
//! | variable          | default   |
//! |-------------------|-----------|
//! | `CONNECT4_HOST`   | `0.0.0.0` |
//! | `CONNECT4_PORT`   | `3000`    |
//! | `CONNECT4_ROWS`   | `6`       |
//! | `CONNECT4_COLS`   | `7`       |
//! | `CONNECT4_DEPTH`  | `6`       |
use std::str::FromStr;

use connect4::EngineConfig;
use once_cell::sync::Lazy;
use tracing::warn;

pub static CONFIG: Lazy<ServerConfig> =
    Lazy::new(|| ServerConfig::from_lookup(|key| std::env::var(key).ok()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("CONNECT4_HOST") {
            config.host = host;
        }
        override_with(&lookup, "CONNECT4_PORT", &mut config.port);
        override_with(&lookup, "CONNECT4_ROWS", &mut config.engine.rows);
        override_with(&lookup, "CONNECT4_COLS", &mut config.engine.cols);
        override_with(&lookup, "CONNECT4_DEPTH", &mut config.engine.depth);
        config
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn override_with<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "ignoring unparsable setting"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CONNECT4_HOST", "127.0.0.1"),
            ("CONNECT4_PORT", "8080"),
            ("CONNECT4_DEPTH", " 4 "),
            ("CONNECT4_COLS", "8"),
        ]));
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.engine.depth, 4);
        assert_eq!(config.engine.cols, 8);
        assert_eq!(config.engine.rows, 6);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CONNECT4_PORT", "eighty"),
            ("CONNECT4_DEPTH", "-1"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.engine.depth, 6);
    }
}
