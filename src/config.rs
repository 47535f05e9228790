use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log: LogConfig,
    pub boundary: BoundaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// EnvFilter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Field-numbering base (0 or 1) recorded into `Index` records by the
    /// lookup helpers.
    pub index_base: u32,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TARLINK").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig { filter: "tarlink=debug,info".to_string() },
            boundary: BoundaryConfig { index_base: 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.log.filter, "tarlink=debug,info");
        assert_eq!(config.boundary.index_base, 0);
    }

    #[test]
    fn test_config_serializes_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.log.filter, config.log.filter);
        assert_eq!(back.boundary.index_base, config.boundary.index_base);
    }

    #[test]
    fn test_index_base_accepts_lua_convention() {
        let config = Config {
            boundary: BoundaryConfig { index_base: 1 },
            ..Config::default()
        };
        assert_eq!(config.boundary.index_base, 1);
    }
}
