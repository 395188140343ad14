use serde::{Deserialize, Serialize};

/// TtyDbg configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtyDbgConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Line defaults used when the command line leaves them unset
    #[serde(default)]
    pub line: LineDefaults,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base log level, raised to debug by `-v`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Serial line defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDefaults {
    /// Baud rate used when `-b` is absent
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Parity policy
    #[serde(default)]
    pub parity: ParityConfig,
    /// Repeat spacing in seconds used when `-t` is absent.
    /// A value here counts as an explicitly configured interval.
    #[serde(default)]
    pub interval_secs: Option<u64>,
    /// How often the reader wakes up to check for cancellation
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

/// Parity configuration
///
/// `Space` is applied exactly like `None` (8N1). Real space parity is
/// not distinguished by the line configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParityConfig {
    #[default]
    None,
    Even,
    Odd,
    Space,
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_read_timeout() -> u64 {
    100
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LineDefaults {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
            parity: ParityConfig::default(),
            interval_secs: None,
            read_timeout_ms: default_read_timeout(),
        }
    }
}

impl std::fmt::Display for ParityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParityConfig::None => write!(f, "none"),
            ParityConfig::Even => write!(f, "even"),
            ParityConfig::Odd => write!(f, "odd"),
            ParityConfig::Space => write!(f, "space"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = TtyDbgConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: TtyDbgConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.line.baud_rate, 115_200);
        assert_eq!(deserialized.global.log_level, "warn");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TtyDbgConfig = toml::from_str(
            r#"
            [line]
            parity = "even"
            interval_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.line.parity, ParityConfig::Even);
        assert_eq!(config.line.interval_secs, Some(2));
        assert_eq!(config.line.baud_rate, 115_200);
        assert_eq!(config.line.read_timeout_ms, 100);
        assert_eq!(config.global.log_level, "warn");
    }

    #[test]
    fn test_empty_config() {
        let config: TtyDbgConfig = toml::from_str("").unwrap();
        assert_eq!(config.line.parity, ParityConfig::None);
        assert!(config.line.interval_secs.is_none());
    }

    #[test]
    fn test_unknown_parity_rejected() {
        let result: Result<TtyDbgConfig, _> = toml::from_str("[line]\nparity = \"mark\"\n");
        assert!(result.is_err());
    }
}
