use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnicareConfig {
    pub dialogue: DialogueConfig,
    pub gateway: GatewayConfig,
    pub session: SessionConfig,
}

impl UnicareConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: UnicareConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("UNICARE_RULES_PATH") {
            self.dialogue.rules_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("UNICARE_HOST") {
            self.gateway.host = v;
        }
        if let Ok(v) = std::env::var("UNICARE_PORT") {
            match v.parse() {
                Ok(port) => self.gateway.port = port,
                Err(_) => tracing::warn!("Ignoring invalid UNICARE_PORT: {}", v),
            }
        }
        if let Ok(v) = std::env::var("UNICARE_FACTS_DIR") {
            self.session.facts_dir = Some(PathBuf::from(v));
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Rule book replacing the built-in keyword tables and replies.
    pub rules_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the CLI keeps facts files for identified users.
    pub facts_dir: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = UnicareConfig::default();
        assert!(cfg.dialogue.rules_path.is_none());
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert_eq!(cfg.gateway.port, 5000);
        assert!(cfg.session.facts_dir.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[gateway]
port = 8080
"#;
        let cfg: UnicareConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.gateway.port, 8080);
        // Defaults for unspecified fields
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert!(cfg.dialogue.rules_path.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[dialogue]
rules_path = "rules/custom.toml"

[gateway]
host = "0.0.0.0"
port = 9000

[session]
facts_dir = "/var/lib/unicare/facts"
"#;
        let cfg: UnicareConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            cfg.dialogue.rules_path,
            Some(PathBuf::from("rules/custom.toml"))
        );
        assert_eq!(cfg.gateway.host, "0.0.0.0");
        assert_eq!(cfg.gateway.port, 9000);
        assert_eq!(
            cfg.session.facts_dir,
            Some(PathBuf::from("/var/lib/unicare/facts"))
        );
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("UNICARE_HOST", "0.0.0.0");
        std::env::set_var("UNICARE_PORT", "not-a-port");

        let mut cfg = UnicareConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.gateway.host, "0.0.0.0");
        assert_eq!(cfg.gateway.port, 5000);

        std::env::remove_var("UNICARE_HOST");
        std::env::remove_var("UNICARE_PORT");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = UnicareConfig::load_or_default("/nonexistent/unicare.toml");
        assert_eq!(cfg.gateway.host, "127.0.0.1");
    }
}
