use serde::{Deserialize, Serialize};

/// Longest accepted transcript context.
const MAX_CONTEXT_LEN: usize = 1024;

/// Settings for the `dhproof` command-line tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Application context bound into every proof transcript (e.g. a session id).
    pub context: String,
    /// Emit proofs as certified-secret bundles instead of bare proofs.
    pub bundle: bool,
}

impl CliConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `DHPROOF_` prefix (e.g., `DHPROOF_CONTEXT=round-7`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `DHPROOF_CONFIG_PATH`. If not set, defaults
    /// to `./config/dhproof.toml`. A missing file is silently skipped.
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("DHPROOF_CONFIG_PATH")
            .unwrap_or_else(|_| "config/dhproof.toml".to_string());

        Figment::from(Serialized::defaults(CliConfig::default_settings()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("DHPROOF_").ignore(&["CONFIG_PATH"]))
            .extract()
    }

    /// Built-in defaults: no context, bundled proofs.
    pub fn default_settings() -> Self {
        Self {
            context: String::new(),
            bundle: true,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error message if the configuration is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.context.len() > MAX_CONTEXT_LEN {
            return Err(format!(
                "context is {} bytes, at most {MAX_CONTEXT_LEN} allowed",
                self.context.len()
            ));
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::default_settings()
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let config = CliConfig::from_env()?;
            assert_eq!(config, CliConfig::default_settings());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config/dhproof.toml",
                r#"
                context = "from-file"
                bundle = false
                "#,
            )?;
            jail.set_env("DHPROOF_CONTEXT", "from-env");

            let config = CliConfig::from_env()?;
            assert_eq!(config.context, "from-env");
            assert!(!config.bundle);
            Ok(())
        });
    }

    #[test]
    fn custom_config_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"context = "custom""#)?;
            jail.set_env("DHPROOF_CONFIG_PATH", "custom.toml");

            let config = CliConfig::from_env()?;
            assert_eq!(config.context, "custom");
            assert!(config.bundle);
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_oversized_context() {
        let config = CliConfig {
            context: "x".repeat(MAX_CONTEXT_LEN + 1),
            bundle: true,
        };
        assert!(config.validate().is_err());
        assert!(CliConfig::default_settings().validate().is_ok());
    }
}
