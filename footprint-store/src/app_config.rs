use serde::Deserialize;
use std::env;
use footprint_catalog::{PricingConfig, SizeBuckets};
use footprint_shared::Mode;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub default_mode: Mode,
    #[serde(default = "default_moq")]
    pub moq_pairs: u32,
    #[serde(default = "default_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_tax_note")]
    pub tax_note: String,
    #[serde(default)]
    pub size_buckets: SizeBuckets,
    #[serde(default = "default_session_idle")]
    pub session_idle_minutes: u64,
}

fn default_title() -> String { "Footprint Shoes".to_string() }
fn default_moq() -> u32 { PricingConfig::default().moq_pairs }
fn default_symbol() -> String { PricingConfig::default().currency_symbol }
fn default_tax_note() -> String { PricingConfig::default().tax_note }
fn default_session_idle() -> u64 { 120 }

/// Thirty days
pub const MAX_SESSION_IDLE_MINUTES: u64 = 30 * 24 * 60;

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_mode: Mode::default(),
            moq_pairs: default_moq(),
            currency_symbol: default_symbol(),
            tax_note: default_tax_note(),
            size_buckets: SizeBuckets::default(),
            session_idle_minutes: default_session_idle(),
        }
    }
}

impl StorefrontConfig {
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            moq_pairs: self.moq_pairs,
            currency_symbol: self.currency_symbol.clone(),
            tax_note: self.tax_note.clone(),
        }
    }

    /// Idle timeout for shopper sessions, capped at `MAX_SESSION_IDLE_MINUTES`
    pub fn session_idle(&self) -> chrono::Duration {
        let minutes = self.session_idle_minutes.min(MAX_SESSION_IDLE_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON array of products. The built-in catalog is used when unset.
    pub seed_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FOOTPRINT__STOREFRONT__MOQ_PAIRS=12`
            .add_source(env_source())
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.storefront.size_buckets.is_empty() {
            return Err(config::ConfigError::Message(
                "storefront.size_buckets must list at least one size".to_string(),
            ));
        }
        if self.storefront.moq_pairs == 0 {
            return Err(config::ConfigError::Message(
                "storefront.moq_pairs must be greater than zero".to_string(),
            ));
        }
        if self.storefront.session_idle_minutes == 0
            || self.storefront.session_idle_minutes > MAX_SESSION_IDLE_MINUTES
        {
            return Err(config::ConfigError::Message(format!(
                "storefront.session_idle_minutes must be between 1 and {}",
                MAX_SESSION_IDLE_MINUTES
            )));
        }
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("FOOTPRINT").separator("__")
}
