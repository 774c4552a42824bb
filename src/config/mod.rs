use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::RwLock;

/// Ledger defaults applied when the menu leaves a variant parameter blank
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Transaction fee charged on each checking withdrawal
    pub default_transaction_fee: f64,
    /// Interest rate for savings accounts, as a fraction (0.02 = 2%)
    pub default_interest_rate: f64,
}

impl LedgerConfig {
    /// Reject defaults that would create accounts the registry refuses
    pub fn validate(&self) -> Result<()> {
        if !(self.default_transaction_fee.is_finite() && self.default_transaction_fee >= 0.0) {
            return Err(anyhow!(
                "ledger.default_transaction_fee must be a non-negative amount, got {}",
                self.default_transaction_fee
            ));
        }
        if !self.default_interest_rate.is_finite() {
            return Err(anyhow!(
                "ledger.default_interest_rate must be finite, got {}",
                self.default_interest_rate
            ));
        }
        Ok(())
    }
}

/// Polymorphism demonstration settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DemoConfig {
    /// Amount withdrawn from each demo account
    pub withdrawal_amount: f64,
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version
    pub version: String,
    /// Ledger defaults
    pub ledger: LedgerConfig,
    /// Demonstration settings
    pub demo: DemoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Bank Ledger CLI".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ledger: LedgerConfig {
                default_transaction_fee: 1.50,
                default_interest_rate: 0.02,
            },
            demo: DemoConfig {
                withdrawal_amount: 100.0,
            },
        }
    }
}

// Global configuration instance
lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

fn store(config: Config) -> Result<()> {
    let mut guard = CONFIG
        .write()
        .map_err(|_| anyhow!("Configuration lock poisoned"))?;
    *guard = config;
    Ok(())
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<()> {
    // Check if file exists
    if !Path::new(path).exists() {
        // If not, create default config and save it
        let default_config = Config::default();
        save_config(path, &default_config)?;
        return store(default_config);
    }

    // Read the config file
    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Failed to read config file")?;

    // Parse the config file
    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    config
        .ledger
        .validate()
        .context(format!("Invalid configuration in {}", path))?;

    store(config)
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    let serialized = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        false => serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?,
    };

    std::fs::write(path, serialized).context(format!("Failed to write config to file: {}", path))?;

    Ok(())
}

/// Get a copy of the current config
pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Update the current config
pub fn update_config(config: Config) -> Result<()> {
    config.ledger.validate()?;
    store(config)
}
