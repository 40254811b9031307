//! Token configuration from environment variables.

use crate::domain::value_objects::Amount;
use crate::errors::ConfigError;
use std::env;

/// Default token name.
pub const DEFAULT_NAME: &str = "TicToken";
/// Default token symbol.
pub const DEFAULT_SYMBOL: &str = "TTO";
/// Default standard string.
pub const DEFAULT_STANDARD: &str = "TicToken version 1.0";
/// Default total supply credited to the deployer.
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1_000_000;

/// Static token metadata plus the supply minted at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Human-readable name.
    pub name: String,

    /// Ticker symbol.
    pub symbol: String,

    /// Standard/version string.
    pub standard: String,

    /// Total supply, credited in full to the initial holder.
    pub initial_supply: Amount,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            standard: DEFAULT_STANDARD.to_string(),
            initial_supply: Amount::from(DEFAULT_INITIAL_SUPPLY),
        }
    }
}

impl TokenConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TIC_TOKEN_NAME`: Token name (default: TicToken)
    /// - `TIC_TOKEN_SYMBOL`: Token symbol (default: TTO)
    /// - `TIC_TOKEN_STANDARD`: Standard string (default: TicToken version 1.0)
    /// - `TIC_INITIAL_SUPPLY`: Decimal total supply (default: 1000000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`Self::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let initial_supply = match lookup("TIC_INITIAL_SUPPLY") {
            Some(raw) => Amount::from_dec_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
                var: "TIC_INITIAL_SUPPLY",
                value: raw.clone(),
            })?,
            None => defaults.initial_supply,
        };

        let config = Self {
            name: lookup("TIC_TOKEN_NAME").unwrap_or(defaults.name),
            symbol: lookup("TIC_TOKEN_SYMBOL").unwrap_or(defaults.symbol),
            standard: lookup("TIC_TOKEN_STANDARD").unwrap_or(defaults.standard),
            initial_supply,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style supply override.
    pub fn with_initial_supply(mut self, supply: impl Into<Amount>) -> Self {
        self.initial_supply = supply.into();
        self
    }

    /// Reject configurations the ledger cannot be created from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_supply.is_zero() {
            return Err(ConfigError::ZeroSupply);
        }
        Ok(())
    }
}
