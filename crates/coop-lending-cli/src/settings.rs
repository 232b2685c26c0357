use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;

use coop_lending_core::Currency;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "coop-lend.toml";

/// Environment variables with this prefix override file settings (`COOP_LEND_CURRENCY=PHP`).
pub const ENV_PREFIX: &str = "COOP_LEND";

/// CLI-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Currency assumed for loan terms that do not name one.
    pub currency: Currency,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

/// Load settings: built-in defaults, then the config file, then the environment.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => File::with_name(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .set_default("currency", "USD")?
        .set_default("log_filter", "warn")?
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()
}

impl Settings {
    /// Insert the configured currency into a terms-shaped JSON object lacking one.
    pub fn apply_default_currency(&self, terms: &mut Value) {
        if let Value::Object(map) = terms {
            if !map.contains_key("currency") {
                let currency = serde_json::to_value(&self.currency).unwrap_or(Value::Null);
                map.insert("currency".to_string(), currency);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn settings(currency: Currency) -> Settings {
        Settings {
            currency,
            log_filter: "warn".into(),
        }
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("coop-lend-test-{}.toml", std::process::id()));
        fs::write(&path, "currency = \"PHP\"\nlog_filter = \"debug\"\n").unwrap();
        let loaded = load_settings(path.to_str());
        fs::remove_file(&path).unwrap();

        let s = loaded.unwrap();
        assert_eq!(s.currency, Currency::PHP);
        assert_eq!(s.log_filter, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(load_settings(Some("/no/such/coop-lend.toml")).is_err());
    }

    #[test]
    fn test_default_currency_fills_gap_only() {
        let s = settings(Currency::PHP);

        let mut bare = serde_json::json!({"principal": "1000"});
        s.apply_default_currency(&mut bare);
        assert_eq!(bare["currency"], "PHP");

        let mut named = serde_json::json!({"principal": "1000", "currency": "JPY"});
        s.apply_default_currency(&mut named);
        assert_eq!(named["currency"], "JPY");
    }
}
