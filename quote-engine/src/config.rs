//! Engine configuration
//!
//! Explicit configuration value built at the composition root and passed to
//! whatever needs it (currently the quotation store). Nothing in the engine
//! reads ambient/global state.
//!
//! # Environment variables
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | QUOTE_CODE_PREFIX | QT | Prefix of generated quotation codes |
//! | DEFAULT_PROFIT_PERCENT | 25 | Profit markup preset for new quotations |
//! | DEFAULT_VAT_PERCENT | 15 | VAT rate preset for new quotations |

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Prefix of generated quotation codes (followed by 5 random digits)
    pub quote_code_prefix: String,
    /// Profit markup preset for new quotations, in percent
    pub default_profit_percent: f64,
    /// VAT rate preset for new quotations, in percent
    pub default_vat_percent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quote_code_prefix: "QT".to_string(),
            default_profit_percent: 25.0,
            default_vat_percent: 15.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quote_code_prefix: std::env::var("QUOTE_CODE_PREFIX")
                .unwrap_or(defaults.quote_code_prefix),
            default_profit_percent: env_f64("DEFAULT_PROFIT_PERCENT")
                .unwrap_or(defaults.default_profit_percent),
            default_vat_percent: env_f64("DEFAULT_VAT_PERCENT")
                .unwrap_or(defaults.default_vat_percent),
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.parse().ok().filter(|v: &f64| v.is_finite())
}
