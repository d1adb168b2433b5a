use crate::errors::{WeirError, WeirResult};

/// Tuning knobs for the crawl limit controller and yield tracker.
///
/// Passed explicitly into every controller call so the decision logic stays a
/// pure function of its inputs.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Limit used for accounts with no fetch history.
    pub default_limit: u32,
    /// Floor applied to every computed limit.
    pub min_limit: u32,
    /// Ceiling applied to every computed limit.
    pub max_limit: u32,
    /// Multiplier on the predicted demand to absorb oscillation.
    pub safety_margin: f64,
    /// EMA smoothing constant for the observed new-item rate.
    pub smoothing_alpha: f64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            min_limit: 5,
            max_limit: 200,
            safety_margin: 1.2,
            smoothing_alpha: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub crawl: CrawlConfig,
}

impl Config {
    pub fn from_env() -> WeirResult<Self> {
        dotenvy::dotenv().ok();

        let db_path =
            std::env::var("FEEDWEIR_DB_PATH").unwrap_or_else(|_| "./feedweir.db".to_string());

        let defaults = CrawlConfig::default();
        let crawl = CrawlConfig {
            default_limit: env_or("FEEDWEIR_DEFAULT_LIMIT", defaults.default_limit)?,
            min_limit: env_or("FEEDWEIR_MIN_LIMIT", defaults.min_limit)?,
            max_limit: env_or("FEEDWEIR_MAX_LIMIT", defaults.max_limit)?,
            safety_margin: env_or("FEEDWEIR_SAFETY_MARGIN", defaults.safety_margin)?,
            smoothing_alpha: env_or("FEEDWEIR_SMOOTHING_ALPHA", defaults.smoothing_alpha)?,
        };

        if crawl.min_limit > crawl.max_limit {
            return Err(WeirError::Config(format!(
                "FEEDWEIR_MIN_LIMIT ({}) exceeds FEEDWEIR_MAX_LIMIT ({})",
                crawl.min_limit, crawl.max_limit
            )));
        }

        Ok(Self { db_path, crawl })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> WeirResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| WeirError::Config(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
