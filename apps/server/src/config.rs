use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};

/// Where holdings get their current market prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSource {
    /// Random prices, optionally from a fixed seed.
    Mock { seed: Option<u64> },
    /// Prices read once from a `symbol,price` CSV file.
    Static { prices_file: PathBuf },
    /// No prices; every holding is valued at zero.
    None,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub price_source: PriceSource,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("DF_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid DF_LISTEN_ADDR")?;
        let db_path = env_or("DF_DB_PATH", "./db/portfolio.db");
        let cors_allow = env_or("DF_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("DF_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let price_source = price_source_from_env()?;
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            price_source,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn price_source_from_env() -> anyhow::Result<PriceSource> {
    match env_or("DF_PRICE_SOURCE", "mock").to_ascii_lowercase().as_str() {
        "mock" => {
            let seed = std::env::var("DF_MOCK_PRICE_SEED")
                .ok()
                .map(|s| u64::from_str(s.trim()))
                .transpose()
                .context("Invalid DF_MOCK_PRICE_SEED")?;
            Ok(PriceSource::Mock { seed })
        }
        "static" => {
            let prices_file = std::env::var("DF_PRICES_FILE")
                .context("DF_PRICES_FILE is required when DF_PRICE_SOURCE=static")?;
            Ok(PriceSource::Static {
                prices_file: PathBuf::from(prices_file),
            })
        }
        "none" => Ok(PriceSource::None),
        other => Err(anyhow!(
            "Unknown DF_PRICE_SOURCE '{}' (expected mock, static or none)",
            other
        )),
    }
}
