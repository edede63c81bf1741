use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use dematfolio_core::{
    cash::{CashService, CashServiceTrait},
    portfolio::holdings::{HoldingsService, HoldingsServiceTrait},
    prices::{MockPriceProvider, NoPriceProvider, PriceProvider, StaticPriceProvider},
    transactions::{TransactionService, TransactionServiceTrait},
    watchlist::{WatchlistService, WatchlistServiceTrait},
};
use dematfolio_storage_sqlite::{
    cash::CashRepository,
    db::{self, spawn_writer},
    transactions::TransactionRepository,
    watchlist::WatchlistRepository,
};

use crate::config::{Config, PriceSource};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait + Send + Sync>,
    pub cash_service: Arc<dyn CashServiceTrait + Send + Sync>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("DF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_price_provider(source: &PriceSource) -> anyhow::Result<Arc<dyn PriceProvider>> {
    let provider: Arc<dyn PriceProvider> = match source {
        PriceSource::Mock { seed: Some(seed) } => Arc::new(MockPriceProvider::seeded(*seed)),
        PriceSource::Mock { seed: None } => Arc::new(MockPriceProvider::new()),
        PriceSource::Static { prices_file } => Arc::new(
            StaticPriceProvider::from_file(prices_file)
                .with_context(|| format!("Failed to load prices from {:?}", prices_file))?,
        ),
        PriceSource::None => Arc::new(NoPriceProvider),
    };
    tracing::info!("Using price provider '{}'", provider.name());
    Ok(provider)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer(&pool)?;

    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let cash_repository = Arc::new(CashRepository::new(pool.clone(), writer.clone()));
    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer));
    let price_provider = build_price_provider(&config.price_source)?;

    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let holdings_service = Arc::new(HoldingsService::new(
        transaction_repository,
        price_provider,
    ));
    let cash_service = Arc::new(CashService::new(cash_repository));
    let watchlist_service = Arc::new(WatchlistService::new(watchlist_repository));

    Ok(Arc::new(AppState {
        transaction_service,
        holdings_service,
        cash_service,
        watchlist_service,
        db_path,
    }))
}
