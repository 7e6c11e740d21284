use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ubbe::adapters::cache::RedisQuoteCache;
use ubbe::adapters::currency::{
    CachedExchangeRates, FixedExchangeRates, OpenExchangeConfig, OpenExchangeSource,
};
use ubbe::adapters::http::{app_router, rates::RatesAppState};
use ubbe::adapters::postgres::{
    PostgresFuelSurchargeReader, PostgresMarkupReader, PostgresRateSheetReader,
    PostgresRegressionModelReader, PostgresSurchargeRuleReader,
};
use ubbe::adapters::providers::{RateSheetProvider, RegressionProvider};
use ubbe::application::{LandedCostEngine, RateAggregator};
use ubbe::config::AppConfig;
use ubbe::domain::foundation::Currency;
use ubbe::ports::{ExchangeRateSource, QuoteCache, RateProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Postgres: rate sheets, regression models, surcharge rules, markups.
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("connected to Postgres");

    // Redis: quote and exchange-rate caches.
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;
    let cache: Arc<dyn QuoteCache> = Arc::new(RedisQuoteCache::new(redis_conn));
    info!("connected to Redis");

    // Exchange rates: live API when a key is configured, identity-ish
    // fixed table otherwise (development).
    let fx_source: Arc<dyn ExchangeRateSource> = match &config.currency.rates_api_key {
        Some(key) => Arc::new(OpenExchangeSource::new(
            OpenExchangeConfig::new(key.expose_secret())
                .with_base_url(config.currency.rates_api_url.clone()),
        )),
        None => {
            tracing::warn!("no rates API key configured, using fixed exchange rates");
            Arc::new(FixedExchangeRates::default())
        }
    };
    let fx = Arc::new(CachedExchangeRates::new(
        fx_source,
        cache.clone(),
        config.rating.fx_cache_ttl_secs,
    ));

    let cubic_factor = config.rating.cubic_factor_kg_per_m3;
    let providers: Vec<Arc<dyn RateProvider>> = vec![
        Arc::new(RateSheetProvider::new(
            Arc::new(PostgresRateSheetReader::new(pool.clone())),
            cubic_factor,
        )),
        Arc::new(RegressionProvider::new(
            Arc::new(PostgresRegressionModelReader::new(pool.clone())),
            cubic_factor,
            config.rating.regression_confidence_floor,
        )),
    ];

    let engine = LandedCostEngine::new(
        Arc::new(PostgresSurchargeRuleReader::new(pool.clone())),
        Arc::new(PostgresFuelSurchargeReader::new(pool.clone())),
        fx,
        cubic_factor,
    );

    let aggregator = RateAggregator::new(
        providers,
        engine,
        Arc::new(PostgresMarkupReader::new(pool)),
        cache,
        config.rating.provider_timeout(),
        config.rating.quote_cache_ttl_secs,
    );

    let default_currency = Currency::parse(&config.currency.base_currency)?;
    let app = app_router(
        RatesAppState::new(Arc::new(aggregator), default_currency),
        &config.server,
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("ubbe rating service listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
