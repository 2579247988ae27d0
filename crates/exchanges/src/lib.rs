use async_trait::async_trait;
use thiserror::Error;

pub mod binance;
pub mod bitget;
pub mod bybit;
pub mod model;

pub use model::{ExchangeId, Ticker};

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[async_trait]
pub trait TickerExchange: Send + Sync {
    fn id(&self) -> ExchangeId;

    /// Best bid/ask for a pair given as "BASE/QUOTE" (e.g. "USDT/UAH").
    /// Missing or unparsable prices come back as `None`, not as an error.
    async fn fetch_ticker(&self, pair: &str) -> Result<Ticker, ExchangeError>;
}

// Convenience re-exports
pub use binance::BinanceClient;
pub use bitget::BitgetClient;
pub use bybit::BybitClient;
