use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{native_symbol, parse_price, ExchangeId, Ticker};
use crate::{ExchangeError, TickerExchange};

const BASE_URL: &str = "https://api.binance.com";

#[derive(Clone)]
pub struct BinanceClient {
    http: reqwest::Client,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceBookTicker {
    #[serde(default)]
    bid_price: String,
    #[serde(default)]
    ask_price: String,
}

#[async_trait]
impl TickerExchange for BinanceClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    async fn fetch_ticker(&self, pair: &str) -> Result<Ticker, ExchangeError> {
        let url = format!(
            "{BASE_URL}/api/v3/ticker/bookTicker?symbol={}",
            native_symbol(pair)
        );
        let ticker: BinanceBookTicker = self.http.get(&url).send().await?.json().await?;

        Ok(Ticker {
            ask: parse_price(&ticker.ask_price),
            bid: parse_price(&ticker.bid_price),
        })
    }
}
