use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{native_symbol, parse_price, ExchangeId, Ticker};
use crate::{ExchangeError, TickerExchange};

const BASE_URL: &str = "https://api.bybit.com";

#[derive(Clone)]
pub struct BybitClient {
    http: reqwest::Client,
}

impl BybitClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for BybitClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitTicker {
    #[serde(default)]
    bid1_price: String,
    #[serde(default)]
    ask1_price: String,
}

#[derive(Debug, Deserialize)]
struct BybitTickerResult {
    list: Vec<BybitTicker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitTickerResponse {
    ret_code: i32,
    ret_msg: String,
    result: BybitTickerResult,
}

#[async_trait]
impl TickerExchange for BybitClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bybit
    }

    async fn fetch_ticker(&self, pair: &str) -> Result<Ticker, ExchangeError> {
        let url = format!(
            "{BASE_URL}/v5/market/tickers?category=spot&symbol={}",
            native_symbol(pair)
        );
        let response: BybitTickerResponse = self.http.get(&url).send().await?.json().await?;

        if response.ret_code != 0 {
            return Err(ExchangeError::Api(format!(
                "Bybit: {} - {}",
                response.ret_code, response.ret_msg
            )));
        }

        // unknown symbols come back as an empty list, not an error
        let ticker = match response.result.list.into_iter().next() {
            Some(t) => t,
            None => return Ok(Ticker::default()),
        };

        Ok(Ticker {
            ask: parse_price(&ticker.ask1_price),
            bid: parse_price(&ticker.bid1_price),
        })
    }
}
