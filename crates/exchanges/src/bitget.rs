use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{native_symbol, parse_price, ExchangeId, Ticker};
use crate::{ExchangeError, TickerExchange};

const BASE_URL: &str = "https://api.bitget.com";

#[derive(Clone)]
pub struct BitgetClient {
    http: reqwest::Client,
}

impl BitgetClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for BitgetClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct BitgetResponse<T> {
    code: String,
    msg: String,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BitgetTicker {
    #[serde(default)]
    bid_pr: String,
    #[serde(default)]
    ask_pr: String,
}

#[async_trait]
impl TickerExchange for BitgetClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bitget
    }

    async fn fetch_ticker(&self, pair: &str) -> Result<Ticker, ExchangeError> {
        let url = format!(
            "{BASE_URL}/api/v2/spot/market/tickers?symbol={}",
            native_symbol(pair)
        );
        let response: BitgetResponse<Vec<BitgetTicker>> =
            self.http.get(&url).send().await?.json().await?;

        if response.code != "00000" {
            return Err(ExchangeError::Api(format!(
                "Bitget: {} - {}",
                response.code, response.msg
            )));
        }

        let ticker = match response.data.unwrap_or_default().into_iter().next() {
            Some(t) => t,
            None => return Ok(Ticker::default()),
        };

        Ok(Ticker {
            ask: parse_price(&ticker.ask_pr),
            bid: parse_price(&ticker.bid_pr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitget_client_id() {
        let client = BitgetClient::new();
        assert_eq!(client.id(), ExchangeId::Bitget);
    }

    #[test]
    fn test_ticker_response_deserialization() {
        let json = r#"{
            "code": "00000",
            "msg": "success",
            "requestTime": 1719836400000,
            "data": [{
                "symbol": "USDTUAH",
                "bidPr": "42.30",
                "askPr": "42.55",
                "lastPr": "42.40"
            }]
        }"#;

        let response: BitgetResponse<Vec<BitgetTicker>> = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, "00000");
        let ticker = &response.data.unwrap()[0];
        assert_eq!(parse_price(&ticker.bid_pr), Some(42.30));
        assert_eq!(parse_price(&ticker.ask_pr), Some(42.55));
    }

    #[test]
    fn test_ticker_response_error_code() {
        let json = r#"{ "code": "40034", "msg": "Parameter does not exist", "data": null }"#;

        let response: BitgetResponse<Vec<BitgetTicker>> = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, "40034");
        assert!(response.data.is_none());
    }
}
