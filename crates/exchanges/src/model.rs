use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExchangeId {
    Binance,
    Bybit,
    Bitget,
}

impl ExchangeId {
    pub const ALL: [ExchangeId; 3] = [ExchangeId::Binance, ExchangeId::Bybit, ExchangeId::Bitget];

    /// P2P deep link shown under arbitrage alerts for the sell-side venue.
    pub fn p2p_url(self) -> &'static str {
        match self {
            ExchangeId::Binance => "https://p2p.binance.com/ru/trade/USDT?fiat=UAH",
            ExchangeId::Bybit => "https://www.bybit.com/ru-ua/c2c",
            ExchangeId::Bitget => "https://www.bitget.com/ru/p2p/USDT",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExchangeId::Binance => "Binance",
            ExchangeId::Bybit => "Bybit",
            ExchangeId::Bitget => "Bitget",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
#[error("unknown exchange: {0}")]
pub struct ParseExchangeIdError(String);

impl FromStr for ExchangeId {
    type Err = ParseExchangeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binance" => Ok(ExchangeId::Binance),
            "bybit" => Ok(ExchangeId::Bybit),
            "bitget" => Ok(ExchangeId::Bitget),
            _ => Err(ParseExchangeIdError(s.to_string())),
        }
    }
}

/// Best bid/ask snapshot for one pair on one venue. Fetched fresh on every
/// scan cycle and never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ticker {
    pub ask: Option<f64>,
    pub bid: Option<f64>,
}

/// "USDT/UAH" -> "USDTUAH", the concatenated form all three venues use.
pub fn native_symbol(pair: &str) -> String {
    pair.replace('/', "")
}

/// Venue APIs quote prices as strings; empty or unparsable values mean the
/// book side is missing.
pub fn parse_price(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
