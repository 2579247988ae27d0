use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use exchanges::{ExchangeId, TickerExchange};

use crate::config;
use crate::store::{Filter, FilterStore};
use crate::telegram::TelegramError;

/// Chat delivery seam. The scan loop only sees this trait, so tests run it
/// against a recording mock instead of the live bot.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        chat_id: i64,
        text: &str,
        button_label: &str,
        button_url: &str,
    ) -> Result<(), TelegramError>;
}

/// One detected threshold crossing. Derived per alert, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opportunity {
    pub buy_exchange: ExchangeId,
    pub sell_exchange: ExchangeId,
    pub ask: f64,
    pub bid: f64,
    pub volume: f64,
}

impl Opportunity {
    pub fn profit(&self) -> f64 {
        (self.bid - self.ask) * self.volume
    }
}

/// Both thresholds crossed at once. This is a threshold alert, not a profit
/// filter: `bid > ask` is not required, so zero or negative profit still
/// matches.
pub fn is_match(filter: &Filter, ask: f64, bid: f64) -> bool {
    ask <= filter.buy_rate && bid >= filter.sell_rate
}

pub fn format_alert(opp: &Opportunity) -> String {
    format!(
        "🔔 *Arbitrage opportunity!*\n\
         Купить на {} по {} UAH/USDT\n\
         Продать на {} по {} UAH/USDT\n\
         Объем: {} USDT\n\
         Прибыль: {:.2} UAH",
        opp.buy_exchange,
        opp.ask,
        opp.sell_exchange,
        opp.bid,
        opp.volume,
        opp.profit()
    )
}

pub struct Scanner {
    exchanges: Vec<Arc<dyn TickerExchange>>,
    store: Arc<FilterStore>,
    notifier: Arc<dyn Notifier>,
    pair: String,
}

impl Scanner {
    pub fn new(
        exchanges: Vec<Arc<dyn TickerExchange>>,
        store: Arc<FilterStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            exchanges,
            store,
            notifier,
            pair: config::PAIR.to_string(),
        }
    }

    /// Run until the shutdown channel flips. An in-flight cycle always
    /// finishes before the task stops; per-item failures never end the loop.
    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(
            "scan loop started: {} exchanges, {} every {}s",
            self.exchanges.len(),
            self.pair,
            interval.as_secs()
        );

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = sleep(interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        // exchange clients are dropped with the scanner
        info!("scan loop stopped");
    }

    /// One pass over every registered filter. An empty store performs zero
    /// ticker fetches.
    async fn run_cycle(&self) {
        let filters = self.store.snapshot().await;
        if filters.is_empty() {
            return;
        }

        for (chat_id, filter) in filters {
            let Some(home) = self.exchange(filter.exchange) else {
                warn!("no client configured for {}", filter.exchange);
                continue;
            };

            let ask = match home.fetch_ticker(&self.pair).await {
                Ok(ticker) => ticker.ask,
                Err(e) => {
                    warn!("ticker fetch failed on {}: {}", filter.exchange, e);
                    continue;
                }
            };
            // no ask on the home exchange: nothing to compare this cycle
            let Some(ask) = ask else { continue };

            for other in &self.exchanges {
                if other.id() == filter.exchange {
                    continue;
                }

                let bid = match other.fetch_ticker(&self.pair).await {
                    Ok(ticker) => ticker.bid,
                    Err(e) => {
                        warn!("ticker fetch failed on {}: {}", other.id(), e);
                        continue;
                    }
                };
                let Some(bid) = bid else { continue };

                if !is_match(&filter, ask, bid) {
                    continue;
                }

                let opp = Opportunity {
                    buy_exchange: filter.exchange,
                    sell_exchange: other.id(),
                    ask,
                    bid,
                    volume: filter.max_volume,
                };
                info!(
                    "opportunity for {}: buy {} @ {}, sell {} @ {}, profit {:.2}",
                    chat_id,
                    opp.buy_exchange,
                    opp.ask,
                    opp.sell_exchange,
                    opp.bid,
                    opp.profit()
                );

                let text = format_alert(&opp);
                if let Err(e) = self
                    .notifier
                    .notify(chat_id, &text, "Открыть P2P", opp.sell_exchange.p2p_url())
                    .await
                {
                    error!("failed to notify {}: {}", chat_id, e);
                }
            }
        }
    }

    fn exchange(&self, id: ExchangeId) -> Option<&Arc<dyn TickerExchange>> {
        self.exchanges.iter().find(|e| e.id() == id)
    }
}
