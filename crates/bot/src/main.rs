use std::sync::Arc;

use color_eyre::eyre;
use tokio::sync::watch;
use tracing::{error, info};

use arbitpro::config::Config;
use arbitpro::logger;
use arbitpro::scanner::Scanner;
use arbitpro::store::FilterStore;
use arbitpro::telegram::{polling, webhook, BotClient};
use exchanges::{BinanceClient, BitgetClient, BybitClient, TickerExchange};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // init logging (guards must outlive main)
    let _guards = logger::init_tracing();

    // .env is loaded by the library crate
    let config = Config::from_env()?;

    let bot = BotClient::new(config.bot_token.clone());
    let store = Arc::new(FilterStore::new());

    // set up exchanges
    let clients: Vec<Arc<dyn TickerExchange>> = vec![
        Arc::new(BinanceClient::new()),
        Arc::new(BybitClient::new()),
        Arc::new(BitgetClient::new()),
    ];

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // supervised scan task; the in-flight cycle completes before it stops
    let scanner = Scanner::new(clients, store.clone(), Arc::new(bot.clone()));
    let scan_handle = tokio::spawn(scanner.run(config.scan_interval, shutdown_rx.clone()));

    // Ctrl-C flips the shutdown channel for the transport and the scanner
    {
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
        });
    }

    let result = match &config.webhook_url {
        Some(url) => webhook::serve(bot, store, url, config.port, shutdown_rx).await,
        None => polling::run(bot, store, shutdown_rx)
            .await
            .map_err(eyre::Report::from),
    };

    // stop the scanner even when the transport errored out
    let _ = shutdown_tx.send(true);
    if let Err(e) = scan_handle.await {
        error!("scan task failed: {}", e);
    }

    result
}
