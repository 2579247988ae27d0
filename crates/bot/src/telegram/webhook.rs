use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::sync::watch;
use tracing::{error, info};

use super::types::Update;
use super::{commands, BotClient};
use crate::store::FilterStore;

#[derive(Clone)]
pub struct AppState {
    pub bot: BotClient,
    pub store: Arc<FilterStore>,
}

async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<Update>,
) -> StatusCode {
    let Some(message) = update.message else {
        return StatusCode::OK;
    };
    let Some(text) = message.text.as_deref() else {
        return StatusCode::OK;
    };

    let chat_id = message.chat.id;
    if let Some(reply) = commands::handle(&state.store, chat_id, text).await {
        if let Err(e) = state.bot.send_message(chat_id, &reply, None).await {
            error!("failed to reply to {}: {}", chat_id, e);
        }
    }

    // always 200, otherwise Telegram redelivers the update
    StatusCode::OK
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Register the webhook and serve it until the shutdown channel flips.
pub async fn serve(
    bot: BotClient,
    store: Arc<FilterStore>,
    public_url: &str,
    port: u16,
    mut shutdown: watch::Receiver<bool>,
) -> eyre::Result<()> {
    let callback = format!("{}/webhook", public_url.trim_end_matches('/'));
    bot.set_webhook(&callback).await?;
    info!("transport: webhook at {}", callback);

    let state = Arc::new(AppState { bot, store });
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await?;

    info!("webhook server stopped");
    Ok(())
}
