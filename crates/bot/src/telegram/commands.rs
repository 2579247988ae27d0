use exchanges::ExchangeId;

use crate::config;
use crate::store::{Filter, FilterStore};

const START_TEXT: &str = "🤖 *Добро пожаловать в ArbitPRO!* 🤖\n\n\
    Этот бот уведомляет об арбитражных возможностях между биржами Binance, Bybit и Bitget.\n\n\
    Команды:\n\
    /set_filters <exchange> <buy_rate> <sell_rate> - установить фильтр\n\
    Пример: /set_filters Binance 41.20 42.50\n\
    /my_settings - показать текущие настройки";

const USAGE_TEXT: &str = "Использование: /set_filters <exchange> <buy_rate> <sell_rate>";
const EXCHANGES_TEXT: &str = "Доступные: Binance, Bybit, Bitget";
const FORMAT_TEXT: &str = "Неправильный формат. Пример: /set_filters Binance 41.20 42.50";
const NOT_SET_TEXT: &str = "Фильтр не установлен. /set_filters";

/// Dispatch one incoming message. Returns the reply text, or None for
/// anything that is not a recognized command. All validation happens here,
/// before a filter can reach the store the scanner reads.
pub async fn handle(store: &FilterStore, chat_id: i64, text: &str) -> Option<String> {
    let mut parts = text.split_whitespace();
    let command = parts.next()?;
    if !command.starts_with('/') {
        return None;
    }
    // group chats append the bot name: "/set_filters@ArbitProBot"
    let command = command.split('@').next().unwrap_or(command);

    match command {
        "/start" => Some(START_TEXT.to_string()),
        "/set_filters" => Some(set_filters(store, chat_id, &parts.collect::<Vec<_>>()).await),
        "/my_settings" => Some(my_settings(store, chat_id).await),
        _ => None,
    }
}

async fn set_filters(store: &FilterStore, chat_id: i64, args: &[&str]) -> String {
    let &[name, buy, sell] = args else {
        return USAGE_TEXT.to_string();
    };

    let Ok(exchange) = name.parse::<ExchangeId>() else {
        return EXCHANGES_TEXT.to_string();
    };

    let (Ok(buy_rate), Ok(sell_rate)) = (buy.parse::<f64>(), sell.parse::<f64>()) else {
        return FORMAT_TEXT.to_string();
    };

    store
        .set(
            chat_id,
            Filter {
                exchange,
                buy_rate,
                sell_rate,
                max_volume: config::MAX_VOLUME,
            },
        )
        .await;

    format!(
        "Фильтр: {exchange}, buy≤{buy_rate}, sell≥{sell_rate}, max ${}",
        config::MAX_VOLUME
    )
}

async fn my_settings(store: &FilterStore, chat_id: i64) -> String {
    match store.get(chat_id).await {
        Some(f) => format!(
            "Биржа: {}, buy≤{}, sell≥{}, max ${}",
            f.exchange, f.buy_rate, f.sell_rate, f.max_volume
        ),
        None => NOT_SET_TEXT.to_string(),
    }
}
