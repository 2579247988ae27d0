pub mod config;
pub mod logger;
pub mod scanner;
pub mod store;
pub mod telegram;

use std::sync::Once;

static INIT: Once = Once::new();

/// Load environment variables from a .env file, once per process.
fn init() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
    });
}

// Automatically initialize when the library is loaded
#[ctor::ctor]
fn setup() {
    init();
}
