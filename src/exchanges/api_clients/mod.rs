pub mod binance_client;

pub use binance_client::{BinanceClient, DEFAULT_BASE_URL};
