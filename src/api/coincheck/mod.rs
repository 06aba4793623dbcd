pub mod client;
pub mod models;

pub use client::{CoincheckClient, RateSource};
pub use models::ApiError;
