pub mod events;
pub use events::*;

pub mod global_config;
pub use global_config::*;

pub mod power_token;
pub use power_token::*;

pub mod power_token_account;
pub use power_token_account::*;

pub mod liquidity_mining;
pub use liquidity_mining::*;

pub mod global_indicators;
pub use global_indicators::*;

pub mod account_indicators;
pub use account_indicators::*;
