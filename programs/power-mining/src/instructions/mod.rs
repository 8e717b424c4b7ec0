pub mod initialise_configs;
pub use initialise_configs::*;

pub mod update_configs;
pub use update_configs::*;

pub mod lp_token;
pub use lp_token::*;

pub mod open_account;
pub use open_account::*;

pub mod stake_lp;
pub use stake_lp::*;

pub mod unstake_lp;
pub use unstake_lp::*;

pub mod claim;
pub use claim::*;

pub mod power_token_stake;
pub use power_token_stake::*;

pub mod cooldown;
pub use cooldown::*;

pub mod delegation;
pub use delegation::*;

pub mod update_indicators;
pub use update_indicators::*;

pub mod views;
pub use views::*;
