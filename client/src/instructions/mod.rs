pub mod config_instructions;
pub mod mining_instructions;
pub mod power_token_instructions;
pub mod rpc;
pub mod utils;
