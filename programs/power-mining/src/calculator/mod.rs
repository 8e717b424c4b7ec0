pub mod exchange_rate;
pub use exchange_rate::*;

pub mod mining;
pub use mining::*;

pub mod power_up;
pub use power_up::*;
