pub mod clock;
pub use clock::*;

pub mod math;
pub use math::*;

pub mod token;
pub use token::*;
