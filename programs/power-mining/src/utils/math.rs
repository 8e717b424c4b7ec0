//! Fixed-point helpers shared by the calculators and the instruction handlers.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

// Expanded apart from the anchor prelude, whose `Result` alias shadows the
// two-argument one the macro expects.
mod wide {
    uint::construct_uint! {
        pub struct U256(4);
    }
}
pub use wide::U256;

/// Scale of every internal amount (18 decimals).
pub const D18: u128 = 1_000_000_000_000_000_000;

/// Internal amounts are always carried with this many decimals.
pub const INTERNAL_DECIMALS: u8 = 18;

/// 256-bit value laid out as four little-endian `u64` limbs so that it can
/// live inside an account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WideU256(pub [u64; 4]);

impl WideU256 {
    pub const LEN: usize = 8 * 4;

    pub fn as_u256(&self) -> U256 {
        U256(self.0)
    }
}

impl From<U256> for WideU256 {
    fn from(value: U256) -> Self {
        WideU256(value.0)
    }
}

impl From<WideU256> for U256 {
    fn from(value: WideU256) -> Self {
        U256(value.0)
    }
}

pub trait CheckedU256 {
    fn to_u128_checked(self) -> Option<u128>;
}

impl CheckedU256 for U256 {
    fn to_u128_checked(self) -> Option<u128> {
        if self > U256::from(u128::MAX) {
            None
        } else {
            Some(self.as_u128())
        }
    }
}

/// `a * b / denominator` computed in 256 bits, truncating toward zero.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    (U256::from(a) * U256::from(b) / U256::from(denominator)).to_u128_checked()
}

fn decimals_factor(decimals: u8) -> Result<u128> {
    require!(decimals <= INTERNAL_DECIMALS, ErrorCode::InvalidDecimals);
    10u128
        .checked_pow(u32::from(INTERNAL_DECIMALS - decimals))
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Lifts a token amount expressed in `decimals` to the 18-decimal internal scale.
pub fn to_internal_amount(amount: u64, decimals: u8) -> Result<u128> {
    u128::from(amount)
        .checked_mul(decimals_factor(decimals)?)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Brings an internal amount back to token units, dropping the sub-unit remainder.
pub fn to_token_amount(amount: u128, decimals: u8) -> Result<u64> {
    let token_amount = amount / decimals_factor(decimals)?;
    u64::try_from(token_amount).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Whole token units of a reward amount, as `(token_amount, internal_amount)`.
/// The sub-unit remainder is left out and stays with the caller.
pub fn claimable_token_units(amount: u128, decimals: u8) -> Result<(u64, u128)> {
    let token_amount = to_token_amount(amount, decimals)?;
    require!(token_amount > 0, ErrorCode::NothingToClaim);
    Ok((token_amount, to_internal_amount(token_amount, decimals)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_between_token_and_internal_scale() {
        assert_eq!(to_internal_amount(1_500_000, 6).unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(to_internal_amount(7, 18).unwrap(), 7);
        assert_eq!(to_token_amount(1_500_000_000_000_000_001, 6).unwrap(), 1_500_000);
        assert_eq!(to_token_amount(999_999_999_999, 6).unwrap(), 0);
        assert!(to_internal_amount(1, 19).is_err());
    }

    #[test]
    fn wide_value_survives_storage_layout() {
        let value = U256::from(u128::MAX) * U256::from(1_000u64) + U256::from(7u64);
        let stored = WideU256::from(value);
        assert_eq!(stored.as_u256(), value);
        assert_eq!(U256::from(stored), value);
    }

    #[test]
    fn mul_div_floor_truncates() {
        assert_eq!(mul_div_floor(10, 10, 3), Some(33));
        assert_eq!(mul_div_floor(u128::MAX, 2, 2), Some(u128::MAX));
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), None);
        assert_eq!(mul_div_floor(1, 1, 0), None);
    }
}
