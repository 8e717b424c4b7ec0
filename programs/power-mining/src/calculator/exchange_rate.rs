//! Conversions between Power Token balances and the base shares that back them.
//!
//! Holders own base shares. The exchange rate tells how many staked tokens
//! (18 decimals) each base share is worth, so anything that grows the vault
//! without minting shares accrues to every holder at once.

use crate::utils::math::{mul_div_floor, CheckedU256, D18, U256};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExchangeRateCalculator;

impl ExchangeRateCalculator {
    /// Staked tokens per base share, 1e18 while no share exists.
    pub fn exchange_rate(backing_balance: u128, total_supply_base: u128) -> Option<u128> {
        if total_supply_base == 0 {
            return Some(D18);
        }
        mul_div_floor(backing_balance, D18, total_supply_base)
    }

    /// Base shares minted for `amount`, rounded down.
    pub fn to_base(amount: u128, exchange_rate: u128) -> Option<u128> {
        mul_div_floor(amount, D18, exchange_rate)
    }

    /// Base shares burned for `amount`, rounded up so the leaver never takes
    /// more than its shares are worth.
    pub fn to_base_ceil(amount: u128, exchange_rate: u128) -> Option<u128> {
        if exchange_rate == 0 {
            return None;
        }
        let numerator = U256::from(amount).checked_mul(U256::from(D18))?;
        let rate = U256::from(exchange_rate);
        let (quotient, remainder) = numerator.div_mod(rate);
        let quotient = if remainder.is_zero() {
            quotient
        } else {
            quotient.checked_add(U256::one())?
        };
        quotient.to_u128_checked()
    }

    /// Power Token balance represented by `base` shares.
    pub fn from_base(base: u128, exchange_rate: u128) -> Option<u128> {
        mul_div_floor(base, exchange_rate, D18)
    }

    /// Fee retained by the vault on an unstake that skips the cooldown.
    pub fn fee(amount: u128, fee_rate: u128) -> Option<u128> {
        mul_div_floor(amount, fee_rate, D18)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_vault_bootstraps_at_par() {
        assert_eq!(ExchangeRateCalculator::exchange_rate(0, 0), Some(D18));
        assert_eq!(ExchangeRateCalculator::exchange_rate(5 * D18, 0), Some(D18));
        assert_eq!(ExchangeRateCalculator::to_base(7 * D18, D18), Some(7 * D18));
    }

    #[test]
    fn half_fee_on_full_unstake() {
        let fee = ExchangeRateCalculator::fee(D18, D18 / 2).unwrap();
        assert_eq!(fee, D18 / 2);
        assert_eq!(D18 - fee, D18 / 2);
    }

    #[test]
    fn burn_rounds_up_and_mint_rounds_down() {
        let rate = 3 * D18 / 2;
        assert_eq!(ExchangeRateCalculator::to_base(1, rate), Some(0));
        assert_eq!(ExchangeRateCalculator::to_base_ceil(1, rate), Some(1));
        assert_eq!(ExchangeRateCalculator::to_base_ceil(3, rate), Some(2));
        assert_eq!(ExchangeRateCalculator::to_base_ceil(1, 0), None);
    }

    proptest! {
        #[test]
        fn rate_never_drops_for_remaining_holders(
            backing in D18..1_000_000_000 * D18,
            supply in D18..1_000_000_000 * D18,
            stake in 1u128..1_000_000 * D18,
            unstake_share in 0u128..=100,
        ) {
            let rate = ExchangeRateCalculator::exchange_rate(backing, supply).unwrap();
            prop_assume!(rate > 0);

            let minted = ExchangeRateCalculator::to_base(stake, rate).unwrap();
            let backing = backing + stake;
            let supply = supply + minted;
            let after_stake = ExchangeRateCalculator::exchange_rate(backing, supply).unwrap();
            prop_assert!(after_stake >= rate);

            let balance = ExchangeRateCalculator::from_base(minted, after_stake).unwrap();
            let amount = balance * unstake_share / 100;
            let burned = ExchangeRateCalculator::to_base_ceil(amount, after_stake).unwrap();
            prop_assert!(burned <= minted);
            let after_unstake =
                ExchangeRateCalculator::exchange_rate(backing - amount, supply - burned).unwrap();
            prop_assert!(after_unstake >= after_stake || supply == burned);
        }
    }
}
