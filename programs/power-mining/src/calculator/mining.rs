//! Block-driven reward accounting for a single LP pool.
//!
//! Rewards are emitted at `rewards_per_block` and shared between stakers in
//! proportion to their power-up. Instead of iterating over accounts every
//! block, the pool keeps a cumulative "composite multiplier": the integral
//! over blocks of `rewards_in_block / aggregated_power_up`. An account earns
//! `power_up * (cumulative_now - cumulative_at_last_touch)`.
//!
//! All divisions truncate toward zero, so the sum of account rewards never
//! exceeds what the pool accrued.

use crate::utils::math::{CheckedU256, U256};

/// `rewards_per_block` carries 8 decimals; rewards are accounted with 18.
pub const REWARDS_PER_BLOCK_SCALE: u128 = 10_000_000_000;

/// Scale of the composite multiplier (1e18 ratio composed with another 1e18).
pub const COMPOSITE_MULTIPLIER_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MiningCalculator;

impl MiningCalculator {
    /// Reward units (18 decimals) emitted by the pool in one block.
    pub fn rewards_in_block(rewards_per_block: u64) -> u128 {
        u128::from(rewards_per_block) * REWARDS_PER_BLOCK_SCALE
    }

    /// Rewards emitted over `blocks_elapsed` blocks.
    pub fn accrued_rewards(blocks_elapsed: u64, rewards_per_block: u64) -> Option<u128> {
        Self::rewards_in_block(rewards_per_block).checked_mul(u128::from(blocks_elapsed))
    }

    /// Multiplier contributed by a single block, zero while nobody is staking.
    pub fn composite_multiplier(rewards_per_block: u64, aggregated_power_up: u128) -> Option<U256> {
        if aggregated_power_up == 0 {
            return Some(U256::zero());
        }
        U256::from(Self::rewards_in_block(rewards_per_block))
            .checked_mul(U256::from(COMPOSITE_MULTIPLIER_SCALE))?
            .checked_div(U256::from(aggregated_power_up))
    }

    /// Growth of the cumulative multiplier between two rebalances.
    pub fn composite_multiplier_delta(
        last_rebalance_block_number: u64,
        block_number: u64,
        rewards_per_block: u64,
        aggregated_power_up: u128,
    ) -> Option<U256> {
        let blocks_elapsed = block_number.checked_sub(last_rebalance_block_number)?;
        Self::composite_multiplier(rewards_per_block, aggregated_power_up)?
            .checked_mul(U256::from(blocks_elapsed))
    }

    /// Rewards earned by an account holding `power_up` while the cumulative
    /// multiplier moved from `account_cumulative` to `global_cumulative`.
    pub fn account_rewards(
        power_up: u128,
        account_cumulative: U256,
        global_cumulative: U256,
    ) -> Option<u128> {
        let delta = global_cumulative.checked_sub(account_cumulative)?;
        U256::from(power_up)
            .checked_mul(delta)?
            .checked_div(U256::from(COMPOSITE_MULTIPLIER_SCALE))?
            .to_u128_checked()
    }

    /// Replaces an account's previous power-up with the new one in the pool total.
    pub fn aggregated_power_up(
        previous_aggregated_power_up: u128,
        previous_power_up: u128,
        power_up: u128,
    ) -> Option<u128> {
        previous_aggregated_power_up
            .checked_sub(previous_power_up)?
            .checked_add(power_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::D18;
    use proptest::prelude::*;

    #[test]
    fn one_token_rate_emits_one_token_per_block() {
        assert_eq!(MiningCalculator::rewards_in_block(100_000_000), D18);
        assert_eq!(MiningCalculator::accrued_rewards(101, 100_000_000), Some(101 * D18));
        assert_eq!(MiningCalculator::accrued_rewards(0, 100_000_000), Some(0));
    }

    #[test]
    fn no_multiplier_without_stakers() {
        assert_eq!(MiningCalculator::composite_multiplier(100_000_000, 0), Some(U256::zero()));
        assert_eq!(
            MiningCalculator::composite_multiplier_delta(10, 500, 100_000_000, 0),
            Some(U256::zero())
        );
    }

    #[test]
    fn multiplier_delta_requires_forward_blocks() {
        assert_eq!(MiningCalculator::composite_multiplier_delta(10, 9, 1, D18), None);
        assert_eq!(
            MiningCalculator::composite_multiplier_delta(10, 10, 100_000_000, D18),
            Some(U256::zero())
        );
    }

    #[test]
    fn single_staker_receives_the_whole_emission() {
        let power_up = 200 * D18;
        let delta =
            MiningCalculator::composite_multiplier_delta(1, 102, 100_000_000, power_up).unwrap();
        let rewards = MiningCalculator::account_rewards(power_up, U256::zero(), delta).unwrap();
        assert_eq!(rewards, 101 * D18);
    }

    #[test]
    fn account_rewards_reject_snapshot_ahead_of_pool() {
        assert_eq!(
            MiningCalculator::account_rewards(D18, U256::from(2u64), U256::from(1u64)),
            None
        );
    }

    #[test]
    fn aggregated_power_up_swaps_contribution() {
        assert_eq!(MiningCalculator::aggregated_power_up(300, 100, 250), Some(450));
        assert_eq!(MiningCalculator::aggregated_power_up(300, 300, 0), Some(0));
        assert_eq!(MiningCalculator::aggregated_power_up(100, 300, 0), None);
    }

    proptest! {
        #[test]
        fn shares_never_exceed_emission(
            power_up_a in 1u128..1_000_000 * D18,
            power_up_b in 1u128..1_000_000 * D18,
            rewards_per_block in 1u64..10_000_000_000,
            blocks in 1u64..1_000_000,
        ) {
            let aggregated = power_up_a + power_up_b;
            let delta = MiningCalculator::composite_multiplier_delta(
                0, blocks, rewards_per_block, aggregated,
            ).unwrap();
            let rewards_a = MiningCalculator::account_rewards(power_up_a, U256::zero(), delta).unwrap();
            let rewards_b = MiningCalculator::account_rewards(power_up_b, U256::zero(), delta).unwrap();
            let emitted = MiningCalculator::accrued_rewards(blocks, rewards_per_block).unwrap();
            prop_assert!(rewards_a + rewards_b <= emitted);
            // each share loses < 1 unit to multiplier truncation per block
            // plus < 1 unit to the final division
            prop_assert!(emitted - (rewards_a + rewards_b) <= 2 * (u128::from(blocks) + 1));
        }
    }
}
