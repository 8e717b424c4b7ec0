use crate::calculator::MiningCalculator;
use crate::error::ErrorCode;
use crate::utils::math::{WideU256, U256};
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// GlobalIndicators Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the indicators of an LP pool (+ lp mint).
pub const GLOBAL_INDICATORS_SEED: &str = "global_indicators";

/// Whether a pool currently emits rewards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolActivity {
    Active,
    /// Nothing is emitted: either the rate is zero or nobody is staking.
    /// Blocks spent here are forfeited.
    Inactive,
}

/// Reward state of one LP pool.
///
/// Every mutating instruction on the pool first calls `rebalance` with the
/// current slot, bringing `composite_multiplier_cumulative_prev_block` and
/// `accrued_rewards` up to date before any balance changes.
#[account]
#[derive(Default, Debug)]
pub struct GlobalIndicators {
    /// PDA bump for this account.
    pub bump: u8,

    /// LP mint of the pool.
    pub lp_mint: Pubkey,

    /// Program-owned vault holding the staked LP tokens.
    pub lp_vault: Pubkey,

    /// Decimals of `lp_mint`.
    pub lp_decimals: u8,

    /// `false` once the pool was removed: no new stakes, no new emission.
    pub supported: bool,

    /// Sum of the power-up of every position in the pool.
    pub aggregated_power_up: u128,

    /// Multiplier added per block at the current rate and power-up.
    pub composite_multiplier_in_the_block: WideU256,

    /// Running integral of the per-block multiplier.
    pub composite_multiplier_cumulative_prev_block: WideU256,

    pub last_rebalance_block_number: u64,

    /// Emission rate with 8 decimals (1e8 = one token per block).
    pub rewards_per_block: u64,

    /// Rewards emitted to stakers since inception (18 decimals).
    pub accrued_rewards: u128,
}

impl GlobalIndicators {
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 2: two Pubkeys
    /// - 1 + 1: decimals, supported flag
    /// - 16 * 2: two u128 fields
    /// - 32 * 2: two wide multipliers
    /// - 8 * 2: two u64 fields
    pub const LEN: usize = 8 + 1 + 32 * 2 + 1 + 1 + 16 * 2 + WideU256::LEN * 2 + 8 * 2;

    pub fn activity(&self) -> PoolActivity {
        if self.rewards_per_block == 0 || self.aggregated_power_up == 0 {
            PoolActivity::Inactive
        } else {
            PoolActivity::Active
        }
    }

    pub fn composite_multiplier_cumulative(&self) -> U256 {
        self.composite_multiplier_cumulative_prev_block.as_u256()
    }

    /// Accrues every block since the last rebalance. Blocks without any
    /// power-up in the pool accrue nothing.
    pub fn rebalance(&mut self, block_number: u64) -> Result<()> {
        require!(
            block_number >= self.last_rebalance_block_number,
            ErrorCode::BlockNumberRegressed
        );
        if self.aggregated_power_up > 0 && block_number > self.last_rebalance_block_number {
            let delta = MiningCalculator::composite_multiplier_delta(
                self.last_rebalance_block_number,
                block_number,
                self.rewards_per_block,
                self.aggregated_power_up,
            )
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
            let cumulative = self
                .composite_multiplier_cumulative()
                .checked_add(delta)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
            self.composite_multiplier_cumulative_prev_block = cumulative.into();

            let accrued = MiningCalculator::accrued_rewards(
                block_number - self.last_rebalance_block_number,
                self.rewards_per_block,
            )
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
            self.accrued_rewards = self
                .accrued_rewards
                .checked_add(accrued)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        }
        self.last_rebalance_block_number = block_number;
        Ok(())
    }

    /// Copy of the indicators rebalanced to `block_number`, for views.
    pub fn rebalanced(&self, block_number: u64) -> Result<Self> {
        let mut simulated = self.clone();
        simulated.rebalance(block_number)?;
        Ok(simulated)
    }

    fn refresh_composite_multiplier(&mut self) -> Result<()> {
        self.composite_multiplier_in_the_block =
            MiningCalculator::composite_multiplier(self.rewards_per_block, self.aggregated_power_up)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))?
                .into();
        Ok(())
    }

    /// Swaps a position's previous power-up for its new one.
    pub fn update_aggregated_power_up(&mut self, previous: u128, current: u128) -> Result<()> {
        self.aggregated_power_up =
            MiningCalculator::aggregated_power_up(self.aggregated_power_up, previous, current)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.refresh_composite_multiplier()
    }

    /// Settles the pool at the old rate, then applies the new one from
    /// `block_number` on.
    pub fn set_rewards_per_block(&mut self, block_number: u64, rewards_per_block: u64) -> Result<()> {
        self.rebalance(block_number)?;
        self.rewards_per_block = rewards_per_block;
        self.refresh_composite_multiplier()
    }

    /// Freezes a removed pool: accrual stops at `block_number`, positions remain.
    pub fn deactivate(&mut self, block_number: u64) -> Result<()> {
        self.set_rewards_per_block(block_number, 0)?;
        self.supported = false;
        Ok(())
    }

    pub fn require_supported(&self) -> Result<()> {
        require!(self.supported, ErrorCode::LpTokenNotSupported);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::D18;

    fn pool(rewards_per_block: u64) -> GlobalIndicators {
        GlobalIndicators {
            supported: true,
            rewards_per_block,
            last_rebalance_block_number: 100,
            ..Default::default()
        }
    }

    #[test]
    fn empty_pool_forfeits_blocks() {
        let mut pool = pool(100_000_000);
        pool.rebalance(150).unwrap();
        assert_eq!(pool.accrued_rewards, 0);
        assert_eq!(pool.composite_multiplier_cumulative(), U256::zero());
        assert_eq!(pool.last_rebalance_block_number, 150);
        assert_eq!(pool.activity(), PoolActivity::Inactive);
    }

    #[test]
    fn rejects_block_regression() {
        let mut pool = pool(1);
        assert_eq!(
            pool.rebalance(99).unwrap_err(),
            error!(ErrorCode::BlockNumberRegressed)
        );
        pool.rebalance(100).unwrap();
    }

    #[test]
    fn accrues_per_block_while_staked() {
        let mut pool = pool(100_000_000);
        pool.update_aggregated_power_up(0, 10 * D18).unwrap();
        assert_eq!(pool.activity(), PoolActivity::Active);
        assert_eq!(
            pool.composite_multiplier_in_the_block.as_u256(),
            U256::from(D18) * U256::from(D18) / U256::from(10u64)
        );

        pool.rebalance(110).unwrap();
        assert_eq!(pool.accrued_rewards, 10 * D18);
        pool.rebalance(110).unwrap();
        assert_eq!(pool.accrued_rewards, 10 * D18);
    }

    #[test]
    fn rate_change_applies_forward_only() {
        let mut pool = pool(100_000_000);
        pool.update_aggregated_power_up(0, D18).unwrap();
        pool.set_rewards_per_block(110, 300_000_000).unwrap();
        assert_eq!(pool.accrued_rewards, 10 * D18);
        pool.rebalance(120).unwrap();
        assert_eq!(pool.accrued_rewards, 40 * D18);
    }

    #[test]
    fn deactivated_pool_stops_accruing() {
        let mut pool = pool(100_000_000);
        pool.update_aggregated_power_up(0, D18).unwrap();
        pool.deactivate(105).unwrap();
        assert!(!pool.supported);
        assert_eq!(pool.accrued_rewards, 5 * D18);
        assert_eq!(pool.composite_multiplier_in_the_block.as_u256(), U256::zero());

        let frozen = pool.composite_multiplier_cumulative();
        pool.rebalance(500).unwrap();
        assert_eq!(pool.accrued_rewards, 5 * D18);
        assert_eq!(pool.composite_multiplier_cumulative(), frozen);
        assert!(pool.require_supported().is_err());
    }

    #[test]
    fn simulation_leaves_state_untouched() {
        let mut pool = pool(100_000_000);
        pool.update_aggregated_power_up(0, D18).unwrap();
        let simulated = pool.rebalanced(130).unwrap();
        assert_eq!(simulated.accrued_rewards, 30 * D18);
        assert_eq!(pool.accrued_rewards, 0);
        assert_eq!(pool.last_rebalance_block_number, 100);
    }
}
