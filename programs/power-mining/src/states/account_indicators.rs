use crate::calculator::{MiningCalculator, PowerUpCalculator};
use crate::error::ErrorCode;
use crate::states::GlobalIndicators;
use crate::utils::math::WideU256;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// AccountIndicators Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive a position (+ lp mint + owner).
pub const ACCOUNT_INDICATORS_SEED: &str = "account_indicators";

/// One owner's position in one LP pool.
///
/// Rewards are settled lazily: whenever the position is touched, everything
/// earned since the last snapshot is added to `rewards`, the power-up is
/// recomputed from the new balances and the pool total is adjusted.
#[account]
#[derive(Default, Debug)]
pub struct AccountIndicators {
    /// PDA bump for this account.
    pub bump: u8,

    pub owner: Pubkey,

    pub lp_mint: Pubkey,

    /// Reward weight of the position.
    pub power_up: u128,

    /// Pool cumulative multiplier at the last settlement.
    pub composite_multiplier_cumulative_prev_block: WideU256,

    /// Staked LP tokens (18 decimals).
    pub lp_token_balance: u128,

    /// Power Tokens delegated to this position.
    pub delegated_pw_token_balance: u128,

    /// Settled rewards not yet claimed.
    pub rewards: u128,
}

impl AccountIndicators {
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 2: two Pubkeys
    /// - 16 * 4: four u128 fields
    /// - 32: wide snapshot
    pub const LEN: usize = 8 + 1 + 32 * 2 + 16 * 4 + WideU256::LEN;

    /// Fills the identity of a freshly created position; no-op afterwards.
    pub fn open(&mut self, bump: u8, owner: Pubkey, lp_mint: Pubkey) {
        if self.owner == Pubkey::default() {
            self.bump = bump;
            self.owner = owner;
            self.lp_mint = lp_mint;
        }
    }

    /// The position must belong to `owner` in the pool of `lp_mint`.
    pub fn require_position(&self, owner: &Pubkey, lp_mint: &Pubkey) -> Result<()> {
        require!(
            self.owner == *owner && self.lp_mint == *lp_mint,
            ErrorCode::AssetMismatch
        );
        Ok(())
    }

    /// Rewards earned since the last settlement against `global`.
    fn unsettled_rewards(&self, global: &GlobalIndicators) -> Result<u128> {
        MiningCalculator::account_rewards(
            self.power_up,
            self.composite_multiplier_cumulative_prev_block.as_u256(),
            global.composite_multiplier_cumulative(),
        )
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Settled plus unsettled rewards, given an already rebalanced pool.
    pub fn pending_rewards(&self, global: &GlobalIndicators) -> Result<u128> {
        self.rewards
            .checked_add(self.unsettled_rewards(global)?)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Rebalances the pool to `block_number`, settles this position and
    /// applies the new balances.
    pub fn rebalance(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        lp_token_balance: u128,
        delegated_pw_token_balance: u128,
    ) -> Result<()> {
        global.rebalance(block_number)?;

        self.rewards = self.pending_rewards(global)?;

        let previous_power_up = self.power_up;
        self.lp_token_balance = lp_token_balance;
        self.delegated_pw_token_balance = delegated_pw_token_balance;
        self.power_up = PowerUpCalculator::power_up(lp_token_balance, delegated_pw_token_balance)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.composite_multiplier_cumulative_prev_block =
            global.composite_multiplier_cumulative_prev_block;

        global.update_aggregated_power_up(previous_power_up, self.power_up)
    }

    /// Settles without changing balances.
    pub fn settle(&mut self, global: &mut GlobalIndicators, block_number: u64) -> Result<()> {
        self.rebalance(
            global,
            block_number,
            self.lp_token_balance,
            self.delegated_pw_token_balance,
        )
    }

    pub fn stake_lp(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        let lp_token_balance = self
            .lp_token_balance
            .checked_add(amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.rebalance(
            global,
            block_number,
            lp_token_balance,
            self.delegated_pw_token_balance,
        )
    }

    pub fn unstake_lp(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        let lp_token_balance = self
            .lp_token_balance
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::InsufficientLpTokenBalance))?;
        self.rebalance(
            global,
            block_number,
            lp_token_balance,
            self.delegated_pw_token_balance,
        )
    }

    pub fn delegate(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        let delegated = self
            .delegated_pw_token_balance
            .checked_add(amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.rebalance(global, block_number, self.lp_token_balance, delegated)
    }

    pub fn undelegate(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        let delegated = self
            .delegated_pw_token_balance
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::InsufficientDelegatedBalance))?;
        self.rebalance(global, block_number, self.lp_token_balance, delegated)
    }

    /// One entry of a delegate batch. Entries naming the same pool land on
    /// the same position and accumulate.
    pub fn delegate_entry(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        global.require_supported()?;
        self.delegate(global, block_number, amount)
    }

    /// One entry of an undelegate batch; removed pools are allowed.
    pub fn undelegate_entry(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        amount: u128,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        self.undelegate(global, block_number, amount)
    }

    /// Adds delegated Power Tokens and staked LP tokens (18 decimals) with a
    /// single rebalance. Either amount may be zero, not both.
    pub fn delegate_and_stake(
        &mut self,
        global: &mut GlobalIndicators,
        block_number: u64,
        pw_token_amount: u128,
        lp_token_amount: u128,
    ) -> Result<()> {
        require!(
            pw_token_amount > 0 || lp_token_amount > 0,
            ErrorCode::ZeroAmount
        );
        global.require_supported()?;
        let lp_token_balance = self
            .lp_token_balance
            .checked_add(lp_token_amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        let delegated_pw_token_balance = self
            .delegated_pw_token_balance
            .checked_add(pw_token_amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.rebalance(
            global,
            block_number,
            lp_token_balance,
            delegated_pw_token_balance,
        )
    }

    /// Removes `amount` from the settled rewards once it left the reward vault.
    pub fn take_rewards(&mut self, amount: u128) -> Result<()> {
        self.rewards = self
            .rewards
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::{claimable_token_units, D18};

    const ONE_TOKEN_PER_BLOCK: u64 = 100_000_000;

    fn pool() -> GlobalIndicators {
        GlobalIndicators {
            supported: true,
            rewards_per_block: ONE_TOKEN_PER_BLOCK,
            last_rebalance_block_number: 1,
            ..Default::default()
        }
    }

    #[test]
    fn boosted_single_staker_earns_full_emission() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 1, 100 * D18).unwrap();
        alice.delegate(&mut pool, 1, 100 * D18).unwrap();
        assert_eq!(alice.power_up, 200 * D18);
        assert_eq!(pool.aggregated_power_up, 200 * D18);

        alice.settle(&mut pool, 102).unwrap();
        assert_eq!(alice.rewards, 101 * D18);
        assert_eq!(pool.accrued_rewards, 101 * D18);
    }

    #[test]
    fn same_block_round_trip_earns_nothing() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 10, D18).unwrap();
        alice.unstake_lp(&mut pool, 10, D18).unwrap();
        assert_eq!(alice.rewards, 0);
        assert_eq!(alice.power_up, 0);
        assert_eq!(pool.aggregated_power_up, 0);
        assert_eq!(pool.accrued_rewards, 0);
    }

    #[test]
    fn empty_blocks_are_forfeited() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 10, D18).unwrap();
        alice.unstake_lp(&mut pool, 20, D18).unwrap();
        assert_eq!(alice.rewards, 10 * D18);

        // nobody staked between block 20 and 50
        alice.stake_lp(&mut pool, 50, D18).unwrap();
        alice.settle(&mut pool, 55).unwrap();
        assert_eq!(alice.rewards, 15 * D18);
        assert_eq!(pool.accrued_rewards, 15 * D18);
    }

    #[test]
    fn same_block_settlement_order_does_not_matter() {
        let run = |alice_first: bool| {
            let mut pool = pool();
            let mut alice = AccountIndicators::default();
            let mut bob = AccountIndicators::default();
            alice.stake_lp(&mut pool, 1, 3 * D18).unwrap();
            bob.stake_lp(&mut pool, 1, 7 * D18).unwrap();
            if alice_first {
                alice.unstake_lp(&mut pool, 40, D18).unwrap();
                bob.stake_lp(&mut pool, 40, D18).unwrap();
            } else {
                bob.stake_lp(&mut pool, 40, D18).unwrap();
                alice.unstake_lp(&mut pool, 40, D18).unwrap();
            }
            alice.settle(&mut pool, 80).unwrap();
            bob.settle(&mut pool, 80).unwrap();
            (alice.rewards, bob.rewards)
        };
        let (alice_a, bob_a) = run(true);
        let (alice_b, bob_b) = run(false);
        assert!(alice_a.abs_diff(alice_b) <= 10);
        assert!(bob_a.abs_diff(bob_b) <= 10);
    }

    #[test]
    fn shares_follow_power_up() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        let mut bob = AccountIndicators::default();
        alice.stake_lp(&mut pool, 1, D18).unwrap();
        bob.stake_lp(&mut pool, 1, 3 * D18).unwrap();
        alice.settle(&mut pool, 5).unwrap();
        bob.settle(&mut pool, 5).unwrap();
        assert_eq!(alice.rewards, D18);
        assert_eq!(bob.rewards, 3 * D18);
        assert!(alice.rewards + bob.rewards <= pool.accrued_rewards);
    }

    #[test]
    fn removed_pool_keeps_positions_but_stops_paying() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 1, D18).unwrap();
        pool.deactivate(11).unwrap();

        alice.settle(&mut pool, 1_000).unwrap();
        assert_eq!(alice.rewards, 10 * D18);
        alice.unstake_lp(&mut pool, 1_001, D18).unwrap();
        assert_eq!(alice.rewards, 10 * D18);
        assert_eq!(pool.aggregated_power_up, 0);
    }

    #[test]
    fn delegate_and_stake_rebalances_once() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 1, D18).unwrap();

        alice.delegate_and_stake(&mut pool, 11, D18, D18).unwrap();
        assert_eq!(alice.rewards, 10 * D18);
        assert_eq!(alice.lp_token_balance, 2 * D18);
        assert_eq!(alice.delegated_pw_token_balance, D18);
        assert_eq!(pool.aggregated_power_up, alice.power_up);

        assert_eq!(
            alice.delegate_and_stake(&mut pool, 12, 0, 0).unwrap_err(),
            error!(ErrorCode::ZeroAmount)
        );
        pool.deactivate(12).unwrap();
        assert_eq!(
            alice.delegate_and_stake(&mut pool, 13, D18, 0).unwrap_err(),
            error!(ErrorCode::LpTokenNotSupported)
        );
    }

    #[test]
    fn removed_pool_accepts_undelegations_only() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.delegate_entry(&mut pool, 1, D18).unwrap();
        pool.deactivate(2).unwrap();

        assert_eq!(
            alice.delegate_entry(&mut pool, 3, D18).unwrap_err(),
            error!(ErrorCode::LpTokenNotSupported)
        );
        assert_eq!(
            alice.undelegate_entry(&mut pool, 3, 0).unwrap_err(),
            error!(ErrorCode::ZeroAmount)
        );
        alice.undelegate_entry(&mut pool, 3, D18).unwrap();
        assert_eq!(alice.delegated_pw_token_balance, 0);
    }

    #[test]
    fn sub_unit_rewards_stay_pending() {
        // 9 decimals: one token unit is 1e9 internally
        let mut alice = AccountIndicators {
            rewards: 3_000_000_007,
            ..Default::default()
        };

        let (token_amount, settled) = claimable_token_units(alice.rewards, 9).unwrap();
        assert_eq!(token_amount, 3);
        alice.take_rewards(settled).unwrap();
        assert_eq!(alice.rewards, 7);

        assert_eq!(
            claimable_token_units(alice.rewards, 9).unwrap_err(),
            error!(ErrorCode::NothingToClaim)
        );
        assert_eq!(alice.rewards, 7);
    }

    #[test]
    fn unstaking_above_balance_fails() {
        let mut pool = pool();
        let mut alice = AccountIndicators::default();
        alice.stake_lp(&mut pool, 1, D18).unwrap();
        assert_eq!(
            alice.unstake_lp(&mut pool, 2, D18 + 1).unwrap_err(),
            error!(ErrorCode::InsufficientLpTokenBalance)
        );
        assert_eq!(
            alice.undelegate(&mut pool, 2, 1).unwrap_err(),
            error!(ErrorCode::InsufficientDelegatedBalance)
        );
    }
}
