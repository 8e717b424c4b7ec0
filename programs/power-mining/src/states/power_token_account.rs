use crate::calculator::ExchangeRateCalculator;
use crate::error::ErrorCode;
use crate::states::AccountIndicators;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// PowerTokenAccount
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each holder's Power Token account.
pub const POWER_TOKEN_ACCOUNT_SEED: &str = "power_token_account";

/// Waiting period between `cooldown` and a fee-free `redeem`.
pub const COOLDOWN_SECONDS: i64 = 14 * 24 * 60 * 60;

/// Power Tokens a holder has set aside for a fee-free exit.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    /// Amount in Power Token units (18 decimals).
    pub pw_token_amount: u128,
    /// Unix timestamp from which the amount can be redeemed.
    pub end_timestamp: i64,
}

impl Cooldown {
    pub const LEN: usize = 16 + 8;

    pub fn is_finished(&self, now: i64) -> bool {
        now >= self.end_timestamp
    }
}

/// A holder's position in the Power Token vault.
///
/// The balance is stored as base shares; the Power Token balance is
/// `base_balance * exchange_rate / 1e18`. Part of it can be delegated to
/// liquidity mining or locked in a cooldown, and only the rest is freely
/// transferable out of the vault.
#[account]
#[derive(Default, Debug)]
pub struct PowerTokenAccount {
    /// PDA bump for this account.
    pub bump: u8,

    /// Holder this record belongs to.
    pub owner: Pubkey,

    /// Base shares held.
    pub base_balance: u128,

    /// Power Tokens delegated across all LP pools.
    pub delegated_to_liquidity_mining: u128,

    /// Pending cooldown, `None` when there is none.
    pub cooldown: Option<Cooldown>,

    /// Mining rewards parked on LP unstake, not yet turned into Power Tokens.
    pub allocated_pw_tokens: u128,
}

impl PowerTokenAccount {
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner
    /// - 16 * 3: three u128 fields
    /// - 1 + Cooldown::LEN: optional cooldown
    pub const LEN: usize = 8 + 1 + 32 + 16 * 3 + 1 + Cooldown::LEN;

    /// Fills the identity of a freshly created account; no-op afterwards.
    pub fn open(&mut self, bump: u8, owner: Pubkey) {
        if self.owner == Pubkey::default() {
            self.bump = bump;
            self.owner = owner;
        }
    }

    /// Power Token balance at the given exchange rate.
    pub fn balance(&self, exchange_rate: u128) -> Result<u128> {
        ExchangeRateCalculator::from_base(self.base_balance, exchange_rate)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    pub fn cooldown_amount(&self) -> u128 {
        self.cooldown.map_or(0, |cooldown| cooldown.pw_token_amount)
    }

    /// Balance neither delegated nor cooling down.
    pub fn available_balance(&self, exchange_rate: u128) -> Result<u128> {
        Ok(self
            .balance(exchange_rate)?
            .saturating_sub(self.delegated_to_liquidity_mining)
            .saturating_sub(self.cooldown_amount()))
    }

    /// Sets or overwrites the cooldown. The amount may include what is
    /// already cooling down but never delegated tokens.
    pub fn start_cooldown(&mut self, amount: u128, exchange_rate: u128, now: i64) -> Result<Cooldown> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        let undelegated = self
            .balance(exchange_rate)?
            .saturating_sub(self.delegated_to_liquidity_mining);
        require!(amount <= undelegated, ErrorCode::InsufficientAvailableBalance);
        let cooldown = Cooldown {
            pw_token_amount: amount,
            end_timestamp: now
                .checked_add(COOLDOWN_SECONDS)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))?,
        };
        self.cooldown = Some(cooldown);
        Ok(cooldown)
    }

    pub fn cancel_cooldown(&mut self) -> Result<()> {
        require!(self.cooldown.is_some(), ErrorCode::NoActiveCooldown);
        self.cooldown = None;
        Ok(())
    }

    /// Consumes a matured cooldown, returning the amount it held.
    pub fn take_finished_cooldown(&mut self, now: i64) -> Result<u128> {
        let cooldown = self.cooldown.ok_or_else(|| error!(ErrorCode::NoActiveCooldown))?;
        require!(cooldown.is_finished(now), ErrorCode::CooldownNotFinished);
        self.cooldown = None;
        Ok(cooldown.pw_token_amount)
    }

    /// Draws `amount` out of a matured cooldown when it covers it.
    /// Returns `false` and leaves the cooldown untouched otherwise.
    pub fn draw_from_finished_cooldown(&mut self, amount: u128, now: i64) -> bool {
        match self.cooldown {
            Some(cooldown) if cooldown.is_finished(now) && amount <= cooldown.pw_token_amount => {
                let left = cooldown.pw_token_amount - amount;
                self.cooldown = if left == 0 {
                    None
                } else {
                    Some(Cooldown {
                        pw_token_amount: left,
                        ..cooldown
                    })
                };
                true
            }
            _ => false,
        }
    }

    /// Records a delegation of `amount` in total across pools.
    pub fn delegate(&mut self, amount: u128, exchange_rate: u128) -> Result<()> {
        require!(
            amount <= self.available_balance(exchange_rate)?,
            ErrorCode::InsufficientDelegatableBalance
        );
        self.delegated_to_liquidity_mining = self
            .delegated_to_liquidity_mining
            .checked_add(amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(())
    }

    pub fn undelegate(&mut self, amount: u128) -> Result<()> {
        self.delegated_to_liquidity_mining = self
            .delegated_to_liquidity_mining
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::InsufficientDelegatedBalance))?;
        Ok(())
    }

    /// Moves every settled reward of `position` into the allocated bucket.
    /// Returns the amount moved.
    pub fn allocate_rewards(&mut self, position: &mut AccountIndicators) -> Result<u128> {
        let allocated = position.rewards;
        position.take_rewards(allocated)?;
        self.allocated_pw_tokens = self
            .allocated_pw_tokens
            .checked_add(allocated)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(allocated)
    }

    /// Removes what `claim_allocated_pw_tokens` settled; the sub-unit
    /// remainder stays allocated.
    pub fn take_allocated(&mut self, amount: u128) -> Result<()> {
        self.allocated_pw_tokens = self
            .allocated_pw_tokens
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::D18;

    const NOW: i64 = 1_700_000_000;

    fn holder(base_balance: u128) -> PowerTokenAccount {
        PowerTokenAccount {
            owner: Pubkey::new_unique(),
            base_balance,
            ..Default::default()
        }
    }

    #[test]
    fn cooldown_matures_after_fourteen_days() {
        let mut account = holder(D18);
        account.start_cooldown(D18 / 2, D18, NOW).unwrap();

        assert_eq!(
            account.take_finished_cooldown(NOW + COOLDOWN_SECONDS - 1).unwrap_err(),
            error!(ErrorCode::CooldownNotFinished)
        );
        assert_eq!(account.cooldown_amount(), D18 / 2);

        assert_eq!(account.take_finished_cooldown(NOW + COOLDOWN_SECONDS + 1).unwrap(), D18 / 2);
        assert_eq!(account.cooldown, None);
    }

    #[test]
    fn cooldown_is_overwritten_and_cancelled() {
        let mut account = holder(D18);
        account.start_cooldown(D18 / 4, D18, NOW).unwrap();
        let second = account.start_cooldown(D18, D18, NOW + 10).unwrap();
        assert_eq!(account.cooldown, Some(second));
        assert_eq!(second.end_timestamp, NOW + 10 + COOLDOWN_SECONDS);

        account.cancel_cooldown().unwrap();
        assert_eq!(
            account.cancel_cooldown().unwrap_err(),
            error!(ErrorCode::NoActiveCooldown)
        );
    }

    #[test]
    fn cooldown_excludes_delegated_tokens() {
        let mut account = holder(10 * D18);
        account.delegate(6 * D18, D18).unwrap();
        assert!(account.start_cooldown(5 * D18, D18, NOW).is_err());
        account.start_cooldown(4 * D18, D18, NOW).unwrap();
        assert_eq!(account.available_balance(D18).unwrap(), 0);
        assert_eq!(
            account.delegate(1, D18).unwrap_err(),
            error!(ErrorCode::InsufficientDelegatableBalance)
        );
    }

    #[test]
    fn matured_cooldown_is_drawn_down() {
        let mut account = holder(D18);
        account.start_cooldown(D18, D18, NOW).unwrap();
        assert!(!account.draw_from_finished_cooldown(D18 / 2, NOW));

        let later = NOW + COOLDOWN_SECONDS;
        assert!(!account.draw_from_finished_cooldown(2 * D18, later));
        assert!(account.draw_from_finished_cooldown(D18 / 2, later));
        assert_eq!(account.cooldown_amount(), D18 / 2);
        assert!(account.draw_from_finished_cooldown(D18 / 2, later));
        assert_eq!(account.cooldown, None);
    }

    #[test]
    fn lp_exit_allocates_every_pending_reward() {
        use crate::states::GlobalIndicators;
        use crate::utils::math::claimable_token_units;

        let mut pool = GlobalIndicators {
            supported: true,
            rewards_per_block: 100_000_000,
            last_rebalance_block_number: 1,
            ..Default::default()
        };
        let mut position = AccountIndicators::default();
        position.stake_lp(&mut pool, 1, D18).unwrap();
        position.unstake_lp(&mut pool, 4, D18).unwrap();
        position.rewards += 5;

        let mut account = holder(0);
        account.allocated_pw_tokens = 1;
        assert_eq!(account.allocate_rewards(&mut position).unwrap(), 3 * D18 + 5);
        assert_eq!(position.rewards, 0);
        assert_eq!(account.allocated_pw_tokens, 3 * D18 + 6);
        assert_eq!(account.allocate_rewards(&mut position).unwrap(), 0);

        let (token_amount, settled) =
            claimable_token_units(account.allocated_pw_tokens, 9).unwrap();
        assert_eq!(token_amount, 3_000_000_000);
        account.take_allocated(settled).unwrap();
        assert_eq!(account.allocated_pw_tokens, 6);
    }

    #[test]
    fn undelegating_more_than_delegated_fails() {
        let mut account = holder(D18);
        account.delegate(D18 / 2, D18).unwrap();
        assert_eq!(
            account.undelegate(D18).unwrap_err(),
            error!(ErrorCode::InsufficientDelegatedBalance)
        );
        account.undelegate(D18 / 2).unwrap();
        assert_eq!(account.delegated_to_liquidity_mining, 0);
    }
}
