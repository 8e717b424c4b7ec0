use crate::calculator::ExchangeRateCalculator;
use crate::error::ErrorCode;
use crate::states::PowerTokenAccount;
use crate::utils::math::D18;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// PowerToken Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the Power Token vault account.
pub const POWER_TOKEN_SEED: &str = "power_token";

/// Fee charged by `unstake` when no matured cooldown covers the amount (50%).
pub const DEFAULT_UNSTAKE_WITHOUT_COOLDOWN_FEE: u128 = D18 / 2;

/// Singleton state of the Power Token vault.
///
/// The vault holds the staked token in `staked_token_vault`; its normalised
/// balance is the backing of every base share. Callers pass that backing in,
/// measured before any transfer of the current instruction.
#[account]
#[derive(Default, Debug)]
pub struct PowerToken {
    /// PDA bump for this account.
    pub bump: u8,

    /// Mint of the staked token.
    pub staked_token_mint: Pubkey,

    /// Program-owned vault holding the staked token.
    pub staked_token_vault: Pubkey,

    /// Decimals of `staked_token_mint`.
    pub staked_token_decimals: u8,

    /// Base shares in circulation.
    pub total_supply_base: u128,

    /// Fee on unstakes that skip the cooldown, 1e18 = 100%.
    pub unstake_without_cooldown_fee: u128,

    /// Liquidity mining engine receiving delegations.
    pub liquidity_mining: Pubkey,
}

/// Result of an `unstake`, all in 18-decimal units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnstakeOutcome {
    pub amount: u128,
    pub fee: u128,
    pub amount_returned: u128,
    pub exchange_rate: u128,
}

impl PowerToken {
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 3: three Pubkeys
    /// - 1: decimals
    /// - 16 * 2: two u128 fields
    pub const LEN: usize = 8 + 1 + 32 * 3 + 1 + 16 * 2;

    pub fn exchange_rate(&self, backing_balance: u128) -> Result<u128> {
        ExchangeRateCalculator::exchange_rate(backing_balance, self.total_supply_base)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// The Power Token trusts only the liquidity mining account it was configured with.
    pub fn require_liquidity_mining(&self, liquidity_mining: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *liquidity_mining,
            self.liquidity_mining,
            ErrorCode::InvalidLiquidityMining
        );
        Ok(())
    }

    pub fn set_unstake_without_cooldown_fee(&mut self, fee: u128) -> Result<()> {
        require!(fee <= D18, ErrorCode::FeeOutOfRange);
        self.unstake_without_cooldown_fee = fee;
        Ok(())
    }

    /// Credits `amount` of staked token arriving in the vault to `account`.
    /// Shares are minted at the rate observed before the deposit.
    /// Returns the base shares minted.
    pub fn mint(
        &mut self,
        account: &mut PowerTokenAccount,
        backing_balance: u128,
        amount: u128,
    ) -> Result<u128> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        let rate = self.exchange_rate(backing_balance)?;
        let base = ExchangeRateCalculator::to_base(amount, rate)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.total_supply_base = self
            .total_supply_base
            .checked_add(base)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        account.base_balance = account
            .base_balance
            .checked_add(base)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(base)
    }

    fn burn_base(&mut self, account: &mut PowerTokenAccount, base: u128) -> Result<()> {
        account.base_balance = account
            .base_balance
            .checked_sub(base)
            .ok_or_else(|| error!(ErrorCode::InsufficientAvailableBalance))?;
        self.total_supply_base = self
            .total_supply_base
            .checked_sub(base)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        Ok(())
    }

    fn burn(&mut self, account: &mut PowerTokenAccount, amount: u128, rate: u128) -> Result<()> {
        let base = ExchangeRateCalculator::to_base_ceil(amount, rate)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.burn_base(account, base)
    }

    /// Burns a cooled-down `amount`. Burns round up and balances round down,
    /// so after other exits the shares left can be worth slightly less than
    /// the cooldown; the whole base balance is burned then. Returns the
    /// amount actually burned.
    fn burn_cooled_down(
        &mut self,
        account: &mut PowerTokenAccount,
        amount: u128,
        rate: u128,
    ) -> Result<u128> {
        let base = ExchangeRateCalculator::to_base_ceil(amount, rate)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        if base <= account.base_balance {
            self.burn_base(account, base)?;
            return Ok(amount);
        }
        let base = account.base_balance;
        let burned = ExchangeRateCalculator::from_base(base, rate)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.burn_base(account, base)?;
        Ok(burned)
    }

    /// Burns `amount` Power Tokens. A matured cooldown covering the amount
    /// makes the exit fee-free; otherwise the amount must be free of
    /// delegations and cooldowns and the fee stays in the vault.
    pub fn unstake(
        &mut self,
        account: &mut PowerTokenAccount,
        backing_balance: u128,
        amount: u128,
        now: i64,
    ) -> Result<UnstakeOutcome> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        let rate = self.exchange_rate(backing_balance)?;

        if account.draw_from_finished_cooldown(amount, now) {
            let amount = self.burn_cooled_down(account, amount, rate)?;
            return Ok(UnstakeOutcome {
                amount,
                fee: 0,
                amount_returned: amount,
                exchange_rate: rate,
            });
        }

        require!(
            amount <= account.available_balance(rate)?,
            ErrorCode::InsufficientAvailableBalance
        );
        let fee = ExchangeRateCalculator::fee(amount, self.unstake_without_cooldown_fee)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
        self.burn(account, amount, rate)?;

        Ok(UnstakeOutcome {
            amount,
            fee,
            amount_returned: amount - fee,
            exchange_rate: rate,
        })
    }

    /// Burns the whole matured cooldown. Returns `(amount, exchange_rate)`.
    pub fn redeem(
        &mut self,
        account: &mut PowerTokenAccount,
        backing_balance: u128,
        now: i64,
    ) -> Result<(u128, u128)> {
        let rate = self.exchange_rate(backing_balance)?;
        let amount = account.take_finished_cooldown(now)?;
        let amount = self.burn_cooled_down(account, amount, rate)?;
        Ok((amount, rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::COOLDOWN_SECONDS;

    const NOW: i64 = 1_700_000_000;

    fn vault() -> PowerToken {
        PowerToken {
            staked_token_decimals: 9,
            unstake_without_cooldown_fee: DEFAULT_UNSTAKE_WITHOUT_COOLDOWN_FEE,
            liquidity_mining: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn first_stake_mints_at_par() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        assert_eq!(vault.mint(&mut alice, 0, 3 * D18).unwrap(), 3 * D18);
        assert_eq!(vault.exchange_rate(3 * D18).unwrap(), D18);
        assert_eq!(alice.balance(D18).unwrap(), 3 * D18);
    }

    #[test]
    fn unstake_without_cooldown_pays_half_and_lifts_rate() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        let mut bob = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, D18).unwrap();
        vault.mint(&mut bob, D18, D18).unwrap();

        let outcome = vault.unstake(&mut alice, 2 * D18, D18, NOW).unwrap();
        assert_eq!(outcome.fee, D18 / 2);
        assert_eq!(outcome.amount_returned, D18 / 2);
        assert_eq!(alice.base_balance, 0);

        let backing = 2 * D18 - outcome.amount_returned;
        let rate = vault.exchange_rate(backing).unwrap();
        assert_eq!(rate, 3 * D18 / 2);
        assert_eq!(bob.balance(rate).unwrap(), 3 * D18 / 2);
    }

    #[test]
    fn matured_cooldown_exit_is_fee_free() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, D18).unwrap();
        alice.start_cooldown(D18, D18, NOW).unwrap();

        assert_eq!(
            vault.unstake(&mut alice, D18, D18 / 4, NOW + 1).unwrap_err(),
            error!(ErrorCode::InsufficientAvailableBalance)
        );
        let outcome = vault
            .unstake(&mut alice, D18, D18 / 4, NOW + COOLDOWN_SECONDS)
            .unwrap();
        assert_eq!(outcome.fee, 0);
        assert_eq!(alice.cooldown_amount(), 3 * D18 / 4);
    }

    #[test]
    fn redeem_leaves_rate_unchanged() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        let mut bob = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, D18).unwrap();
        vault.mint(&mut bob, D18, D18).unwrap();
        alice.start_cooldown(D18 / 2, D18, NOW).unwrap();

        assert_eq!(
            vault.redeem(&mut alice, 2 * D18, NOW + COOLDOWN_SECONDS - 1).unwrap_err(),
            error!(ErrorCode::CooldownNotFinished)
        );
        let (amount, rate) = vault
            .redeem(&mut alice, 2 * D18, NOW + COOLDOWN_SECONDS + 1)
            .unwrap();
        assert_eq!(amount, D18 / 2);
        assert_eq!(rate, D18);
        assert_eq!(alice.cooldown, None);
        assert_eq!(vault.exchange_rate(2 * D18 - amount).unwrap(), D18);
    }

    #[test]
    fn delegated_tokens_cannot_be_unstaked() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, D18).unwrap();
        alice.delegate(D18, D18).unwrap();
        assert_eq!(
            vault.unstake(&mut alice, D18, 1, NOW).unwrap_err(),
            error!(ErrorCode::InsufficientAvailableBalance)
        );
    }

    #[test]
    fn rewards_mint_at_pre_deposit_rate() {
        let mut vault = vault();
        let mut alice = PowerTokenAccount::default();
        let mut bob = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, D18).unwrap();
        // fee forfeiture earlier doubled the backing
        let backing = 2 * D18;
        let minted = vault.mint(&mut bob, backing, D18).unwrap();
        assert_eq!(minted, D18 / 2);
        assert_eq!(vault.exchange_rate(backing + D18).unwrap(), 2 * D18);
    }

    #[test]
    fn matured_cooldown_stays_redeemable_after_rounded_exits() {
        let mut vault = vault();
        vault.set_unstake_without_cooldown_fee(0).unwrap();
        let mut alice = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, 10).unwrap();

        // rate 1.5: the 10 base shares are worth 15
        let rate = vault.exchange_rate(15).unwrap();
        assert_eq!(rate, 3 * D18 / 2);
        alice.start_cooldown(5, rate, NOW).unwrap();

        let outcome = vault.unstake(&mut alice, 15, 10, NOW).unwrap();
        assert_eq!(outcome.amount_returned, 10);
        assert_eq!(alice.base_balance, 3);
        let backing = 5;
        let rate = vault.exchange_rate(backing).unwrap();
        assert_eq!(alice.balance(rate).unwrap(), 4);
        assert_eq!(alice.cooldown_amount(), 5);

        let (amount, _) = vault
            .redeem(&mut alice, backing, NOW + COOLDOWN_SECONDS)
            .unwrap();
        assert_eq!(amount, 4);
        assert_eq!(alice.base_balance, 0);
        assert_eq!(alice.cooldown, None);
        assert_eq!(vault.total_supply_base, 0);
    }

    #[test]
    fn cooldown_exit_is_capped_by_remaining_shares() {
        let mut vault = vault();
        vault.set_unstake_without_cooldown_fee(0).unwrap();
        let mut alice = PowerTokenAccount::default();
        vault.mint(&mut alice, 0, 10).unwrap();
        alice.start_cooldown(5, vault.exchange_rate(15).unwrap(), NOW).unwrap();
        vault.unstake(&mut alice, 15, 10, NOW).unwrap();

        let outcome = vault
            .unstake(&mut alice, 5, 5, NOW + COOLDOWN_SECONDS)
            .unwrap();
        assert_eq!(outcome.amount, 4);
        assert_eq!(outcome.fee, 0);
        assert_eq!(outcome.amount_returned, 4);
        assert_eq!(alice.base_balance, 0);
    }

    #[test]
    fn fee_is_bounded() {
        let mut vault = vault();
        assert_eq!(
            vault.set_unstake_without_cooldown_fee(D18 + 1).unwrap_err(),
            error!(ErrorCode::FeeOutOfRange)
        );
        vault.set_unstake_without_cooldown_fee(0).unwrap();
        assert_eq!(vault.unstake_without_cooldown_fee, 0);
    }

    #[test]
    fn only_configured_liquidity_mining_is_trusted() {
        let vault = vault();
        assert!(vault.require_liquidity_mining(&vault.liquidity_mining).is_ok());
        assert!(vault.require_liquidity_mining(&Pubkey::new_unique()).is_err());
    }
}
