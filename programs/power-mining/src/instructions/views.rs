//! Read-only instructions. Results are returned through the transaction's
//! return data; reward views simulate the pool up to the current slot
//! without writing anything.

use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_block_number, to_internal_amount, WideU256};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GlobalIndicatorsView {
    pub aggregated_power_up: u128,
    pub composite_multiplier_in_the_block: WideU256,
    pub composite_multiplier_cumulative_prev_block: WideU256,
    pub last_rebalance_block_number: u64,
    pub rewards_per_block: u64,
    pub accrued_rewards: u128,
    pub activity: PoolActivity,
}

impl From<&GlobalIndicators> for GlobalIndicatorsView {
    fn from(global: &GlobalIndicators) -> Self {
        Self {
            aggregated_power_up: global.aggregated_power_up,
            composite_multiplier_in_the_block: global.composite_multiplier_in_the_block,
            composite_multiplier_cumulative_prev_block: global
                .composite_multiplier_cumulative_prev_block,
            last_rebalance_block_number: global.last_rebalance_block_number,
            rewards_per_block: global.rewards_per_block,
            accrued_rewards: global.accrued_rewards,
            activity: global.activity(),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AccountIndicatorsView {
    pub composite_multiplier_cumulative_prev_block: WideU256,
    pub lp_token_balance: u128,
    pub power_up: u128,
    pub delegated_pw_token_balance: u128,
    pub rewards: u128,
}

impl From<&AccountIndicators> for AccountIndicatorsView {
    fn from(account: &AccountIndicators) -> Self {
        Self {
            composite_multiplier_cumulative_prev_block: account
                .composite_multiplier_cumulative_prev_block,
            lp_token_balance: account.lp_token_balance,
            power_up: account.power_up,
            delegated_pw_token_balance: account.delegated_pw_token_balance,
            rewards: account.rewards,
        }
    }
}

#[derive(Accounts)]
pub struct ViewPool<'info> {
    #[account(
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), global_indicators.lp_mint.as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Account<'info, GlobalIndicators>,
}

#[derive(Accounts)]
pub struct ViewPosition<'info> {
    #[account(
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), global_indicators.lp_mint.as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Account<'info, GlobalIndicators>,

    #[account(
        constraint = account_indicators.lp_mint == global_indicators.lp_mint @ ErrorCode::AssetMismatch,
    )]
    pub account_indicators: Account<'info, AccountIndicators>,
}

/// Pools are passed as remaining accounts, one `GlobalIndicators` each.
#[derive(Accounts)]
pub struct ViewAccruedRewards<'info> {
    #[account(
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
    )]
    pub liquidity_mining: Account<'info, LiquidityMining>,
}

#[derive(Accounts)]
#[instruction(lp_mint: Pubkey)]
pub struct ViewLpTokenSupport<'info> {
    /// CHECK: derived from `lp_mint`; may not exist yet.
    #[account(
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), lp_mint.as_ref()],
        bump,
    )]
    pub global_indicators: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ViewPowerToken<'info> {
    #[account(
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Account<'info, PowerToken>,

    #[account(
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: InterfaceAccount<'info, TokenAccount>,
}

#[derive(Accounts)]
pub struct ViewHolder<'info> {
    #[account(
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Account<'info, PowerToken>,

    #[account(
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), power_token_account.owner.as_ref()],
        bump = power_token_account.bump,
    )]
    pub power_token_account: Account<'info, PowerTokenAccount>,
}

fn exchange_rate(power_token: &PowerToken, staked_token_vault: &TokenAccount) -> Result<u128> {
    power_token.exchange_rate(to_internal_amount(
        staked_token_vault.amount,
        power_token.staked_token_decimals,
    )?)
}

/// Rewards the position could claim now.
pub fn calculate_account_rewards(ctx: Context<ViewPosition>) -> Result<u128> {
    let simulated = ctx
        .accounts
        .global_indicators
        .rebalanced(current_block_number()?)?;
    ctx.accounts.account_indicators.pending_rewards(&simulated)
}

/// Rewards emitted so far by every pool passed in.
pub fn calculate_accrued_rewards<'info>(
    ctx: Context<'_, '_, 'info, 'info, ViewAccruedRewards<'info>>,
) -> Result<u128> {
    let block_number = current_block_number()?;
    ctx.remaining_accounts
        .iter()
        .try_fold(0u128, |total, info| {
            let global_indicators = Account::<GlobalIndicators>::try_from(info)?;
            let accrued = global_indicators.rebalanced(block_number)?.accrued_rewards;
            total
                .checked_add(accrued)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))
        })
}

pub fn get_global_indicators(ctx: Context<ViewPool>) -> Result<GlobalIndicatorsView> {
    Ok(GlobalIndicatorsView::from(&*ctx.accounts.global_indicators))
}

pub fn get_account_indicators(ctx: Context<ViewPosition>) -> Result<AccountIndicatorsView> {
    Ok(AccountIndicatorsView::from(&*ctx.accounts.account_indicators))
}

/// Staked LP tokens of the position (18 decimals).
pub fn balance_of(ctx: Context<ViewPosition>) -> Result<u128> {
    Ok(ctx.accounts.account_indicators.lp_token_balance)
}

pub fn balance_of_delegated_pw_token(ctx: Context<ViewPosition>) -> Result<u128> {
    Ok(ctx.accounts.account_indicators.delegated_pw_token_balance)
}

pub fn is_lp_token_supported(ctx: Context<ViewLpTokenSupport>, _lp_mint: Pubkey) -> Result<bool> {
    let info = ctx.accounts.global_indicators.to_account_info();
    if *info.owner != crate::ID || info.data_is_empty() {
        return Ok(false);
    }
    let data = info.try_borrow_data()?;
    let global_indicators = GlobalIndicators::try_deserialize(&mut &data[..])?;
    Ok(global_indicators.supported)
}

pub fn calculate_exchange_rate(ctx: Context<ViewPowerToken>) -> Result<u128> {
    exchange_rate(&ctx.accounts.power_token, &ctx.accounts.staked_token_vault)
}

/// Power Token balance of the holder at the current exchange rate.
pub fn power_token_balance_of(ctx: Context<ViewHolder>) -> Result<u128> {
    let exchange_rate = exchange_rate(&ctx.accounts.power_token, &ctx.accounts.staked_token_vault)?;
    ctx.accounts.power_token_account.balance(exchange_rate)
}

pub fn balance_of_allocated_pw_tokens(ctx: Context<ViewHolder>) -> Result<u128> {
    Ok(ctx.accounts.power_token_account.allocated_pw_tokens)
}

pub fn get_active_cooldown(ctx: Context<ViewHolder>) -> Result<Option<Cooldown>> {
    Ok(ctx.accounts.power_token_account.cooldown)
}

pub fn delegated_to_liquidity_mining_balance_of(ctx: Context<ViewHolder>) -> Result<u128> {
    Ok(ctx.accounts.power_token_account.delegated_to_liquidity_mining)
}
