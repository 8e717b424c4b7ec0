use crate::error::ErrorCode;
use crate::instructions::UnstakePowerToken;
use crate::states::*;
use crate::utils::{current_timestamp, to_internal_amount};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

/// Accounts context for `cooldown` and `cancel_cooldown`.
#[derive(Accounts)]
pub struct ChangeCooldown<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Box<Account<'info, PowerToken>>,

    #[account(
        mut,
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), owner.key().as_ref()],
        bump = power_token_account.bump,
    )]
    pub power_token_account: Box<Account<'info, PowerTokenAccount>>,

    /// Read to price the balance.
    #[account(
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

/// Locks `amount` Power Tokens for a fee-free exit after the cooldown
/// period, replacing any previous cooldown.
pub fn cooldown(ctx: Context<ChangeCooldown>, amount: u128) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;

    let backing = to_internal_amount(
        ctx.accounts.staked_token_vault.amount,
        ctx.accounts.power_token.staked_token_decimals,
    )?;
    let exchange_rate = ctx.accounts.power_token.exchange_rate(backing)?;
    let cooldown = ctx.accounts.power_token_account.start_cooldown(
        amount,
        exchange_rate,
        current_timestamp()?,
    )?;

    emit!(CooldownChanged {
        account: ctx.accounts.owner.key(),
        cooldown: Some(cooldown),
    });
    Ok(())
}

pub fn cancel_cooldown(ctx: Context<ChangeCooldown>) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;
    ctx.accounts.power_token_account.cancel_cooldown()?;

    emit!(CooldownChanged {
        account: ctx.accounts.owner.key(),
        cooldown: ctx.accounts.power_token_account.cooldown,
    });
    Ok(())
}

/// Burns the matured cooldown amount and returns its full value, no fee.
pub fn redeem(ctx: Context<UnstakePowerToken>) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;

    let backing = ctx.accounts.backing_balance()?;
    let (pw_token_amount, exchange_rate) = ctx.accounts.power_token.redeem(
        &mut ctx.accounts.power_token_account,
        backing,
        current_timestamp()?,
    )?;
    let staked_token_amount = ctx.accounts.pay_out(ctx.bumps.authority, pw_token_amount)?;

    emit!(Redeem {
        account: ctx.accounts.owner.key(),
        pw_token_amount,
        staked_token_amount,
        exchange_rate,
    });
    Ok(())
}
