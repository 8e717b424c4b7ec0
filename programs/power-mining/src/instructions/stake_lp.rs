use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_block_number, to_internal_amount, transfer_from_user_to_pool_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `stake_lp_tokens`.
///
/// The position is created on the first stake into the pool.
#[derive(Accounts)]
pub struct StakeLpTokens<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), lp_mint.key().as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,

    #[account(
        init_if_needed,
        seeds = [
            ACCOUNT_INDICATORS_SEED.as_bytes(),
            lp_mint.key().as_ref(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = AccountIndicators::LEN
    )]
    pub account_indicators: Box<Account<'info, AccountIndicators>>,

    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's LP token account, debited.
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = owner,
    )]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = global_indicators.lp_vault @ ErrorCode::InvalidVault,
    )]
    pub lp_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Stakes `amount` LP tokens (token units) into the pool.
///
/// Steps:
/// 1) Guard: not paused, pool supported, non-zero amount.
/// 2) Rebalance pool and position, then add the amount to the position.
/// 3) Pull the LP tokens into the pool vault.
pub fn stake_lp_tokens(ctx: Context<StakeLpTokens>, amount: u64) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;
    require!(amount > 0, ErrorCode::ZeroAmount);

    let global_indicators = &mut ctx.accounts.global_indicators;
    global_indicators.require_supported()?;

    let account_indicators = &mut ctx.accounts.account_indicators;
    account_indicators.open(
        ctx.bumps.account_indicators,
        ctx.accounts.owner.key(),
        global_indicators.lp_mint,
    );

    let internal_amount = to_internal_amount(amount, global_indicators.lp_decimals)?;
    account_indicators.stake_lp(global_indicators, current_block_number()?, internal_amount)?;

    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_lp_token.to_account_info(),
        ctx.accounts.lp_vault.to_account_info(),
        ctx.accounts.lp_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.lp_mint.decimals,
    )?;

    emit!(LpTokensStaked {
        account: ctx.accounts.owner.key(),
        lp_mint: global_indicators.lp_mint,
        lp_token_amount: amount,
    });
    Ok(())
}
