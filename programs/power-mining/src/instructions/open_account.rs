use crate::states::*;
use anchor_lang::prelude::*;

/// Creates an empty position so Power Tokens can be delegated to a pool
/// before any LP token is staked in it.
#[derive(Accounts)]
pub struct InitializeAccountIndicators<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), global_indicators.lp_mint.as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,

    #[account(
        init,
        seeds = [
            ACCOUNT_INDICATORS_SEED.as_bytes(),
            global_indicators.lp_mint.as_ref(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = AccountIndicators::LEN
    )]
    pub account_indicators: Box<Account<'info, AccountIndicators>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_account_indicators(ctx: Context<InitializeAccountIndicators>) -> Result<()> {
    let lp_mint = ctx.accounts.global_indicators.lp_mint;
    let account_indicators = &mut ctx.accounts.account_indicators;
    account_indicators.open(
        ctx.bumps.account_indicators,
        ctx.accounts.owner.key(),
        lp_mint,
    );
    account_indicators.composite_multiplier_cumulative_prev_block =
        ctx.accounts.global_indicators.composite_multiplier_cumulative_prev_block;
    Ok(())
}

/// Creates an empty Power Token account.
#[derive(Accounts)]
pub struct InitializePowerTokenAccount<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), owner.key().as_ref()],
        bump,
        payer = owner,
        space = PowerTokenAccount::LEN
    )]
    pub power_token_account: Box<Account<'info, PowerTokenAccount>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_power_token_account(ctx: Context<InitializePowerTokenAccount>) -> Result<()> {
    ctx.accounts
        .power_token_account
        .open(ctx.bumps.power_token_account, ctx.accounts.owner.key());
    Ok(())
}
