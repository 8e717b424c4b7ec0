use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_block_number, to_internal_amount, transfer_from_pool_vault_to_user};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `unstake_lp_tokens`.
///
/// Works on removed pools too, so positions can always leave.
#[derive(Accounts)]
pub struct UnstakeLpTokens<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// CHECK: PDA derivation enforced by seeds; signs the vault transfer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), lp_mint.key().as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,

    #[account(
        mut,
        seeds = [
            ACCOUNT_INDICATORS_SEED.as_bytes(),
            lp_mint.key().as_ref(),
            owner.key().as_ref()
        ],
        bump = account_indicators.bump,
    )]
    pub account_indicators: Box<Account<'info, AccountIndicators>>,

    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's LP token account, credited.
    #[account(
        mut,
        token::mint = lp_mint,
    )]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = global_indicators.lp_vault @ ErrorCode::InvalidVault,
    )]
    pub lp_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Rebalances, lowers the position by `amount` and sends the LP tokens back.
fn unstake_position<'info>(
    accounts: &mut UnstakeLpTokens<'info>,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    accounts.global_config.require_not_paused()?;
    require!(amount > 0, ErrorCode::ZeroAmount);

    let global_indicators = &mut accounts.global_indicators;
    let internal_amount = to_internal_amount(amount, global_indicators.lp_decimals)?;
    accounts.account_indicators.unstake_lp(
        global_indicators,
        current_block_number()?,
        internal_amount,
    )?;

    transfer_from_pool_vault_to_user(
        accounts.authority.to_account_info(),
        accounts.lp_vault.to_account_info(),
        accounts.owner_lp_token.to_account_info(),
        accounts.lp_mint.to_account_info(),
        accounts.token_program.to_account_info(),
        amount,
        accounts.lp_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[authority_bump]]],
    )?;

    emit!(LpTokensUnstaked {
        account: accounts.owner.key(),
        lp_mint: accounts.global_indicators.lp_mint,
        lp_token_amount: amount,
    });
    Ok(())
}

pub fn unstake_lp_tokens(ctx: Context<UnstakeLpTokens>, amount: u64) -> Result<()> {
    unstake_position(ctx.accounts, ctx.bumps.authority, amount)
}

/// Accounts context for `unstake_lp_tokens_and_allocate_pw_tokens`.
#[derive(Accounts)]
pub struct UnstakeLpTokensAndAllocate<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub unstake: UnstakeLpTokens<'info>,

    #[account(
        init_if_needed,
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), unstake.owner.key().as_ref()],
        bump,
        payer = payer,
        space = PowerTokenAccount::LEN
    )]
    pub power_token_account: Box<Account<'info, PowerTokenAccount>>,

    pub system_program: Program<'info, System>,
}

/// Unstakes like `unstake_lp_tokens`, then parks every pending reward of the
/// position in the owner's allocated bucket instead of minting Power Tokens.
pub fn unstake_lp_tokens_and_allocate_pw_tokens(
    ctx: Context<UnstakeLpTokensAndAllocate>,
    amount: u64,
) -> Result<()> {
    unstake_position(&mut ctx.accounts.unstake, ctx.bumps.unstake.authority, amount)?;

    let owner = ctx.accounts.unstake.owner.key();
    let power_token_account = &mut ctx.accounts.power_token_account;
    power_token_account.open(ctx.bumps.power_token_account, owner);

    let account_indicators = &mut ctx.accounts.unstake.account_indicators;
    let allocated = power_token_account.allocate_rewards(account_indicators)?;

    emit!(PwTokensAllocated {
        account: owner,
        lp_mint: account_indicators.lp_mint,
        allocated,
    });
    Ok(())
}
