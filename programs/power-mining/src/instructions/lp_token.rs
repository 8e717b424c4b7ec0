use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_block_number, INTERNAL_DECIMALS};
use crate::LP_VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `add_lp_token_asset`.
///
/// Registers an LP mint with the mining engine. The pool indicators and the
/// LP vault are created on first registration and reused when a removed
/// mint is added again.
#[derive(Accounts)]
pub struct AddLpToken<'info> {
    #[account(
        mut,
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// CHECK: PDA derivation enforced by seeds; set as LP vault authority.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
    )]
    pub liquidity_mining: Box<Account<'info, LiquidityMining>>,

    #[account(
        constraint = lp_mint.decimals <= INTERNAL_DECIMALS @ ErrorCode::InvalidDecimals
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), lp_mint.key().as_ref()],
        bump,
        payer = owner,
        space = GlobalIndicators::LEN
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,

    /// Program-owned vault for the pool's staked LP tokens.
    #[account(
        init_if_needed,
        seeds = [LP_VAULT_SEED.as_bytes(), lp_mint.key().as_ref()],
        bump,
        payer = owner,
        token::mint = lp_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub lp_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn add_lp_token_asset(ctx: Context<AddLpToken>) -> Result<()> {
    let block_number = current_block_number()?;
    let lp_mint = ctx.accounts.lp_mint.key();
    let global_indicators = &mut ctx.accounts.global_indicators;

    if global_indicators.lp_mint == Pubkey::default() {
        global_indicators.bump = ctx.bumps.global_indicators;
        global_indicators.lp_mint = lp_mint;
        global_indicators.lp_vault = ctx.accounts.lp_vault.key();
        global_indicators.lp_decimals = ctx.accounts.lp_mint.decimals;
        global_indicators.last_rebalance_block_number = block_number;
    } else {
        require!(!global_indicators.supported, ErrorCode::LpTokenAlreadySupported);
        global_indicators.rebalance(block_number)?;
    }
    global_indicators.supported = true;

    let liquidity_mining = &mut ctx.accounts.liquidity_mining;
    liquidity_mining.lp_token_count = liquidity_mining
        .lp_token_count
        .checked_add(1)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;

    emit!(LpTokenAdded { lp_mint });
    Ok(())
}

/// Accounts context for admin changes to a single pool.
#[derive(Accounts)]
pub struct UpdateLpToken<'info> {
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
    )]
    pub liquidity_mining: Box<Account<'info, LiquidityMining>>,

    #[account(
        mut,
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), global_indicators.lp_mint.as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,
}

/// Stops new stakes and freezes emission at the current block. Existing
/// positions keep what they earned and can still unstake and claim.
pub fn remove_lp_token_asset(ctx: Context<UpdateLpToken>) -> Result<()> {
    let global_indicators = &mut ctx.accounts.global_indicators;
    global_indicators.require_supported()?;
    global_indicators.deactivate(current_block_number()?)?;

    let liquidity_mining = &mut ctx.accounts.liquidity_mining;
    liquidity_mining.lp_token_count = liquidity_mining
        .lp_token_count
        .checked_sub(1)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;

    emit!(LpTokenRemoved {
        lp_mint: global_indicators.lp_mint,
    });
    Ok(())
}

/// Settles the pool at the old rate up to now, then emits at the new one.
/// Positions are not touched.
pub fn set_rewards_per_block(ctx: Context<UpdateLpToken>, rewards_per_block: u64) -> Result<()> {
    let global_indicators = &mut ctx.accounts.global_indicators;
    global_indicators.require_supported()?;
    let old_rewards_per_block = global_indicators.rewards_per_block;
    global_indicators.set_rewards_per_block(current_block_number()?, rewards_per_block)?;

    emit!(RewardsPerBlockChanged {
        lp_mint: global_indicators.lp_mint,
        old_rewards_per_block,
        new_rewards_per_block: rewards_per_block,
    });
    Ok(())
}
