use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::INTERNAL_DECIMALS;
use crate::{REWARD_VAULT_SEED, STAKED_TOKEN_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialise_configs`.
///
/// This handler:
/// - Creates the role configuration.
/// - Creates the Power Token vault state and its staked-token vault.
/// - Creates the liquidity mining state and its reward vault.
/// - Points the Power Token and the liquidity mining engine at each other.
#[derive(Accounts)]
pub struct InitialiseConfigs<'info> {
    /// Admin signer (must match the program-level admin id), pays for every account.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, owner of every vault.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        init,
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump,
        payer = owner,
        space = PowerToken::LEN
    )]
    pub power_token: Box<Account<'info, PowerToken>>,

    #[account(
        init,
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump,
        payer = owner,
        space = LiquidityMining::LEN
    )]
    pub liquidity_mining: Box<Account<'info, LiquidityMining>>,

    /// Mint backing the Power Token; rewards are paid in it too.
    #[account(
        constraint = staked_token_mint.decimals <= INTERNAL_DECIMALS @ ErrorCode::InvalidDecimals
    )]
    pub staked_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault backing every Power Token share.
    #[account(
        init,
        seeds = [STAKED_TOKEN_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = staked_token_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault funding mining rewards, topped up by the protocol.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = staked_token_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Writes the initial configuration.
///
/// `admin` becomes the stored admin; the program-level admin keeps admin
/// rights regardless. `pause_manager` may pause user operations.
pub fn initialise_configs(
    ctx: Context<InitialiseConfigs>,
    admin: Pubkey,
    pause_manager: Pubkey,
) -> Result<()> {
    let power_token_key = ctx.accounts.power_token.key();
    let liquidity_mining_key = ctx.accounts.liquidity_mining.key();

    let global_config = ctx.accounts.global_config.deref_mut();
    global_config.bump = ctx.bumps.global_config;
    global_config.admin = admin;
    global_config.appointed_admin = Pubkey::default();
    global_config.pause_manager = pause_manager;
    global_config.paused = false;
    global_config.staked_token_mint = ctx.accounts.staked_token_mint.key();
    msg!("Global Config initialized");

    let power_token = ctx.accounts.power_token.deref_mut();
    power_token.bump = ctx.bumps.power_token;
    power_token.staked_token_mint = ctx.accounts.staked_token_mint.key();
    power_token.staked_token_vault = ctx.accounts.staked_token_vault.key();
    power_token.staked_token_decimals = ctx.accounts.staked_token_mint.decimals;
    power_token.total_supply_base = 0;
    power_token.unstake_without_cooldown_fee = DEFAULT_UNSTAKE_WITHOUT_COOLDOWN_FEE;
    power_token.liquidity_mining = liquidity_mining_key;
    msg!("Power Token initialized");

    let liquidity_mining = ctx.accounts.liquidity_mining.deref_mut();
    liquidity_mining.bump = ctx.bumps.liquidity_mining;
    liquidity_mining.reward_vault = ctx.accounts.reward_vault.key();
    liquidity_mining.power_token = power_token_key;
    liquidity_mining.lp_token_count = 0;
    msg!("Liquidity Mining initialized");

    emit!(ConfigInitialized {
        admin,
        staked_token_mint: ctx.accounts.staked_token_mint.key(),
        power_token: power_token_key,
        liquidity_mining: liquidity_mining_key,
        staked_token_vault: ctx.accounts.staked_token_vault.key(),
        reward_vault: ctx.accounts.reward_vault.key(),
        unstake_without_cooldown_fee: DEFAULT_UNSTAKE_WITHOUT_COOLDOWN_FEE,
    });
    Ok(())
}
