use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{
    current_timestamp, to_internal_amount, to_token_amount, transfer_from_pool_vault_to_user,
    transfer_from_user_to_pool_vault,
};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `stake`: staked tokens in, Power Token shares out.
#[derive(Accounts)]
pub struct StakePowerToken<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Box<Account<'info, PowerToken>>,

    #[account(
        init_if_needed,
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), owner.key().as_ref()],
        bump,
        payer = owner,
        space = PowerTokenAccount::LEN
    )]
    pub power_token_account: Box<Account<'info, PowerTokenAccount>>,

    #[account(
        address = power_token.staked_token_mint @ ErrorCode::InvalidStakedTokenMint
    )]
    pub staked_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's staked-token account, debited.
    #[account(
        mut,
        token::mint = staked_token_mint,
        token::authority = owner,
    )]
    pub owner_staked_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Stakes `amount` staked tokens (token units). Shares are minted at the
/// current exchange rate, which the deposit leaves unchanged.
pub fn stake(ctx: Context<StakePowerToken>, amount: u64) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;
    require!(amount > 0, ErrorCode::ZeroAmount);

    let decimals = ctx.accounts.power_token.staked_token_decimals;
    let power_token_account = &mut ctx.accounts.power_token_account;
    power_token_account.open(ctx.bumps.power_token_account, ctx.accounts.owner.key());

    let backing = to_internal_amount(ctx.accounts.staked_token_vault.amount, decimals)?;
    let exchange_rate = ctx.accounts.power_token.exchange_rate(backing)?;
    let base_minted = ctx.accounts.power_token.mint(
        power_token_account,
        backing,
        to_internal_amount(amount, decimals)?,
    )?;

    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_staked_token.to_account_info(),
        ctx.accounts.staked_token_vault.to_account_info(),
        ctx.accounts.staked_token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        decimals,
    )?;

    emit!(Staked {
        account: ctx.accounts.owner.key(),
        staked_token_amount: amount,
        base_minted,
        exchange_rate,
    });
    Ok(())
}

/// Accounts context for `unstake` and `redeem`: shares burned, staked tokens out.
#[derive(Accounts)]
pub struct UnstakePowerToken<'info> {
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

    #[account(
        address = power_token.staked_token_mint @ ErrorCode::InvalidStakedTokenMint
    )]
    pub staked_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's staked-token account, credited.
    #[account(
        mut,
        token::mint = staked_token_mint,
    )]
    pub owner_staked_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> UnstakePowerToken<'info> {
    pub(crate) fn backing_balance(&self) -> Result<u128> {
        to_internal_amount(
            self.staked_token_vault.amount,
            self.power_token.staked_token_decimals,
        )
    }

    /// Sends `amount` (internal units) to the owner, truncated to whole token
    /// units; the remainder stays in the vault. Returns the tokens sent.
    pub(crate) fn pay_out(&self, authority_bump: u8, amount: u128) -> Result<u64> {
        let decimals = self.power_token.staked_token_decimals;
        let token_amount = to_token_amount(amount, decimals)?;
        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.staked_token_vault.to_account_info(),
            self.owner_staked_token.to_account_info(),
            self.staked_token_mint.to_account_info(),
            self.token_program.to_account_info(),
            token_amount,
            decimals,
            &[&[crate::AUTH_SEED.as_bytes(), &[authority_bump]]],
        )?;
        Ok(token_amount)
    }
}

/// Unstakes `amount` Power Tokens (18 decimals).
///
/// Fee-free when a matured cooldown covers the amount; otherwise the amount
/// must be neither delegated nor cooling down and the configured fee stays
/// in the vault for the remaining holders.
pub fn unstake(ctx: Context<UnstakePowerToken>, amount: u128) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;

    let backing = ctx.accounts.backing_balance()?;
    let outcome = ctx.accounts.power_token.unstake(
        &mut ctx.accounts.power_token_account,
        backing,
        amount,
        current_timestamp()?,
    )?;
    let staked_token_amount = ctx
        .accounts
        .pay_out(ctx.bumps.authority, outcome.amount_returned)?;

    emit!(Unstaked {
        account: ctx.accounts.owner.key(),
        pw_token_amount: outcome.amount,
        fee: outcome.fee,
        staked_token_amount,
        exchange_rate: outcome.exchange_rate,
    });
    Ok(())
}
