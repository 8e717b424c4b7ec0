use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{
    claimable_token_units, current_block_number, to_internal_amount,
    transfer_from_pool_vault_to_user,
};
use crate::REWARD_VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts shared by both reward paths: rewards leave the mining reward
/// vault and enter the Power Token vault as newly minted balance.
#[derive(Accounts)]
pub struct RewardSettlement<'info> {
    #[account(mut)]
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
        constraint = power_token.liquidity_mining == liquidity_mining.key() @ ErrorCode::InvalidLiquidityMining,
    )]
    pub power_token: Box<Account<'info, PowerToken>>,

    #[account(
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
        constraint = liquidity_mining.power_token == power_token.key() @ ErrorCode::CallerNotPowerToken,
    )]
    pub liquidity_mining: Box<Account<'info, LiquidityMining>>,

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

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        address = liquidity_mining.reward_vault @ ErrorCode::InvalidVault,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

impl<'info> RewardSettlement<'info> {
    /// Moves up to `rewards` from the reward vault into the Power Token vault
    /// and mints the owner's shares at the rate before the deposit.
    ///
    /// Only whole token units move; the settled amount is returned so the
    /// remainder stays with the caller's ledger.
    fn settle_into_power_token(
        &mut self,
        bumps: &RewardSettlementBumps,
        rewards: u128,
    ) -> Result<(u128, u128)> {
        self.global_config.require_not_paused()?;

        let decimals = self.power_token.staked_token_decimals;
        let (token_amount, settled) = claimable_token_units(rewards, decimals)?;

        self.power_token_account
            .open(bumps.power_token_account, self.owner.key());
        let backing = to_internal_amount(self.staked_token_vault.amount, decimals)?;
        let base_minted = self
            .power_token
            .mint(&mut self.power_token_account, backing, settled)?;

        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.reward_vault.to_account_info(),
            self.staked_token_vault.to_account_info(),
            self.staked_token_mint.to_account_info(),
            self.token_program.to_account_info(),
            token_amount,
            decimals,
            &[&[crate::AUTH_SEED.as_bytes(), &[bumps.authority]]],
        )?;
        Ok((settled, base_minted))
    }
}

/// Accounts context for `claim`.
#[derive(Accounts)]
pub struct Claim<'info> {
    pub settlement: RewardSettlement<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_INDICATORS_SEED.as_bytes(), global_indicators.lp_mint.as_ref()],
        bump = global_indicators.bump,
    )]
    pub global_indicators: Box<Account<'info, GlobalIndicators>>,

    #[account(
        mut,
        seeds = [
            ACCOUNT_INDICATORS_SEED.as_bytes(),
            global_indicators.lp_mint.as_ref(),
            settlement.owner.key().as_ref()
        ],
        bump = account_indicators.bump,
    )]
    pub account_indicators: Box<Account<'info, AccountIndicators>>,
}

/// Claims the pending rewards of one position as Power Tokens.
///
/// The position is rebalanced first; a sub-unit remainder below one staked
/// token unit stays pending.
pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let global_indicators = &mut ctx.accounts.global_indicators;
    let account_indicators = &mut ctx.accounts.account_indicators;
    account_indicators.settle(global_indicators, current_block_number()?)?;

    let pending = account_indicators.rewards;
    require!(pending > 0, ErrorCode::NothingToClaim);

    let (settled, base_minted) = ctx
        .accounts
        .settlement
        .settle_into_power_token(&ctx.bumps.settlement, pending)?;
    account_indicators.take_rewards(settled)?;

    emit!(Claimed {
        account: ctx.accounts.settlement.owner.key(),
        lp_mint: global_indicators.lp_mint,
        rewards: settled,
        base_minted,
    });
    Ok(())
}

/// Turns the allocated bucket filled by `unstake_lp_tokens_and_allocate_pw_tokens`
/// into Power Tokens.
pub fn claim_allocated_pw_tokens(ctx: Context<RewardSettlement>) -> Result<()> {
    let allocated = ctx.accounts.power_token_account.allocated_pw_tokens;
    require!(allocated > 0, ErrorCode::NothingToClaim);

    let (settled, base_minted) = ctx
        .accounts
        .settle_into_power_token(&ctx.bumps, allocated)?;
    ctx.accounts.power_token_account.take_allocated(settled)?;

    emit!(AllocatedPwTokensClaimed {
        account: ctx.accounts.owner.key(),
        amount: settled,
        base_minted,
    });
    Ok(())
}
