use anchor_lang::prelude::*;

declare_id!("PwrMinRnhGq3tYD8xGTb4nCMa5mV3AKxaKdDrx7ZWLe");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("B8VmoTgg2arRfw7qQVTYK9GohYeyMEjaCSW6jVPVBUgV");
}

pub const AUTH_SEED: &str = "vault_and_reward_auth";
pub const STAKED_TOKEN_VAULT_SEED: &str = "staked_token_vault";
pub const REWARD_VAULT_SEED: &str = "reward_vault";
pub const LP_VAULT_SEED: &str = "lp_vault";

pub mod calculator;
pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;
use states::Cooldown;

#[program]
pub mod power_mining {

    use super::*;

    pub fn initialise_configs(
        ctx: Context<InitialiseConfigs>,
        admin: Pubkey,
        pause_manager: Pubkey,
    ) -> Result<()> {
        instructions::initialise_configs(ctx, admin, pause_manager)
    }

    pub fn transfer_ownership(ctx: Context<UpdateConfig>, appointed_admin: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, appointed_admin)
    }

    pub fn confirm_transfer_ownership(ctx: Context<ConfirmTransferOwnership>) -> Result<()> {
        instructions::confirm_transfer_ownership(ctx)
    }

    pub fn set_pause_manager(ctx: Context<UpdateConfig>, pause_manager: Pubkey) -> Result<()> {
        instructions::set_pause_manager(ctx, pause_manager)
    }

    pub fn pause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::pause(ctx)
    }

    pub fn unpause(ctx: Context<SetPaused>) -> Result<()> {
        instructions::unpause(ctx)
    }

    pub fn set_unstake_without_cooldown_fee(
        ctx: Context<UpdatePowerToken>,
        fee: u128,
    ) -> Result<()> {
        instructions::set_unstake_without_cooldown_fee(ctx, fee)
    }

    pub fn set_liquidity_mining(
        ctx: Context<UpdatePowerToken>,
        liquidity_mining: Pubkey,
    ) -> Result<()> {
        instructions::set_liquidity_mining(ctx, liquidity_mining)
    }

    pub fn set_power_token(ctx: Context<UpdateLiquidityMining>, power_token: Pubkey) -> Result<()> {
        instructions::set_power_token(ctx, power_token)
    }

    pub fn add_lp_token(ctx: Context<AddLpToken>) -> Result<()> {
        instructions::add_lp_token_asset(ctx)
    }

    pub fn remove_lp_token(ctx: Context<UpdateLpToken>) -> Result<()> {
        instructions::remove_lp_token_asset(ctx)
    }

    pub fn set_rewards_per_block(
        ctx: Context<UpdateLpToken>,
        rewards_per_block: u64,
    ) -> Result<()> {
        instructions::set_rewards_per_block(ctx, rewards_per_block)
    }

    pub fn initialize_account_indicators(ctx: Context<InitializeAccountIndicators>) -> Result<()> {
        instructions::initialize_account_indicators(ctx)
    }

    pub fn initialize_power_token_account(
        ctx: Context<InitializePowerTokenAccount>,
    ) -> Result<()> {
        instructions::initialize_power_token_account(ctx)
    }

    pub fn stake_lp_tokens(ctx: Context<StakeLpTokens>, amount: u64) -> Result<()> {
        instructions::stake_lp_tokens(ctx, amount)
    }

    pub fn unstake_lp_tokens(ctx: Context<UnstakeLpTokens>, amount: u64) -> Result<()> {
        instructions::unstake_lp_tokens(ctx, amount)
    }

    pub fn unstake_lp_tokens_and_allocate_pw_tokens(
        ctx: Context<UnstakeLpTokensAndAllocate>,
        amount: u64,
    ) -> Result<()> {
        instructions::unstake_lp_tokens_and_allocate_pw_tokens(ctx, amount)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim(ctx)
    }

    pub fn claim_allocated_pw_tokens(ctx: Context<RewardSettlement>) -> Result<()> {
        instructions::claim_allocated_pw_tokens(ctx)
    }

    pub fn update_indicators<'info>(
        ctx: Context<'_, '_, 'info, 'info, UpdateIndicators<'info>>,
        account: Pubkey,
        lp_mints: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::update_indicators(ctx, account, lp_mints)
    }

    pub fn stake(ctx: Context<StakePowerToken>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn unstake(ctx: Context<UnstakePowerToken>, amount: u128) -> Result<()> {
        instructions::unstake(ctx, amount)
    }

    pub fn cooldown(ctx: Context<ChangeCooldown>, amount: u128) -> Result<()> {
        instructions::cooldown(ctx, amount)
    }

    pub fn cancel_cooldown(ctx: Context<ChangeCooldown>) -> Result<()> {
        instructions::cancel_cooldown(ctx)
    }

    pub fn redeem(ctx: Context<UnstakePowerToken>) -> Result<()> {
        instructions::redeem(ctx)
    }

    pub fn delegate_to_liquidity_mining<'info>(
        ctx: Context<'_, '_, 'info, 'info, Delegation<'info>>,
        lp_mints: Vec<Pubkey>,
        pw_token_amounts: Vec<u128>,
    ) -> Result<()> {
        instructions::delegate_to_liquidity_mining(ctx, lp_mints, pw_token_amounts)
    }

    pub fn undelegate_from_liquidity_mining<'info>(
        ctx: Context<'_, '_, 'info, 'info, Delegation<'info>>,
        lp_mints: Vec<Pubkey>,
        pw_token_amounts: Vec<u128>,
    ) -> Result<()> {
        instructions::undelegate_from_liquidity_mining(ctx, lp_mints, pw_token_amounts)
    }

    pub fn delegate_and_stake_to_liquidity_mining<'info>(
        ctx: Context<'_, '_, 'info, 'info, DelegateAndStake<'info>>,
        lp_mints: Vec<Pubkey>,
        pw_token_amounts: Vec<u128>,
        lp_token_amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::delegate_and_stake_to_liquidity_mining(
            ctx,
            lp_mints,
            pw_token_amounts,
            lp_token_amounts,
        )
    }

    pub fn calculate_account_rewards(ctx: Context<ViewPosition>) -> Result<u128> {
        instructions::calculate_account_rewards(ctx)
    }

    pub fn calculate_accrued_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, ViewAccruedRewards<'info>>,
    ) -> Result<u128> {
        instructions::calculate_accrued_rewards(ctx)
    }

    pub fn get_global_indicators(ctx: Context<ViewPool>) -> Result<GlobalIndicatorsView> {
        instructions::get_global_indicators(ctx)
    }

    pub fn get_account_indicators(ctx: Context<ViewPosition>) -> Result<AccountIndicatorsView> {
        instructions::get_account_indicators(ctx)
    }

    pub fn balance_of(ctx: Context<ViewPosition>) -> Result<u128> {
        instructions::balance_of(ctx)
    }

    pub fn balance_of_delegated_pw_token(ctx: Context<ViewPosition>) -> Result<u128> {
        instructions::balance_of_delegated_pw_token(ctx)
    }

    pub fn is_lp_token_supported(ctx: Context<ViewLpTokenSupport>, lp_mint: Pubkey) -> Result<bool> {
        instructions::is_lp_token_supported(ctx, lp_mint)
    }

    pub fn calculate_exchange_rate(ctx: Context<ViewPowerToken>) -> Result<u128> {
        instructions::calculate_exchange_rate(ctx)
    }

    pub fn power_token_balance_of(ctx: Context<ViewHolder>) -> Result<u128> {
        instructions::power_token_balance_of(ctx)
    }

    pub fn balance_of_allocated_pw_tokens(ctx: Context<ViewHolder>) -> Result<u128> {
        instructions::balance_of_allocated_pw_tokens(ctx)
    }

    pub fn get_active_cooldown(ctx: Context<ViewHolder>) -> Result<Option<Cooldown>> {
        instructions::get_active_cooldown(ctx)
    }

    pub fn delegated_to_liquidity_mining_balance_of(ctx: Context<ViewHolder>) -> Result<u128> {
        instructions::delegated_to_liquidity_mining_balance_of(ctx)
    }
}
