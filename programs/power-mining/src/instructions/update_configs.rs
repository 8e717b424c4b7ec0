use crate::error::ErrorCode;
use crate::states::*;
use anchor_lang::prelude::*;

/// Accounts context for role changes made by the admin.
///
/// # Accounts
/// - `owner`: Must be either the stored admin or the program's hardcoded admin.
/// - `global_config`: Role configuration being updated.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Authorized signer: must be the stored admin or the hardcoded program admin.
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

/// Appoints `appointed_admin` as the next admin. Takes effect once confirmed.
pub fn transfer_ownership(ctx: Context<UpdateConfig>, appointed_admin: Pubkey) -> Result<()> {
    ctx.accounts.global_config.appoint_admin(appointed_admin)?;
    emit!(AppointedToTransferOwnership { appointed_admin });
    Ok(())
}

pub fn set_pause_manager(ctx: Context<UpdateConfig>, pause_manager: Pubkey) -> Result<()> {
    require_keys_neq!(pause_manager, Pubkey::default());
    ctx.accounts.global_config.pause_manager = pause_manager;
    emit!(PauseManagerChanged { pause_manager });
    Ok(())
}

/// Accounts context for `confirm_transfer_ownership`, signed by the appointee.
#[derive(Accounts)]
pub struct ConfirmTransferOwnership<'info> {
    pub appointed_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn confirm_transfer_ownership(ctx: Context<ConfirmTransferOwnership>) -> Result<()> {
    let new_admin = ctx.accounts.appointed_admin.key();
    let previous_admin = ctx.accounts.global_config.confirm_admin(&new_admin)?;
    emit!(OwnershipTransferred {
        previous_admin,
        new_admin,
    });
    Ok(())
}

/// Accounts context for `pause` / `unpause`.
#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub pause_manager: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn pause(ctx: Context<SetPaused>) -> Result<()> {
    let pause_manager = ctx.accounts.pause_manager.key();
    ctx.accounts.global_config.set_paused(&pause_manager, true)?;
    emit!(Paused { pause_manager });
    Ok(())
}

pub fn unpause(ctx: Context<SetPaused>) -> Result<()> {
    let pause_manager = ctx.accounts.pause_manager.key();
    ctx.accounts.global_config.set_paused(&pause_manager, false)?;
    emit!(Unpaused { pause_manager });
    Ok(())
}

/// Accounts context for admin changes to the Power Token vault.
#[derive(Accounts)]
pub struct UpdatePowerToken<'info> {
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Account<'info, PowerToken>,
}

/// Sets the fee of unstakes that skip the cooldown (1e18 = 100%).
pub fn set_unstake_without_cooldown_fee(ctx: Context<UpdatePowerToken>, fee: u128) -> Result<()> {
    let power_token = &mut ctx.accounts.power_token;
    let old_fee = power_token.unstake_without_cooldown_fee;
    power_token.set_unstake_without_cooldown_fee(fee)?;
    emit!(UnstakeWithoutCooldownFeeChanged {
        old_fee,
        new_fee: fee,
    });
    Ok(())
}

/// Points the Power Token at another liquidity mining engine.
pub fn set_liquidity_mining(ctx: Context<UpdatePowerToken>, liquidity_mining: Pubkey) -> Result<()> {
    require_keys_neq!(liquidity_mining, Pubkey::default());
    let power_token = &mut ctx.accounts.power_token;
    let old_liquidity_mining = power_token.liquidity_mining;
    power_token.liquidity_mining = liquidity_mining;
    emit!(LiquidityMiningChanged {
        old_liquidity_mining,
        new_liquidity_mining: liquidity_mining,
    });
    Ok(())
}

/// Accounts context for admin changes to the liquidity mining engine.
#[derive(Accounts)]
pub struct UpdateLiquidityMining<'info> {
    #[account(
        constraint = global_config.is_admin(&owner.key()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
    )]
    pub liquidity_mining: Account<'info, LiquidityMining>,
}

/// Changes which Power Token may move delegations.
pub fn set_power_token(ctx: Context<UpdateLiquidityMining>, power_token: Pubkey) -> Result<()> {
    require_keys_neq!(power_token, Pubkey::default());
    let liquidity_mining = &mut ctx.accounts.liquidity_mining;
    let old_power_token = liquidity_mining.power_token;
    liquidity_mining.power_token = power_token;
    emit!(PowerTokenChanged {
        old_power_token,
        new_power_token: power_token,
    });
    Ok(())
}
