use crate::error::ErrorCode;
use crate::instructions::{Position, POSITION_ACCOUNTS};
use crate::states::*;
use crate::utils::current_block_number;
use anchor_lang::prelude::*;

/// Accounts context for `update_indicators`. Anyone may trigger it; the
/// positions are passed as remaining accounts, two per pool:
/// `[global_indicators, account_indicators]`.
#[derive(Accounts)]
pub struct UpdateIndicators<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,
}

/// Settles the positions of `account` in the pools of `lp_mints` up to the
/// current block without changing any balance.
pub fn update_indicators<'info>(
    ctx: Context<'_, '_, 'info, 'info, UpdateIndicators<'info>>,
    account: Pubkey,
    lp_mints: Vec<Pubkey>,
) -> Result<()> {
    ctx.accounts.global_config.require_not_paused()?;
    require!(
        ctx.remaining_accounts.len() == lp_mints.len() * POSITION_ACCOUNTS,
        ErrorCode::InvalidRemainingAccounts
    );

    let block_number = current_block_number()?;
    for (lp_mint, infos) in lp_mints
        .iter()
        .zip(ctx.remaining_accounts.chunks(POSITION_ACCOUNTS))
    {
        let mut position = Position::load(infos, &account, lp_mint)?;
        position
            .account_indicators
            .settle(&mut position.global_indicators, block_number)?;
        position.persist()?;

        emit!(IndicatorsUpdated {
            account,
            lp_mint: *lp_mint,
            power_up: position.account_indicators.power_up,
            rewards: position.account_indicators.rewards,
        });
    }
    Ok(())
}
