use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_block_number, to_internal_amount, transfer_from_user_to_pool_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Remaining accounts per entry of `delegate_to_liquidity_mining` and
/// `undelegate_from_liquidity_mining`: `[global_indicators, account_indicators]`.
pub const POSITION_ACCOUNTS: usize = 2;

/// Remaining accounts per entry of `delegate_and_stake_to_liquidity_mining`:
/// `[global_indicators, account_indicators, lp_mint, owner_lp_token, lp_vault]`.
pub const POSITION_AND_TOKEN_ACCOUNTS: usize = 5;

/// Pool and position of one entry, loaded from the remaining accounts.
pub(crate) struct Position<'info> {
    pub global_indicators: Account<'info, GlobalIndicators>,
    pub account_indicators: Account<'info, AccountIndicators>,
}

impl<'info> Position<'info> {
    /// Loads `infos[0..2]` and checks both belong to `lp_mint` and the
    /// position to `owner`.
    pub(crate) fn load(
        infos: &'info [AccountInfo<'info>],
        owner: &Pubkey,
        lp_mint: &Pubkey,
    ) -> Result<Self> {
        require!(
            infos.len() >= POSITION_ACCOUNTS
                && infos[..POSITION_ACCOUNTS].iter().all(|info| info.is_writable),
            ErrorCode::InvalidRemainingAccounts
        );
        let global_indicators = Account::<GlobalIndicators>::try_from(&infos[0])?;
        require_keys_eq!(global_indicators.lp_mint, *lp_mint, ErrorCode::AssetMismatch);
        let account_indicators = Account::<AccountIndicators>::try_from(&infos[1])?;
        account_indicators.require_position(owner, lp_mint)?;
        Ok(Self {
            global_indicators,
            account_indicators,
        })
    }

    /// Writes both accounts back so a later entry on the same pool reads
    /// the updated state.
    pub(crate) fn persist(&self) -> Result<()> {
        self.global_indicators.exit(&crate::ID)?;
        self.account_indicators.exit(&crate::ID)
    }
}

/// Accounts context shared by the delegation instructions.
///
/// Delegations move Power Token balance into the mining engine's ledger, so
/// the Power Token and the engine must be configured for each other.
#[derive(Accounts)]
pub struct Delegation<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [POWER_TOKEN_SEED.as_bytes()],
        bump = power_token.bump,
    )]
    pub power_token: Box<Account<'info, PowerToken>>,

    #[account(
        seeds = [LIQUIDITY_MINING_SEED.as_bytes()],
        bump = liquidity_mining.bump,
    )]
    pub liquidity_mining: Box<Account<'info, LiquidityMining>>,

    #[account(
        mut,
        seeds = [POWER_TOKEN_ACCOUNT_SEED.as_bytes(), owner.key().as_ref()],
        bump = power_token_account.bump,
    )]
    pub power_token_account: Box<Account<'info, PowerTokenAccount>>,

    /// Read to price the balance.
    #[account(
        address = power_token.staked_token_vault @ ErrorCode::InvalidVault,
    )]
    pub staked_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

impl<'info> Delegation<'info> {
    fn authorize(&self) -> Result<()> {
        self.global_config.require_not_paused()?;
        self.power_token
            .require_liquidity_mining(&self.liquidity_mining.key())?;
        self.liquidity_mining
            .authorize_power_token(&self.power_token.key())
    }

    fn exchange_rate(&self) -> Result<u128> {
        let backing = to_internal_amount(
            self.staked_token_vault.amount,
            self.power_token.staked_token_decimals,
        )?;
        self.power_token.exchange_rate(backing)
    }
}

/// Checks that every amount list matches `lp_mints` and that the remaining
/// accounts hold `accounts_per_entry` accounts per entry.
pub(crate) fn require_batch_shape(
    lp_mints: &[Pubkey],
    amount_lengths: &[usize],
    remaining_accounts: usize,
    accounts_per_entry: usize,
) -> Result<()> {
    require!(
        amount_lengths.iter().all(|len| *len == lp_mints.len()),
        ErrorCode::ArrayLengthMismatch
    );
    require!(
        lp_mints.len().checked_mul(accounts_per_entry) == Some(remaining_accounts),
        ErrorCode::InvalidRemainingAccounts
    );
    Ok(())
}

/// Total Power Tokens moved by a batch.
pub(crate) fn batch_total(amounts: &[u128]) -> Result<u128> {
    amounts.iter().try_fold(0u128, |total, amount| {
        total
            .checked_add(*amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    })
}

/// Delegates `pw_token_amounts[i]` Power Tokens to the pool of `lp_mints[i]`.
///
/// The sum must fit in the balance that is neither delegated nor cooling
/// down. Entries are applied in order; repeated pools accumulate.
pub fn delegate_to_liquidity_mining<'info>(
    ctx: Context<'_, '_, 'info, 'info, Delegation<'info>>,
    lp_mints: Vec<Pubkey>,
    pw_token_amounts: Vec<u128>,
) -> Result<()> {
    ctx.accounts.authorize()?;
    require_batch_shape(
        &lp_mints,
        &[pw_token_amounts.len()],
        ctx.remaining_accounts.len(),
        POSITION_ACCOUNTS,
    )?;

    let exchange_rate = ctx.accounts.exchange_rate()?;
    ctx.accounts
        .power_token_account
        .delegate(batch_total(&pw_token_amounts)?, exchange_rate)?;

    let owner = ctx.accounts.owner.key();
    let block_number = current_block_number()?;
    for ((lp_mint, amount), infos) in lp_mints
        .iter()
        .zip(pw_token_amounts.iter())
        .zip(ctx.remaining_accounts.chunks(POSITION_ACCOUNTS))
    {
        let mut position = Position::load(infos, &owner, lp_mint)?;
        position.account_indicators.delegate_entry(
            &mut position.global_indicators,
            block_number,
            *amount,
        )?;
        position.persist()?;

        emit!(PwTokenDelegated {
            account: owner,
            lp_mint: *lp_mint,
            pw_token_amount: *amount,
        });
    }
    Ok(())
}

/// Takes back `pw_token_amounts[i]` Power Tokens from the pool of `lp_mints[i]`.
/// Allowed on removed pools.
pub fn undelegate_from_liquidity_mining<'info>(
    ctx: Context<'_, '_, 'info, 'info, Delegation<'info>>,
    lp_mints: Vec<Pubkey>,
    pw_token_amounts: Vec<u128>,
) -> Result<()> {
    ctx.accounts.authorize()?;
    require_batch_shape(
        &lp_mints,
        &[pw_token_amounts.len()],
        ctx.remaining_accounts.len(),
        POSITION_ACCOUNTS,
    )?;

    ctx.accounts
        .power_token_account
        .undelegate(batch_total(&pw_token_amounts)?)?;

    let owner = ctx.accounts.owner.key();
    let block_number = current_block_number()?;
    for ((lp_mint, amount), infos) in lp_mints
        .iter()
        .zip(pw_token_amounts.iter())
        .zip(ctx.remaining_accounts.chunks(POSITION_ACCOUNTS))
    {
        let mut position = Position::load(infos, &owner, lp_mint)?;
        position.account_indicators.undelegate_entry(
            &mut position.global_indicators,
            block_number,
            *amount,
        )?;
        position.persist()?;

        emit!(PwTokenUndelegated {
            account: owner,
            lp_mint: *lp_mint,
            pw_token_amount: *amount,
        });
    }
    Ok(())
}

/// Accounts context for `delegate_and_stake_to_liquidity_mining`.
#[derive(Accounts)]
pub struct DelegateAndStake<'info> {
    pub delegation: Delegation<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Delegates Power Tokens and stakes LP tokens (token units) in one go,
/// entry by entry, with a single rebalance per entry.
pub fn delegate_and_stake_to_liquidity_mining<'info>(
    ctx: Context<'_, '_, 'info, 'info, DelegateAndStake<'info>>,
    lp_mints: Vec<Pubkey>,
    pw_token_amounts: Vec<u128>,
    lp_token_amounts: Vec<u64>,
) -> Result<()> {
    let delegation = &mut ctx.accounts.delegation;
    delegation.authorize()?;
    require_batch_shape(
        &lp_mints,
        &[pw_token_amounts.len(), lp_token_amounts.len()],
        ctx.remaining_accounts.len(),
        POSITION_AND_TOKEN_ACCOUNTS,
    )?;

    let exchange_rate = delegation.exchange_rate()?;
    delegation
        .power_token_account
        .delegate(batch_total(&pw_token_amounts)?, exchange_rate)?;

    let owner = delegation.owner.key();
    let block_number = current_block_number()?;
    for (((lp_mint, pw_token_amount), lp_token_amount), infos) in lp_mints
        .iter()
        .zip(pw_token_amounts.iter())
        .zip(lp_token_amounts.iter())
        .zip(ctx.remaining_accounts.chunks(POSITION_AND_TOKEN_ACCOUNTS))
    {
        let mut position = Position::load(infos, &owner, lp_mint)?;

        let lp_mint_account = InterfaceAccount::<Mint>::try_from(&infos[2])?;
        require_keys_eq!(lp_mint_account.key(), *lp_mint, ErrorCode::AssetMismatch);
        require_keys_eq!(
            infos[4].key(),
            position.global_indicators.lp_vault,
            ErrorCode::InvalidVault
        );

        let internal_lp_amount =
            to_internal_amount(*lp_token_amount, position.global_indicators.lp_decimals)?;
        position.account_indicators.delegate_and_stake(
            &mut position.global_indicators,
            block_number,
            *pw_token_amount,
            internal_lp_amount,
        )?;
        position.persist()?;

        transfer_from_user_to_pool_vault(
            ctx.accounts.delegation.owner.to_account_info(),
            infos[3].clone(),
            infos[4].clone(),
            infos[2].clone(),
            ctx.accounts.token_program.to_account_info(),
            *lp_token_amount,
            lp_mint_account.decimals,
        )?;

        emit!(PwTokenDelegatedAndLpTokenStaked {
            account: owner,
            lp_mint: *lp_mint,
            pw_token_amount: *pw_token_amount,
            lp_token_amount: *lp_token_amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::D18;

    fn pool(lp_mint: Pubkey) -> GlobalIndicators {
        GlobalIndicators {
            lp_mint,
            supported: true,
            rewards_per_block: 100_000_000,
            last_rebalance_block_number: 1,
            ..Default::default()
        }
    }

    #[test]
    fn batch_lists_must_line_up() {
        let lp_mints = [Pubkey::new_unique(), Pubkey::new_unique()];
        require_batch_shape(&lp_mints, &[2], 4, POSITION_ACCOUNTS).unwrap();
        require_batch_shape(&lp_mints, &[2, 2], 10, POSITION_AND_TOKEN_ACCOUNTS).unwrap();

        assert_eq!(
            require_batch_shape(&lp_mints, &[1], 4, POSITION_ACCOUNTS).unwrap_err(),
            error!(ErrorCode::ArrayLengthMismatch)
        );
        assert_eq!(
            require_batch_shape(&lp_mints, &[2, 3], 10, POSITION_AND_TOKEN_ACCOUNTS)
                .unwrap_err(),
            error!(ErrorCode::ArrayLengthMismatch)
        );
        assert_eq!(
            require_batch_shape(&lp_mints, &[2], 3, POSITION_ACCOUNTS).unwrap_err(),
            error!(ErrorCode::InvalidRemainingAccounts)
        );
    }

    #[test]
    fn batch_total_rejects_overflow() {
        assert_eq!(batch_total(&[]).unwrap(), 0);
        assert_eq!(batch_total(&[D18, 2 * D18]).unwrap(), 3 * D18);
        assert_eq!(
            batch_total(&[u128::MAX, 1]).unwrap_err(),
            error!(ErrorCode::MathOverflow)
        );
    }

    #[test]
    fn repeated_pool_accumulates_on_one_position() {
        let owner = Pubkey::new_unique();
        let lp_mint = Pubkey::new_unique();
        let mut holder = PowerTokenAccount {
            owner,
            base_balance: 10 * D18,
            ..Default::default()
        };
        let mut global = pool(lp_mint);
        let mut position = AccountIndicators {
            owner,
            lp_mint,
            ..Default::default()
        };
        position.stake_lp(&mut global, 1, 4 * D18).unwrap();

        let lp_mints = [lp_mint, lp_mint];
        let amounts = [D18, 3 * D18];
        require_batch_shape(&lp_mints, &[amounts.len()], 4, POSITION_ACCOUNTS).unwrap();
        holder
            .delegate(batch_total(&amounts).unwrap(), D18)
            .unwrap();
        for (lp_mint, amount) in lp_mints.iter().zip(amounts) {
            position.require_position(&owner, lp_mint).unwrap();
            position.delegate_entry(&mut global, 5, amount).unwrap();
        }

        assert_eq!(holder.delegated_to_liquidity_mining, 4 * D18);
        assert_eq!(position.delegated_pw_token_balance, 4 * D18);
        // ratio 1 doubles the weight
        assert_eq!(position.power_up, 8 * D18);
        assert_eq!(global.aggregated_power_up, position.power_up);
    }

    #[test]
    fn undelegate_batch_cannot_exceed_delegated_total() {
        let mut holder = PowerTokenAccount {
            base_balance: 10 * D18,
            ..Default::default()
        };
        holder.delegate(5 * D18, D18).unwrap();

        // each entry fits on its own, the sum does not
        assert_eq!(
            holder
                .undelegate(batch_total(&[3 * D18, 3 * D18]).unwrap())
                .unwrap_err(),
            error!(ErrorCode::InsufficientDelegatedBalance)
        );
        assert_eq!(holder.delegated_to_liquidity_mining, 5 * D18);

        holder
            .undelegate(batch_total(&[2 * D18, 3 * D18]).unwrap())
            .unwrap();
        assert_eq!(holder.delegated_to_liquidity_mining, 0);
    }

    #[test]
    fn delegate_batch_respects_available_balance() {
        let mut holder = PowerTokenAccount {
            base_balance: 4 * D18,
            ..Default::default()
        };
        holder.start_cooldown(D18, D18, 0).unwrap();
        assert_eq!(
            holder
                .delegate(batch_total(&[2 * D18, 2 * D18]).unwrap(), D18)
                .unwrap_err(),
            error!(ErrorCode::InsufficientDelegatableBalance)
        );
        holder
            .delegate(batch_total(&[2 * D18, D18]).unwrap(), D18)
            .unwrap();
    }
}
