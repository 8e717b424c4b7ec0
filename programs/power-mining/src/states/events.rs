use crate::states::Cooldown;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: emitted for off-chain indexers and clients
// ──────────────────────────────────────────────────────────────────────────────
//
// Token amounts are in token units (`u64`), Power Token and reward amounts in
// 18-decimal internal units (`u128`).

/// Emitted once by `initialise_configs`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub staked_token_mint: Pubkey,
    pub power_token: Pubkey,
    pub liquidity_mining: Pubkey,
    /// Vault backing the Power Token.
    pub staked_token_vault: Pubkey,
    /// Vault funding mining rewards.
    pub reward_vault: Pubkey,
    pub unstake_without_cooldown_fee: u128,
}

// ── Liquidity mining ──────────────────────────────────────────────────────────

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct LpTokensStaked {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub lp_token_amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct LpTokensUnstaked {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub lp_token_amount: u64,
}

/// Rewards moved from the mining ledger into the Power Token vault.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Claimed {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    /// Rewards settled into Power Token balance.
    pub rewards: u128,
    /// Base shares minted for them.
    pub base_minted: u128,
}

/// Rewards parked in the allocated bucket on unstake.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PwTokensAllocated {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub allocated: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsPerBlockChanged {
    pub lp_mint: Pubkey,
    pub old_rewards_per_block: u64,
    pub new_rewards_per_block: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct LpTokenAdded {
    pub lp_mint: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct LpTokenRemoved {
    pub lp_mint: Pubkey,
}

/// Emitted per position by `update_indicators`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct IndicatorsUpdated {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub power_up: u128,
    pub rewards: u128,
}

// ── Delegation ────────────────────────────────────────────────────────────────

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PwTokenDelegated {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub pw_token_amount: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PwTokenDelegatedAndLpTokenStaked {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub pw_token_amount: u128,
    pub lp_token_amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PwTokenUndelegated {
    pub account: Pubkey,
    pub lp_mint: Pubkey,
    pub pw_token_amount: u128,
}

// ── Power Token vault ─────────────────────────────────────────────────────────

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub account: Pubkey,
    pub staked_token_amount: u64,
    pub base_minted: u128,
    pub exchange_rate: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Unstaked {
    pub account: Pubkey,
    pub pw_token_amount: u128,
    /// Part of the amount kept by the vault.
    pub fee: u128,
    /// Staked tokens actually transferred out.
    pub staked_token_amount: u64,
    pub exchange_rate: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct CooldownChanged {
    pub account: Pubkey,
    /// `None` when the cooldown was cancelled.
    pub cooldown: Option<Cooldown>,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Redeem {
    pub account: Pubkey,
    pub pw_token_amount: u128,
    pub staked_token_amount: u64,
    pub exchange_rate: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct AllocatedPwTokensClaimed {
    pub account: Pubkey,
    pub amount: u128,
    pub base_minted: u128,
}

// ── Administration ────────────────────────────────────────────────────────────

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct UnstakeWithoutCooldownFeeChanged {
    pub old_fee: u128,
    pub new_fee: u128,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct LiquidityMiningChanged {
    pub old_liquidity_mining: Pubkey,
    pub new_liquidity_mining: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PowerTokenChanged {
    pub old_power_token: Pubkey,
    pub new_power_token: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PauseManagerChanged {
    pub pause_manager: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct AppointedToTransferOwnership {
    pub appointed_admin: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct OwnershipTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Paused {
    pub pause_manager: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Unpaused {
    pub pause_manager: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::PowerTokenAccount;
    use crate::utils::math::D18;
    use anchor_lang::Event;

    #[test]
    fn cancelled_cooldown_is_reported_without_payload() {
        let mut holder = PowerTokenAccount {
            base_balance: D18,
            ..Default::default()
        };
        let started = holder.start_cooldown(D18 / 2, D18, 0).unwrap();
        let account = Pubkey::new_unique();

        let changed = CooldownChanged {
            account,
            cooldown: Some(started),
        }
        .data();
        holder.cancel_cooldown().unwrap();
        let cancelled = CooldownChanged {
            account,
            cooldown: holder.cooldown,
        }
        .data();

        let header = CooldownChanged::DISCRIMINATOR.len() + 32;
        assert_eq!(cancelled.len(), header + 1);
        assert_eq!(cancelled[header], 0);
        assert_eq!(changed.len(), header + 1 + Cooldown::LEN);
        assert_eq!(changed[header], 1);
    }
}
