use crate::error::ErrorCode;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// LiquidityMining Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the liquidity mining engine account.
pub const LIQUIDITY_MINING_SEED: &str = "liquidity_mining";

/// Singleton state of the liquidity mining engine.
///
/// Per-pool state lives in `GlobalIndicators`, per-position state in
/// `AccountIndicators`.
#[account]
#[derive(Default, Debug)]
pub struct LiquidityMining {
    /// PDA bump for this account.
    pub bump: u8,

    /// Staked-token vault funding every reward claim.
    pub reward_vault: Pubkey,

    /// The only Power Token account allowed to move delegations.
    pub power_token: Pubkey,

    /// Number of LP mints currently supported.
    pub lp_token_count: u32,
}

impl LiquidityMining {
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 2: two Pubkeys
    /// - 4: lp token count
    pub const LEN: usize = 8 + 1 + 32 * 2 + 4;

    /// Delegation ledger entry points accept calls from the configured Power Token only.
    pub fn authorize_power_token(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.power_token, ErrorCode::CallerNotPowerToken);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_delegation_caller() {
        let power_token = Pubkey::new_unique();
        let mining = LiquidityMining {
            power_token,
            ..Default::default()
        };
        assert!(mining.authorize_power_token(&power_token).is_ok());
        assert_eq!(
            mining.authorize_power_token(&Pubkey::new_unique()).unwrap_err(),
            error!(ErrorCode::CallerNotPowerToken)
        );
    }
}
