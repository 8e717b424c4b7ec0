use crate::error::ErrorCode;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

/// Roles and the pause switch shared by the Power Token vault and the
/// liquidity mining engine.
///
/// Created once by `initialise_configs`. Ownership moves in two steps: the
/// current admin appoints a successor, who then confirms.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account.
    pub bump: u8,

    /// Current admin of the protocol.
    pub admin: Pubkey,

    /// Successor appointed by `transfer_ownership`, `Pubkey::default()` when none.
    pub appointed_admin: Pubkey,

    /// Account allowed to pause and unpause user operations.
    pub pause_manager: Pubkey,

    /// While set, every user-facing mutating instruction fails.
    pub paused: bool,

    /// Mint of the token backing the Power Token and paying rewards.
    pub staked_token_mint: Pubkey,
}

impl GlobalConfig {
    /// Fixed serialized size of the account.
    ///
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 4: four Pubkeys
    /// - 1: paused flag
    pub const LEN: usize = 8 + 1 + 32 * 4 + 1;

    /// The stored admin or the program-level admin.
    pub fn is_admin(&self, key: &Pubkey) -> bool {
        *key == self.admin || *key == crate::admin::id()
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.paused, ErrorCode::Paused);
        Ok(())
    }

    pub fn appoint_admin(&mut self, appointed: Pubkey) -> Result<()> {
        require_keys_neq!(appointed, Pubkey::default());
        self.appointed_admin = appointed;
        Ok(())
    }

    /// Completes a transfer started by `appoint_admin`; returns the previous admin.
    pub fn confirm_admin(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        require!(
            self.appointed_admin != Pubkey::default() && *caller == self.appointed_admin,
            ErrorCode::CallerNotAppointedOwner
        );
        let previous = self.admin;
        self.admin = self.appointed_admin;
        self.appointed_admin = Pubkey::default();
        Ok(previous)
    }

    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        require!(
            *caller == self.pause_manager,
            ErrorCode::CallerNotPauseManager
        );
        self.paused = paused;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GlobalConfig {
        GlobalConfig {
            admin: Pubkey::new_unique(),
            pause_manager: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn ownership_moves_only_after_confirmation() {
        let mut config = config();
        let original = config.admin;
        let successor = Pubkey::new_unique();

        config.appoint_admin(successor).unwrap();
        assert_eq!(config.admin, original);
        assert!(config.confirm_admin(&Pubkey::new_unique()).is_err());

        assert_eq!(config.confirm_admin(&successor).unwrap(), original);
        assert_eq!(config.admin, successor);
        assert_eq!(config.appointed_admin, Pubkey::default());
        assert!(config.confirm_admin(&successor).is_err());
    }

    #[test]
    fn only_pause_manager_toggles_pause() {
        let mut config = config();
        let manager = config.pause_manager;
        let admin = config.admin;

        assert!(config.set_paused(&admin, true).is_err());
        config.set_paused(&manager, true).unwrap();
        assert!(config.require_not_paused().is_err());
        config.set_paused(&manager, false).unwrap();
        assert!(config.require_not_paused().is_ok());
    }

    #[test]
    fn program_admin_is_always_admin() {
        let config = config();
        assert!(config.is_admin(&crate::admin::id()));
        assert!(config.is_admin(&config.admin));
        assert!(!config.is_admin(&config.pause_manager));
    }
}
