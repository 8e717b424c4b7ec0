use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Input arrays must have the same length")]
    ArrayLengthMismatch,

    #[msg("LP token is not supported by liquidity mining")]
    LpTokenNotSupported,

    #[msg("LP token is already supported")]
    LpTokenAlreadySupported,

    #[msg("Staked LP token balance is too low")]
    InsufficientLpTokenBalance,

    #[msg("Available Power Token balance is too low")]
    InsufficientAvailableBalance,

    #[msg("Power Token balance available for delegation is too low")]
    InsufficientDelegatableBalance,

    #[msg("Delegated Power Token balance is too low")]
    InsufficientDelegatedBalance,

    #[msg("Fee must not exceed 100%")]
    FeeOutOfRange,

    #[msg("Mint decimals are not supported")]
    InvalidDecimals,

    #[msg("Remaining accounts do not match the requested assets")]
    InvalidRemainingAccounts,

    #[msg("Account does not belong to the requested asset or owner")]
    AssetMismatch,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Invalid staked token mint")]
    InvalidStakedTokenMint,

    #[msg("Caller is not the admin")]
    InvalidOwner,

    #[msg("Caller is not the appointed owner")]
    CallerNotAppointedOwner,

    #[msg("Caller is not the pause manager")]
    CallerNotPauseManager,

    #[msg("Caller is not the Power Token")]
    CallerNotPowerToken,

    #[msg("Liquidity mining account is not the one configured in Power Token")]
    InvalidLiquidityMining,

    #[msg("Cooldown has not finished yet")]
    CooldownNotFinished,

    #[msg("No active cooldown")]
    NoActiveCooldown,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Block number is lower than the last rebalance block")]
    BlockNumberRegressed,

    #[msg("Contract is paused")]
    Paused,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,
}
