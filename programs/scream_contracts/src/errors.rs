use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("You are not authorized to perform this action.")]
    Unauthorized,
    #[msg("Argument is invalid.")]
    InvalidArgument,
    #[msg("Address is invalid.")]
    InvalidAddress,
    #[msg("An overflow occurs.")]
    Overflow,
    #[msg("Slippage too high")]
    SlippageExceeded,
    #[msg("Already migrated")]
    AlreadyMigrated,
    #[msg("Migration threshold not reached")]
    ThresholdNotReached,
    #[msg("Reentrant call")]
    ReentrantCall,
    #[msg("Rage tax applies - sell again with the tax accepted")]
    RageTaxRequired,
    #[msg("Cooldown active - wait 24h")]
    CooldownActive,
    #[msg("Insufficient vote fee")]
    InsufficientFee,
    #[msg("Token is not registered")]
    UnknownToken,
    #[msg("Token registry is full")]
    TokenLimitReached,
    #[msg("No lamports sent")]
    ZeroDeposit,
    #[msg("No balance")]
    NoBalance,
    #[msg("Holder distribution has not started")]
    VestingNotStarted,
    #[msg("Pyth has an internal error.")]
    PythError,
    #[msg("Pyth price oracle is offline.")]
    PythOffline,
    #[msg("Program should not try to serialize a price account.")]
    TryToSerializePriceAccount,
}
