// libraries
use anchor_lang::prelude::*;

#[account]
#[derive(Default)]
pub struct GlobalState {
    /// Bump/nonce for the global state pda
    pub bump: u8,
    /// Bump/nonce for the shared mint authority pda
    pub mint_auth_bump: u8,
    /// Platform owner, the only identity allowed through the admin gates
    pub authority: Pubkey,

    pub dev_wallet: Pubkey,
    pub dev_fund: Pubkey,
    pub community_treasury: Pubkey,

    /// External constant-product AMM that curves migrate into
    pub amm_program: Pubkey,

    /// Pyth price account for the native asset / USD pair
    pub price_feed: Pubkey,
    /// When false the fixed fallback price is used even if the feed is live
    pub use_oracle: bool,

    pub migration_threshold_usd: u64,
    pub liquidity_seed_usd: u64,

    /// extra space
    pub reserved: [u64; 8],
}
