use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

// PDA seed strings
pub const GLOBAL_STATE_SEED: &[u8] = b"global_state";
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const CURVE_SEED: &[u8] = b"curve";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";
pub const MINT_AUTH_SEED: &[u8] = b"mint_authority";
pub const RAGE_FUND_SEED: &[u8] = b"rage_fund";
pub const RAGE_CLAIM_SEED: &[u8] = b"rage_claim";
pub const SCREAM_SEED: &[u8] = b"scream";

// Token setup
pub const TOKEN_DECIMALS: u8 = 6;
pub const TOKEN_UNIT: u64 = 1_000_000;

/// Tokens sellable on the curve. The virtual reserve starts at the full
/// allocation, so `real_tokens_sold` can never reach it.
pub const CURVE_TOKEN_ALLOCATION: u64 = 800_000_000 * TOKEN_UNIT;
pub const INITIAL_VIRTUAL_TOKEN_RESERVE: u64 = CURVE_TOKEN_ALLOCATION;
pub const INITIAL_VIRTUAL_SOL_RESERVE: u64 = 30 * LAMPORTS_PER_SOL;

// Basis point denominator, 10_000 bps = 100.00%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Trading fee on every buy and sell, split 50/50 dev wallet / rage fund.
pub const TRADE_FEE_BPS: u64 = 40;

/// Extra tax on a sell realized more than 10% under the seller's average
/// cost, split 90/10 rage fund / dev wallet.
pub const RAGE_TAX_BPS: u64 = 200;
pub const RAGE_TAX_FUND_SHARE_BPS: u64 = 9_000;
pub const RAGE_TRIGGER_BPS: u64 = 9_000;

// Voting
pub const VOTE_FEE_LAMPORTS: u64 = 500_000; // 0.0005 SOL
pub const VOTE_COOLDOWN_SECS: i64 = 24 * 60 * 60;
pub const STREAK_WINDOW_SECS: i64 = 48 * 60 * 60;
pub const DAILY_WINDOW_SECS: i64 = 24 * 60 * 60;
pub const MAX_STREAK_POWER: u32 = 10;
pub const HOLDER_BONUS_MULTIPLIER: u64 = 2;

// Oracle / migration. USD amounts are 8-decimal fixed point, the scale the
// feed publishes at.
pub const USD_UNIT: u64 = 100_000_000;
pub const DEFAULT_MIGRATION_THRESHOLD_USD: u64 = 69_000 * USD_UNIT;
pub const DEFAULT_LIQUIDITY_SEED_USD: u64 = 12_000 * USD_UNIT;

/// Fixed price used whenever the live feed is disabled or stale.
pub const FALLBACK_SOL_PRICE_USD: u64 = 20 * USD_UNIT;
pub const ORACLE_MAX_AGE_SECS: u64 = 60;

// Rage fund holder distribution
pub const RAGE_VESTING_SECS: i64 = 90 * 24 * 60 * 60;

// Metadata limits
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_IMAGE_LEN: usize = 128;

/// Registry capacity. Bounds the realloc growth and the leaderboard scan.
pub const MAX_TOKENS: usize = 512;

/// Discriminator of the pool program's `create_pool_and_seed` entry point.
pub const CREATE_POOL_AND_SEED_DISCRIMINATOR: [u8; 8] = [211, 64, 37, 129, 92, 176, 8, 253];
