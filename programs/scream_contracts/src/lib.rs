// libraries
use anchor_lang::prelude::*;

//local imports
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod states;
pub mod types;
pub mod utils;

// crates
use crate::instructions::*;
use crate::utils::*;

#[cfg(feature = "dev")]
declare_id!("D1F2ffgFrSkDW8TdnWv8dsvCtKHRwQpimgpcYeFPVKF4");

#[cfg(feature = "prod")]
declare_id!("GgumMKBeidaDAeMFHxP4ejUsoHBkMYnihxLCzVzpNJzv");

#[program]
pub mod scream_contracts {

    use super::*;

    /**
     * Create global state account
     * This account holds all of the platform wiring: owner, payout
     * wallets, the price feed and the external pool program
     *
     * Should only be called once, by the platform owner
     */
    pub fn create_global_state(
        ctx: Context<CreateGlobalState>,
        bump: u8,
        dev_wallet: Pubkey,
        dev_fund: Pubkey,
        community_treasury: Pubkey,
        amm_program: Pubkey,
    ) -> Result<()> {
        create_global_state::handle(ctx, bump, dev_wallet, dev_fund, community_treasury, amm_program)
    }

    /**
     * Launch a token: fresh mint plus a bonding curve at the canonical
     * reserves, registered for voting and leaderboards
     *
     * Permissionless; fails only on malformed metadata
     */
    pub fn create_token(
        ctx: Context<CreateToken>,
        name: String,
        symbol: String,
        image_ref: String,
    ) -> Result<()> {
        create_token::handle(ctx, name, symbol, image_ref)
    }

    /**
     * Buy from the curve with lamports
     *
     * A purchase that crosses the migration threshold finishes the
     * migration before returning
     */
    #[access_control(curve_active(&ctx.accounts.curve_state))]
    pub fn buy(ctx: Context<Buy>, sol_amount: u64, min_tokens_out: u64) -> Result<()> {
        buy::handle(ctx, sol_amount, min_tokens_out)
    }

    /**
     * Sell back into the curve
     *
     * A sell realizing more than 10% under the seller's average cost
     * requires `accept_rage_tax`
     */
    #[access_control(curve_active(&ctx.accounts.curve_state))]
    pub fn sell(
        ctx: Context<Sell>,
        token_amount: u64,
        min_sol_out: u64,
        accept_rage_tax: bool,
    ) -> Result<()> {
        sell::handle(ctx, token_amount, min_sol_out, accept_rage_tax)
    }

    /**
     * Move the liquidity allocation to the external pool once the
     * USD threshold is met. Idempotent
     */
    pub fn migrate_curve(ctx: Context<Migrate>) -> Result<()> {
        migrate::handle(ctx)
    }

    /**
     * Paid vote for a token. One per 24h per (voter, token); consecutive
     * days build a streak, holders scream twice as loud
     */
    pub fn scream_for_token(ctx: Context<Scream>, fee_lamports: u64) -> Result<()> {
        scream::handle(ctx, fee_lamports)
    }

    /**
     * Holder claim on the token's rage fund, vested from migration
     */
    pub fn claim_rage_fund(ctx: Context<ClaimRageFund>) -> Result<()> {
        claim_rage::handle(ctx)
    }

    /**
     * Owner drain of one token's rage fund escrow
     */
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        emergency_withdraw::handle(ctx)
    }

    /**
     * Point the platform at a different price account
     *
     * Should only be called by the owner
     */
    pub fn set_oracle(ctx: Context<SetOracle>) -> Result<()> {
        oracle_admin::handle_set_oracle(ctx)
    }

    pub fn enable_oracle(ctx: Context<UpdateOracleMode>) -> Result<()> {
        oracle_admin::handle_set_oracle_mode(ctx, true)
    }

    /**
     * Force the fixed fallback thresholds even while the feed is healthy
     */
    pub fn disable_oracle(ctx: Context<UpdateOracleMode>) -> Result<()> {
        oracle_admin::handle_set_oracle_mode(ctx, false)
    }

    pub fn set_dev_wallet(ctx: Context<AdminUpdate>, new_dev_wallet: Pubkey) -> Result<()> {
        wallet_admin::handle_set_dev_wallet(ctx, new_dev_wallet)
    }

    pub fn set_vote_wallets(
        ctx: Context<AdminUpdate>,
        dev_fund: Pubkey,
        community_treasury: Pubkey,
    ) -> Result<()> {
        wallet_admin::handle_set_vote_wallets(ctx, dev_fund, community_treasury)
    }

    pub fn transfer_ownership(ctx: Context<AdminUpdate>, new_owner: Pubkey) -> Result<()> {
        wallet_admin::handle_transfer_ownership(ctx, new_owner)
    }

    /**
     * Dry run of the rage decision for a wallet, without mutating state
     */
    pub fn would_trigger_rage_tax(ctx: Context<QueryRageTax>, token_amount: u64) -> Result<()> {
        views::handle_would_trigger_rage_tax(ctx, token_amount)
    }

    pub fn get_current_price(ctx: Context<QueryCurve>) -> Result<()> {
        views::handle_get_current_price(ctx)
    }

    pub fn get_user_vote_data(ctx: Context<QueryVoteRecord>) -> Result<()> {
        views::handle_get_user_vote_data(ctx)
    }

    pub fn top_daily_screamers(ctx: Context<QueryRegistry>, limit: u32) -> Result<()> {
        views::handle_top_daily_screamers(ctx, limit)
    }

    pub fn top_all_time_screamers(ctx: Context<QueryRegistry>, limit: u32) -> Result<()> {
        views::handle_top_all_time_screamers(ctx, limit)
    }
}
