// libraries
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::math::bps_of;
use crate::states::{BondingCurve, Registry, UserPosition, VoteRecord};

// Read-only queries. None of these mutate ledger state; results go back
// through return data so off-chain callers can simulate them.

#[derive(AnchorSerialize)]
pub struct RageTaxQuote {
    pub would_trigger: bool,
    pub tax: u64,
}

#[derive(AnchorSerialize)]
pub struct UserVoteData {
    pub last_vote_time: i64,
    pub consecutive_days: u32,
}

fn return_value<T: AnchorSerialize>(value: &T) -> Result<()> {
    let data = value
        .try_to_vec()
        .map_err(|_| error!(ErrorCode::InvalidArgument))?;
    set_return_data(&data);
    Ok(())
}

/// Dry run of the sell-side rage decision for an arbitrary wallet.
pub fn handle_would_trigger_rage_tax(
    ctx: Context<QueryRageTax>,
    token_amount: u64,
) -> Result<()> {
    let curve_state = &ctx.accounts.curve_state;
    let info = ctx.accounts.user_position.to_account_info();
    // A wallet that never bought has no position account and no basis.
    let position = if info.data_is_empty() {
        UserPosition::default()
    } else {
        let data = info.try_borrow_data()?;
        let mut slice: &[u8] = &data;
        UserPosition::try_deserialize(&mut slice)?
    };

    let gross = curve_state.quote_sell_gross(token_amount)?;
    let would_trigger = position.would_trigger_rage(gross, token_amount);
    let tax = if would_trigger {
        bps_of(gross, RAGE_TAX_BPS)?
    } else {
        0
    };
    return_value(&RageTaxQuote { would_trigger, tax })
}

pub fn handle_get_current_price(ctx: Context<QueryCurve>) -> Result<()> {
    return_value(&ctx.accounts.curve_state.current_price()?)
}

pub fn handle_get_user_vote_data(ctx: Context<QueryVoteRecord>) -> Result<()> {
    let info = ctx.accounts.vote_record.to_account_info();
    let record = if info.data_is_empty() {
        VoteRecord::default()
    } else {
        let data = info.try_borrow_data()?;
        let mut slice: &[u8] = &data;
        VoteRecord::try_deserialize(&mut slice)?
    };
    return_value(&UserVoteData {
        last_vote_time: record.last_vote_time,
        consecutive_days: record.consecutive_days,
    })
}

pub fn handle_top_daily_screamers(ctx: Context<QueryRegistry>, limit: u32) -> Result<()> {
    return_value(&ctx.accounts.registry.top_daily(limit as usize))
}

pub fn handle_top_all_time_screamers(ctx: Context<QueryRegistry>, limit: u32) -> Result<()> {
    return_value(&ctx.accounts.registry.top_all_time(limit as usize))
}

#[derive(Accounts)]
pub struct QueryRageTax<'info> {
    #[account(
        seeds = [CURVE_SEED, curve_state.mint.as_ref()],
        bump = curve_state.bump
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,

    /// CHECK: the wallet being queried, no signature needed for a dry run
    pub user: UncheckedAccount<'info>,

    /// CHECK: absent until the wallet's first buy, which reads as no basis
    #[account(seeds = [curve_state.key().as_ref(), user.key().as_ref()], bump)]
    pub user_position: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct QueryCurve<'info> {
    #[account(
        seeds = [CURVE_SEED, curve_state.mint.as_ref()],
        bump = curve_state.bump
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,
}

#[derive(Accounts)]
pub struct QueryVoteRecord<'info> {
    #[account(
        seeds = [CURVE_SEED, curve_state.mint.as_ref()],
        bump = curve_state.bump
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,

    /// CHECK: the wallet being queried
    pub user: UncheckedAccount<'info>,

    /// CHECK: absent until the wallet's first scream for this token
    #[account(
        seeds = [SCREAM_SEED, curve_state.mint.as_ref(), user.key().as_ref()],
        bump
    )]
    pub vote_record: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct QueryRegistry<'info> {
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Box<Account<'info, Registry>>,
}
