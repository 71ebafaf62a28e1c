// libraries
use anchor_lang::prelude::*;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::RageFundWithdrawn;
use crate::states::{GlobalState, RageFund};
use crate::utils::debit_program_account;

/// Owner escape hatch: drains one token's escrow in full. The fund's
/// lifetime total survives, so holder entitlements after a drain are
/// bounded by the (now empty) balance.
pub fn handle(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let amount = ctx.accounts.rage_fund.drain()?;

    debit_program_account(
        &ctx.accounts.rage_fund.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        amount,
    )?;

    emit!(RageFundWithdrawn {
        mint: ctx.accounts.rage_fund.mint,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        constraint = authority.key() == global_state.authority @ ErrorCode::Unauthorized
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(
        mut,
        seeds = [RAGE_FUND_SEED, rage_fund.mint.as_ref()],
        bump = rage_fund.bump
    )]
    pub rage_fund: Box<Account<'info, RageFund>>,
}
