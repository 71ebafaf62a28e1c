// libraries
use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use std::mem::size_of;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::RageFundClaimed;
use crate::states::{BondingCurve, RageClaim, RageFund};
use crate::utils::debit_program_account;

/// Holder distribution: proportional to the claimant's balance over the
/// tokens outstanding, vesting linearly from migration. The per-user claim
/// record makes repeat calls pay only the newly vested delta.
pub fn handle(ctx: Context<ClaimRageFund>) -> Result<()> {
    let rage_fund = &mut ctx.accounts.rage_fund;
    require!(rage_fund.vesting_start != 0, ErrorCode::VestingNotStarted);

    let now = Clock::get()?.unix_timestamp;
    let amount = rage_fund.claimable(
        now,
        ctx.accounts.claimant_token_ata.amount,
        ctx.accounts.curve_state.real_tokens_sold,
        ctx.accounts.rage_claim.claimed,
    )?;
    require!(amount > 0, ErrorCode::NoBalance);

    let mint_key = rage_fund.mint;
    let claimant_key = ctx.accounts.claimant.key();
    let rage_claim = &mut ctx.accounts.rage_claim;
    if rage_claim.authority == Pubkey::default() {
        let (_pda, bump) = Pubkey::find_program_address(
            &[RAGE_CLAIM_SEED, mint_key.as_ref(), claimant_key.as_ref()],
            ctx.program_id,
        );
        rage_claim.bump = bump;
        rage_claim.fund = rage_fund.key();
        rage_claim.authority = claimant_key;
    }
    rage_claim.claimed = rage_claim
        .claimed
        .checked_add(amount)
        .ok_or(ErrorCode::Overflow)?;
    rage_fund.record_claim(amount)?;

    debit_program_account(
        &rage_fund.to_account_info(),
        &ctx.accounts.claimant.to_account_info(),
        amount,
    )?;

    emit!(RageFundClaimed {
        mint: mint_key,
        claimant: claimant_key,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimRageFund<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        seeds = [CURVE_SEED, curve_state.mint.as_ref()],
        bump = curve_state.bump
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,

    #[account(
        mut,
        seeds = [RAGE_FUND_SEED, curve_state.mint.as_ref()],
        bump = rage_fund.bump
    )]
    pub rage_fund: Box<Account<'info, RageFund>>,

    #[account(
        init_if_needed,
        payer = claimant,
        seeds = [RAGE_CLAIM_SEED, curve_state.mint.as_ref(), claimant.key().as_ref()],
        bump,
        space = 8 + size_of::<RageClaim>()
    )]
    pub rage_claim: Box<Account<'info, RageClaim>>,

    #[account(
        constraint = claimant_token_ata.mint == curve_state.mint @ ErrorCode::InvalidAddress,
        constraint = claimant_token_ata.owner == claimant.key() @ ErrorCode::Unauthorized
    )]
    pub claimant_token_ata: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
