// libraries
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use std::mem::size_of;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::TokenScreamed;
use crate::states::{scream_power, vote_fee_split, GlobalState, Registry, VoteRecord};
use crate::utils::{holds_token, transfer_lamports};

pub fn handle(ctx: Context<Scream>, fee_lamports: u64) -> Result<()> {
    require!(fee_lamports >= VOTE_FEE_LAMPORTS, ErrorCode::InsufficientFee);
    let now = Clock::get()?.unix_timestamp;
    let mint_key = ctx.accounts.mint.key();
    let voter_key = ctx.accounts.voter.key();

    let vote_record = &mut ctx.accounts.vote_record;
    if vote_record.voter == Pubkey::default() {
        let (_pda, bump) = Pubkey::find_program_address(
            &[SCREAM_SEED, mint_key.as_ref(), voter_key.as_ref()],
            ctx.program_id,
        );
        vote_record.bump = bump;
        vote_record.voter = voter_key;
        vote_record.mint = mint_key;
    }
    let streak = vote_record.register(now)?;

    let is_holder = holds_token(
        &ctx.accounts.voter_token_ata.to_account_info(),
        &mint_key,
        &voter_key,
    );
    let power = scream_power(streak, is_holder);

    let entry = ctx.accounts.registry.entry_mut(&mint_key)?;
    entry.apply_scream(power, now)?;
    let daily_screams = entry.daily_screams;
    let total_screams = entry.total_screams;

    // Paid out in the same atomic unit as the vote itself.
    let (dev_share, fund_share, treasury_share) = vote_fee_split(fee_lamports);
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.voter.to_account_info(),
        &ctx.accounts.dev_wallet.to_account_info(),
        dev_share,
    )?;
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.voter.to_account_info(),
        &ctx.accounts.dev_fund.to_account_info(),
        fund_share,
    )?;
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.voter.to_account_info(),
        &ctx.accounts.community_treasury.to_account_info(),
        treasury_share,
    )?;

    emit!(TokenScreamed {
        mint: mint_key,
        voter: voter_key,
        scream_power: power,
        consecutive_days: streak,
        daily_screams,
        total_screams,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Scream<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(seeds = [GLOBAL_STATE_SEED], bump = global_state.bump)]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Box<Account<'info, Registry>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = voter,
        seeds = [SCREAM_SEED, mint.key().as_ref(), voter.key().as_ref()],
        bump,
        space = 8 + size_of::<VoteRecord>()
    )]
    pub vote_record: Box<Account<'info, VoteRecord>>,

    /// CHECK: read leniently, only to detect the holder bonus
    pub voter_token_ata: UncheckedAccount<'info>,

    /// CHECK: enforced against the configured dev wallet
    #[account(mut, constraint = dev_wallet.key() == global_state.dev_wallet @ ErrorCode::InvalidAddress)]
    pub dev_wallet: UncheckedAccount<'info>,

    /// CHECK: enforced against the configured development fund
    #[account(mut, constraint = dev_fund.key() == global_state.dev_fund @ ErrorCode::InvalidAddress)]
    pub dev_fund: UncheckedAccount<'info>,

    /// CHECK: enforced against the configured community treasury
    #[account(mut, constraint = community_treasury.key() == global_state.community_treasury @ ErrorCode::InvalidAddress)]
    pub community_treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
