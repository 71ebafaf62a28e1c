// libraries
use anchor_lang::prelude::*;

use std::mem::size_of;
// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::{GlobalState, PriceFeed, Registry};

pub fn handle(
    ctx: Context<CreateGlobalState>,
    bump: u8,
    dev_wallet: Pubkey,
    dev_fund: Pubkey,
    community_treasury: Pubkey,
    amm_program: Pubkey,
) -> Result<()> {
    msg!("INITIALIZING GLOBAL STATE");

    require!(dev_wallet != Pubkey::default(), ErrorCode::InvalidAddress);
    require!(dev_fund != Pubkey::default(), ErrorCode::InvalidAddress);
    require!(community_treasury != Pubkey::default(), ErrorCode::InvalidAddress);
    require!(amm_program != Pubkey::default(), ErrorCode::InvalidAddress);

    let (_mint_auth_pda, mint_auth_bump) =
        Pubkey::find_program_address(&[MINT_AUTH_SEED], ctx.program_id);
    let (_registry_pda, registry_bump) =
        Pubkey::find_program_address(&[REGISTRY_SEED], ctx.program_id);

    let global_state = &mut ctx.accounts.global_state;
    global_state.bump = bump;
    global_state.mint_auth_bump = mint_auth_bump;
    global_state.authority = ctx.accounts.authority.key();
    global_state.dev_wallet = dev_wallet;
    global_state.dev_fund = dev_fund;
    global_state.community_treasury = community_treasury;
    global_state.amm_program = amm_program;
    global_state.price_feed = ctx.accounts.price_feed.key();
    global_state.use_oracle = true;
    global_state.migration_threshold_usd = DEFAULT_MIGRATION_THRESHOLD_USD;
    global_state.liquidity_seed_usd = DEFAULT_LIQUIDITY_SEED_USD;

    let registry = &mut ctx.accounts.registry;
    registry.bump = registry_bump;

    Ok(())
}

#[derive(Accounts)]
#[instruction(bump: u8)]
pub struct CreateGlobalState<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        seeds = [GLOBAL_STATE_SEED],
        bump,
        space = 8 + size_of::<GlobalState>()
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(
        init,
        payer = authority,
        seeds = [REGISTRY_SEED],
        bump,
        space = Registry::space_for(0)
    )]
    pub registry: Box<Account<'info, Registry>>,

    pub price_feed: Account<'info, PriceFeed>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
