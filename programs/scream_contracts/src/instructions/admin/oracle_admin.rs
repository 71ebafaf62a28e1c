// libraries
use anchor_lang::prelude::*;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::{GlobalState, PriceFeed};

pub fn handle_set_oracle(ctx: Context<SetOracle>) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;
    global_state.price_feed = ctx.accounts.price_feed.key();
    msg!("price feed updated to {}", global_state.price_feed);
    Ok(())
}

pub fn handle_set_oracle_mode(ctx: Context<UpdateOracleMode>, enabled: bool) -> Result<()> {
    ctx.accounts.global_state.use_oracle = enabled;
    Ok(())
}

#[derive(Accounts)]
pub struct SetOracle<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        constraint = authority.key() == global_state.authority @ ErrorCode::Unauthorized
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    // Deserializing through the wrapper proves this is a real price account
    pub price_feed: Account<'info, PriceFeed>,
}

#[derive(Accounts)]
pub struct UpdateOracleMode<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        constraint = authority.key() == global_state.authority @ ErrorCode::Unauthorized
    )]
    pub global_state: Box<Account<'info, GlobalState>>,
}
