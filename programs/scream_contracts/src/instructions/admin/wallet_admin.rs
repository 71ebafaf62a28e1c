// libraries
use anchor_lang::prelude::*;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::GlobalState;

pub fn handle_set_dev_wallet(ctx: Context<AdminUpdate>, new_dev_wallet: Pubkey) -> Result<()> {
    require!(new_dev_wallet != Pubkey::default(), ErrorCode::InvalidAddress);
    ctx.accounts.global_state.dev_wallet = new_dev_wallet;
    Ok(())
}

pub fn handle_set_vote_wallets(
    ctx: Context<AdminUpdate>,
    dev_fund: Pubkey,
    community_treasury: Pubkey,
) -> Result<()> {
    require!(dev_fund != Pubkey::default(), ErrorCode::InvalidAddress);
    require!(community_treasury != Pubkey::default(), ErrorCode::InvalidAddress);
    let global_state = &mut ctx.accounts.global_state;
    global_state.dev_fund = dev_fund;
    global_state.community_treasury = community_treasury;
    Ok(())
}

pub fn handle_transfer_ownership(ctx: Context<AdminUpdate>, new_owner: Pubkey) -> Result<()> {
    require!(new_owner != Pubkey::default(), ErrorCode::InvalidAddress);
    ctx.accounts.global_state.authority = new_owner;
    msg!("ownership transferred to {}", new_owner);
    Ok(())
}

#[derive(Accounts)]
pub struct AdminUpdate<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        constraint = authority.key() == global_state.authority @ ErrorCode::Unauthorized
    )]
    pub global_state: Box<Account<'info, GlobalState>>,
}
