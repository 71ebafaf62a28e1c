// libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};
use std::mem::size_of;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::TokenCreated;
use crate::states::{BondingCurve, GlobalState, RageFund, Registry};

pub fn handle(
    ctx: Context<CreateToken>,
    name: String,
    symbol: String,
    image_ref: String,
) -> Result<()> {
    require!(
        !name.is_empty() && name.len() <= MAX_NAME_LEN,
        ErrorCode::InvalidArgument
    );
    require!(
        !symbol.is_empty() && symbol.len() <= MAX_SYMBOL_LEN,
        ErrorCode::InvalidArgument
    );
    require!(image_ref.len() <= MAX_IMAGE_LEN, ErrorCode::InvalidArgument);

    let now = Clock::get()?.unix_timestamp;
    let mint_key = ctx.accounts.mint.key();

    let (_curve_pda, curve_bump) = Pubkey::find_program_address(
        &[CURVE_SEED, mint_key.as_ref()],
        ctx.program_id,
    );
    let (_vault_pda, vault_bump) = Pubkey::find_program_address(
        &[SOL_VAULT_SEED, mint_key.as_ref()],
        ctx.program_id,
    );
    let (_fund_pda, fund_bump) = Pubkey::find_program_address(
        &[RAGE_FUND_SEED, mint_key.as_ref()],
        ctx.program_id,
    );

    let curve_state = &mut ctx.accounts.curve_state;
    curve_state.bump = curve_bump;
    curve_state.sol_vault_bump = vault_bump;
    curve_state.mint = mint_key;
    curve_state.creator = ctx.accounts.creator.key();
    curve_state.created_at = now;
    curve_state.name = name.clone();
    curve_state.symbol = symbol.clone();
    curve_state.image_ref = image_ref;
    curve_state.init_reserves()?;

    let rage_fund = &mut ctx.accounts.rage_fund;
    rage_fund.bump = fund_bump;
    rage_fund.mint = mint_key;

    ctx.accounts
        .registry
        .push(mint_key, curve_state.key(), now)?;

    msg!("LAUNCHING TOKEN {}", symbol);
    emit!(TokenCreated {
        mint: mint_key,
        curve: curve_state.key(),
        creator: ctx.accounts.creator.key(),
        name,
        symbol,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CreateToken<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(seeds = [GLOBAL_STATE_SEED], bump = global_state.bump)]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        realloc = Registry::space_for(registry.tokens.len() + 1),
        realloc::payer = creator,
        realloc::zero = false
    )]
    pub registry: Box<Account<'info, Registry>>,

    /// CHECK: pda that signs every mint for the platform, holds no data
    #[account(seeds = [MINT_AUTH_SEED], bump = global_state.mint_auth_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = mint_authority
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        seeds = [CURVE_SEED, mint.key().as_ref()],
        bump,
        space = BondingCurve::SPACE
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,

    #[account(
        init,
        payer = creator,
        seeds = [RAGE_FUND_SEED, mint.key().as_ref()],
        bump,
        space = 8 + size_of::<RageFund>()
    )]
    pub rage_fund: Box<Account<'info, RageFund>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
