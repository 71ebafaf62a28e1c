// libraries
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, MintTo, Token, TokenAccount},
};
use std::mem::size_of;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::{RageFundDeposited, TokensPurchased};
use crate::instructions::migrate;
use crate::math::usd_to_lamports;
use crate::states::{BondingCurve, GlobalState, PriceFeed, RageFund, UserPosition};
use crate::utils::{resolve_price_usd, transfer_lamports};

pub fn handle(ctx: Context<Buy>, sol_amount: u64, min_tokens_out: u64) -> Result<()> {
    require!(sol_amount > 0, ErrorCode::InvalidArgument);
    let now = Clock::get()?.unix_timestamp;
    let mint_key = ctx.accounts.mint.key();

    ctx.accounts.curve_state.locked = true;

    let quote = ctx.accounts.curve_state.quote_buy(sol_amount)?;
    require!(
        quote.tokens_out >= min_tokens_out,
        ErrorCode::SlippageExceeded
    );

    // Commit every piece of state before lamports or tokens move.
    ctx.accounts.curve_state.apply_buy(&quote, sol_amount)?;

    let curve_key = ctx.accounts.curve_state.key();
    let user_position = &mut ctx.accounts.user_position;
    if user_position.authority == Pubkey::default() {
        let (_pda, bump) = Pubkey::find_program_address(
            &[curve_key.as_ref(), ctx.accounts.buyer.key().as_ref()],
            ctx.program_id,
        );
        user_position.bump = bump;
        user_position.curve = curve_key;
        user_position.authority = ctx.accounts.buyer.key();
    }
    user_position.record_buy(quote.tokens_out, sol_amount)?;

    if quote.rage_fund_share > 0 {
        ctx.accounts.rage_fund.record_deposit(quote.rage_fund_share)?;
        emit!(RageFundDeposited {
            mint: mint_key,
            amount: quote.rage_fund_share,
            balance: ctx.accounts.rage_fund.balance,
        });
    }

    // Pool leg first, then the 50/50 fee fan-out.
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.buyer.to_account_info(),
        &ctx.accounts.sol_vault.to_account_info(),
        quote.net_in,
    )?;
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.buyer.to_account_info(),
        &ctx.accounts.dev_wallet.to_account_info(),
        quote.dev_share,
    )?;
    transfer_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.buyer.to_account_info(),
        &ctx.accounts.rage_fund.to_account_info(),
        quote.rage_fund_share,
    )?;

    // Issue the purchased tokens from the curve allocation.
    let auth_seeds: &[&[&[u8]]] = &[&[
        MINT_AUTH_SEED,
        &[ctx.accounts.global_state.mint_auth_bump],
    ]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.buyer_token_ata.to_account_info(),
                authority: ctx.accounts.mint_authority.to_account_info(),
            },
            auth_seeds,
        ),
        quote.tokens_out,
    )?;

    emit!(TokensPurchased {
        mint: mint_key,
        buyer: ctx.accounts.buyer.key(),
        sol_in: sol_amount,
        fee: quote.fee,
        tokens_out: quote.tokens_out,
        virtual_sol_after: ctx.accounts.curve_state.virtual_sol_reserve,
        virtual_token_after: ctx.accounts.curve_state.virtual_token_reserve,
    });

    // Threshold check happens inside the purchase, so a crossing buy
    // finishes the migration before it returns.
    let (price_usd, _) =
        resolve_price_usd(&ctx.accounts.global_state, &ctx.accounts.price_feed, now);
    let threshold = usd_to_lamports(
        ctx.accounts.global_state.migration_threshold_usd,
        price_usd,
    )?;
    if ctx.accounts.curve_state.should_migrate(threshold) {
        msg!("migration threshold reached, moving liquidity to the pool");
        migrate::execute(
            &ctx.accounts.global_state,
            &mut ctx.accounts.curve_state,
            &mut ctx.accounts.rage_fund,
            ctx.accounts.mint.to_account_info(),
            ctx.accounts.mint_authority.to_account_info(),
            ctx.accounts.sol_vault.to_account_info(),
            ctx.accounts.amm_program.to_account_info(),
            ctx.accounts.pool.to_account_info(),
            ctx.accounts.pool_sol_vault.to_account_info(),
            ctx.accounts.pool_token_vault.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            price_usd,
            now,
        )?;
    }

    ctx.accounts.curve_state.locked = false;
    Ok(())
}

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(seeds = [GLOBAL_STATE_SEED], bump = global_state.bump)]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [CURVE_SEED, mint.key().as_ref()],
        bump = curve_state.bump,
        has_one = mint
    )]
    pub curve_state: Box<Account<'info, BondingCurve>>,

    /// CHECK: pda that signs every mint for the platform
    #[account(seeds = [MINT_AUTH_SEED], bump = global_state.mint_auth_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer
    )]
    pub buyer_token_ata: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, mint.key().as_ref()],
        bump = curve_state.sol_vault_bump
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [RAGE_FUND_SEED, mint.key().as_ref()],
        bump = rage_fund.bump
    )]
    pub rage_fund: Box<Account<'info, RageFund>>,

    #[account(
        init_if_needed,
        payer = buyer,
        seeds = [curve_state.key().as_ref(), buyer.key().as_ref()],
        bump,
        space = 8 + size_of::<UserPosition>()
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// CHECK: enforced against the configured dev wallet
    #[account(mut, constraint = dev_wallet.key() == global_state.dev_wallet @ ErrorCode::InvalidAddress)]
    pub dev_wallet: UncheckedAccount<'info>,

    #[account(constraint = price_feed.key() == global_state.price_feed @ ErrorCode::InvalidAddress)]
    pub price_feed: Account<'info, PriceFeed>,

    /// CHECK: the configured external amm program
    #[account(constraint = amm_program.key() == global_state.amm_program @ ErrorCode::InvalidAddress)]
    pub amm_program: UncheckedAccount<'info>,

    /// CHECK: pool state account, created and validated by the amm program
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: pool native vault, validated by the amm program
    #[account(mut)]
    pub pool_sol_vault: UncheckedAccount<'info>,

    /// CHECK: pool token vault, validated by the amm program
    #[account(mut)]
    pub pool_token_vault: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
