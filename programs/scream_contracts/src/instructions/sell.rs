// libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};
use std::mem::size_of;

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::{RageFundDeposited, RageTaxCollected, TokensSold};
use crate::states::{BondingCurve, GlobalState, RageFund, UserPosition};
use crate::utils::transfer_from_vault;

pub fn handle(
    ctx: Context<Sell>,
    token_amount: u64,
    min_sol_out: u64,
    accept_rage_tax: bool,
) -> Result<()> {
    require!(token_amount > 0, ErrorCode::InvalidArgument);
    let mint_key = ctx.accounts.mint.key();

    ctx.accounts.curve_state.locked = true;

    // Rage eligibility is judged on the gross curve payout against the
    // seller's lifetime average cost.
    let gross = ctx.accounts.curve_state.quote_sell_gross(token_amount)?;
    let rage_triggered = ctx
        .accounts
        .user_position
        .would_trigger_rage(gross, token_amount);
    if rage_triggered && !accept_rage_tax {
        return err!(ErrorCode::RageTaxRequired);
    }

    let quote = ctx.accounts.curve_state.quote_sell(token_amount, rage_triggered)?;
    require!(quote.net_out >= min_sol_out, ErrorCode::SlippageExceeded);

    // Pull the tokens back before paying anything out.
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.mint.to_account_info(),
                from: ctx.accounts.seller_token_ata.to_account_info(),
                authority: ctx.accounts.seller.to_account_info(),
            },
        ),
        token_amount,
    )?;

    ctx.accounts.curve_state.apply_sell(token_amount, quote.gross)?;

    let fund_total = quote
        .rage_fund_fee_share
        .checked_add(quote.tax_fund_share)
        .ok_or(ErrorCode::Overflow)?;
    let dev_total = quote
        .dev_fee_share
        .checked_add(quote.tax_dev_share)
        .ok_or(ErrorCode::Overflow)?;
    if fund_total > 0 {
        ctx.accounts.rage_fund.record_deposit(fund_total)?;
        emit!(RageFundDeposited {
            mint: mint_key,
            amount: fund_total,
            balance: ctx.accounts.rage_fund.balance,
        });
    }

    // Payouts are carved from the gross leaving the vault, so the vault
    // only ever parts with what the curve accounted for.
    let vault_seeds: &[&[&[u8]]] = &[&[
        SOL_VAULT_SEED,
        mint_key.as_ref(),
        &[ctx.accounts.curve_state.sol_vault_bump],
    ]];
    transfer_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.sol_vault.to_account_info(),
        &ctx.accounts.seller.to_account_info(),
        vault_seeds,
        quote.net_out,
    )?;
    transfer_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.sol_vault.to_account_info(),
        &ctx.accounts.dev_wallet.to_account_info(),
        vault_seeds,
        dev_total,
    )?;
    transfer_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.sol_vault.to_account_info(),
        &ctx.accounts.rage_fund.to_account_info(),
        vault_seeds,
        fund_total,
    )?;

    if rage_triggered {
        emit!(RageTaxCollected {
            mint: mint_key,
            seller: ctx.accounts.seller.key(),
            tax: quote.rage_tax,
            to_fund: quote.tax_fund_share,
            to_dev: quote.tax_dev_share,
        });
    }
    emit!(TokensSold {
        mint: mint_key,
        seller: ctx.accounts.seller.key(),
        tokens_in: token_amount,
        fee: quote.fee,
        rage_tax: quote.rage_tax,
        sol_out: quote.net_out,
        virtual_sol_after: ctx.accounts.curve_state.virtual_sol_reserve,
        virtual_token_after: ctx.accounts.curve_state.virtual_token_reserve,
    });

    ctx.accounts.curve_state.locked = false;
    Ok(())
}

#[derive(Accounts)]
pub struct Sell<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

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

    #[account(
        mut,
        constraint = seller_token_ata.mint == mint.key() @ ErrorCode::InvalidAddress,
        constraint = seller_token_ata.owner == seller.key() @ ErrorCode::Unauthorized
    )]
    pub seller_token_ata: Box<Account<'info, TokenAccount>>,

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

    // A transferee may sell without ever buying; the fresh zero position
    // simply has no cost basis to rage against.
    #[account(
        init_if_needed,
        payer = seller,
        seeds = [curve_state.key().as_ref(), seller.key().as_ref()],
        bump,
        space = 8 + size_of::<UserPosition>()
    )]
    pub user_position: Box<Account<'info, UserPosition>>,

    /// CHECK: enforced against the configured dev wallet
    #[account(mut, constraint = dev_wallet.key() == global_state.dev_wallet @ ErrorCode::InvalidAddress)]
    pub dev_wallet: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
