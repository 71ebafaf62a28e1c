// libraries
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::system_program;
use anchor_spl::token::{self, spl_token::instruction::AuthorityType, Mint, MintTo, SetAuthority, Token};

// local
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::CurveMigrated;
use crate::math::usd_to_lamports;
use crate::states::{BondingCurve, GlobalState, PriceFeed, RageFund};
use crate::utils::resolve_price_usd;

/// Permissionless crank. A no-op once migrated; before the threshold it
/// refuses, so the curve can only leave the bonding phase on schedule.
pub fn handle(ctx: Context<Migrate>) -> Result<()> {
    if ctx.accounts.curve_state.migrated {
        msg!("already migrated, nothing to do");
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let (price_usd, _) =
        resolve_price_usd(&ctx.accounts.global_state, &ctx.accounts.price_feed, now);
    let threshold = usd_to_lamports(
        ctx.accounts.global_state.migration_threshold_usd,
        price_usd,
    )?;
    require!(
        ctx.accounts.curve_state.should_migrate(threshold),
        ErrorCode::ThresholdNotReached
    );

    execute(
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
    )
}

/// Moves the liquidity allocation into the external pool and freezes the
/// curve. Runs inside `buy` when a purchase crosses the threshold, and
/// from the standalone crank above. State is committed before any asset
/// leaves the program.
#[allow(clippy::too_many_arguments)]
pub fn execute<'info>(
    global_state: &Account<'info, GlobalState>,
    curve_state: &mut Account<'info, BondingCurve>,
    rage_fund: &mut Account<'info, RageFund>,
    mint: AccountInfo<'info>,
    mint_authority: AccountInfo<'info>,
    sol_vault: AccountInfo<'info>,
    amm_program: AccountInfo<'info>,
    pool: AccountInfo<'info>,
    pool_sol_vault: AccountInfo<'info>,
    pool_token_vault: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    price_usd: u64,
    now: i64,
) -> Result<()> {
    if curve_state.migrated {
        return Ok(());
    }

    let mint_key = curve_state.mint;
    let liquidity_lamports = usd_to_lamports(global_state.liquidity_seed_usd, price_usd)?
        .min(curve_state.sol_collected);
    let liquidity_tokens = curve_state.pair_tokens_for_liquidity(liquidity_lamports)?;

    // Terminal state first; anything collected beyond the allocation stays
    // in the curve vault.
    curve_state.migrated = true;
    curve_state.pool = pool.key();
    rage_fund.start_vesting(now);

    // Seed the pool vaults.
    let vault_seeds: &[&[&[u8]]] = &[&[
        SOL_VAULT_SEED,
        mint_key.as_ref(),
        &[curve_state.sol_vault_bump],
    ]];
    system_program::transfer(
        CpiContext::new_with_signer(
            system_program.clone(),
            system_program::Transfer {
                from: sol_vault.clone(),
                to: pool_sol_vault.clone(),
            },
            vault_seeds,
        ),
        liquidity_lamports,
    )?;

    let auth_seeds: &[&[&[u8]]] = &[&[MINT_AUTH_SEED, &[global_state.mint_auth_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            token_program.clone(),
            MintTo {
                mint: mint.clone(),
                to: pool_token_vault.clone(),
                authority: mint_authority.clone(),
            },
            auth_seeds,
        ),
        liquidity_tokens,
    )?;

    // One-shot activation of the external constant-product pool from the
    // vault balances pushed above.
    let ix = Instruction {
        program_id: amm_program.key(),
        accounts: vec![
            AccountMeta::new(pool.key(), false),
            AccountMeta::new_readonly(mint_key, false),
            AccountMeta::new(pool_sol_vault.key(), false),
            AccountMeta::new(pool_token_vault.key(), false),
            AccountMeta::new_readonly(mint_authority.key(), true),
        ],
        data: {
            let mut data = Vec::with_capacity(8 + 16);
            data.extend_from_slice(&CREATE_POOL_AND_SEED_DISCRIMINATOR);
            data.extend_from_slice(&liquidity_lamports.to_le_bytes());
            data.extend_from_slice(&liquidity_tokens.to_le_bytes());
            data
        },
    };
    msg!("CPI: pool create_pool_and_seed instruction");
    invoke_signed(
        &ix,
        &[
            pool.clone(),
            mint.clone(),
            pool_sol_vault.clone(),
            pool_token_vault.clone(),
            mint_authority.clone(),
            amm_program.clone(),
        ],
        auth_seeds,
    )?;

    // Supply is frozen once trading leaves the curve.
    token::set_authority(
        CpiContext::new_with_signer(
            token_program,
            SetAuthority {
                account_or_mint: mint,
                current_authority: mint_authority,
            },
            auth_seeds,
        ),
        AuthorityType::MintTokens,
        None,
    )?;

    emit!(CurveMigrated {
        mint: mint_key,
        pool: curve_state.pool,
        sol_seeded: liquidity_lamports,
        tokens_seeded: liquidity_tokens,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Migrate<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

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
    pub system_program: Program<'info, System>,
}
