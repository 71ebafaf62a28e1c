use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::math::normalize_price_usd;
use crate::states::{BondingCurve, GlobalState, PriceFeed};
use crate::types::PriceSource;

// Asserts the curve still accepts trades
pub fn curve_active(curve: &BondingCurve) -> Result<()> {
    if curve.migrated {
        return err!(ErrorCode::AlreadyMigrated);
    }
    if curve.locked {
        return err!(ErrorCode::ReentrantCall);
    }
    Ok(())
}

/// The platform's price capability: the live feed when the oracle is
/// enabled, fresh and positive, else the fixed fallback constant. An
/// unhealthy feed never aborts the caller, it only selects the fallback.
pub fn resolve_price_usd(
    global_state: &GlobalState,
    price_feed: &PriceFeed,
    now: i64,
) -> (u64, PriceSource) {
    if global_state.use_oracle {
        let live = price_feed
            .get_price_no_older_than(now, ORACLE_MAX_AGE_SECS)
            .and_then(|p| normalize_price_usd(p.price, p.expo));
        if let Some(price) = live {
            return (price, PriceSource::Feed);
        }
        msg!("price feed unusable, falling back to fixed price");
    }
    (FALLBACK_SOL_PRICE_USD, PriceSource::Fallback)
}

/// Lamport transfer out of a signing wallet. Zero amounts are skipped so
/// fee legs that round to nothing cost no CPI.
pub fn transfer_lamports<'info>(
    system_program: &Program<'info, System>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            system_program::Transfer {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        amount,
    )
}

/// Lamport transfer out of a program pda vault.
pub fn transfer_from_vault<'info>(
    system_program: &Program<'info, System>,
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            system_program::Transfer {
                from: vault.clone(),
                to: to.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Lamport move out of a data-carrying account this program owns.
pub fn debit_program_account<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let from_balance = from.lamports();
    let to_balance = to.lamports();
    **from.try_borrow_mut_lamports()? =
        from_balance.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
    **to.try_borrow_mut_lamports()? = to_balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
    Ok(())
}

/// True when `account` is a token account for `mint` owned by `owner`
/// with a nonzero balance. Anything else (missing account, wrong mint,
/// foreign owner) counts as not holding.
pub fn holds_token(account: &AccountInfo, mint: &Pubkey, owner: &Pubkey) -> bool {
    if *account.owner != token::ID {
        return false;
    }
    let is_match = token::accessor::mint(account)
        .map(|m| m == *mint)
        .unwrap_or(false)
        && token::accessor::authority(account)
            .map(|a| a == *owner)
            .unwrap_or(false);
    is_match && token::accessor::amount(account).map(|v| v > 0).unwrap_or(false)
}
