use crate::constants::*;
use crate::errors::ErrorCode;
use anchor_lang::prelude::*;

// Safe (a*b) / d with overflow checks
#[inline]
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128> {
    a.checked_mul(b)
        .and_then(|p| p.checked_div(d))
        .ok_or_else(|| error!(ErrorCode::Overflow))
}

// amount * bps / 10_000
#[inline]
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    let v = mul_div(amount as u128, bps as u128, BPS_DENOMINATOR as u128)?;
    u64::try_from(v).map_err(|_| error!(ErrorCode::Overflow))
}

/// Tokens out for `net_lamports` paid into the pool. The fee is taken
/// outside the pool, so `k` is preserved across the trade.
pub fn cpmm_tokens_out(
    k: u128,
    virtual_token_reserve: u64,
    virtual_sol_reserve: u64,
    net_lamports: u64,
) -> Result<u64> {
    let new_sol = (virtual_sol_reserve as u128)
        .checked_add(net_lamports as u128)
        .ok_or(ErrorCode::Overflow)?;
    let new_token = k.checked_div(new_sol).ok_or(ErrorCode::Overflow)?;
    let out = (virtual_token_reserve as u128)
        .checked_sub(new_token)
        .ok_or(ErrorCode::Overflow)?;
    u64::try_from(out).map_err(|_| error!(ErrorCode::Overflow))
}

/// Gross lamports out for `token_amount` returned to the pool, before any
/// fee or tax is carved from the payout.
pub fn cpmm_lamports_out(
    k: u128,
    virtual_token_reserve: u64,
    virtual_sol_reserve: u64,
    token_amount: u64,
) -> Result<u64> {
    let new_token = (virtual_token_reserve as u128)
        .checked_add(token_amount as u128)
        .ok_or(ErrorCode::Overflow)?;
    let new_sol = k.checked_div(new_token).ok_or(ErrorCode::Overflow)?;
    let out = (virtual_sol_reserve as u128)
        .checked_sub(new_sol)
        .ok_or(ErrorCode::Overflow)?;
    u64::try_from(out).map_err(|_| error!(ErrorCode::Overflow))
}

/// USD amount (8 decimals) priced into lamports at `price_usd` (8 decimals
/// per whole native unit).
pub fn usd_to_lamports(usd_amount: u64, price_usd: u64) -> Result<u64> {
    require!(price_usd > 0, ErrorCode::InvalidArgument);
    let v = mul_div(
        usd_amount as u128,
        anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL as u128,
        price_usd as u128,
    )?;
    u64::try_from(v).map_err(|_| error!(ErrorCode::Overflow))
}

/// Normalize a feed price with exponent `expo` to 8-decimal USD.
/// Non-positive prices are unusable and map to `None`.
pub fn normalize_price_usd(price: i64, expo: i32) -> Option<u64> {
    if price <= 0 {
        return None;
    }
    let p = price as u128;
    let shift = expo + 8;
    let scaled = if shift >= 0 {
        p.checked_mul(10u128.checked_pow(shift as u32)?)?
    } else {
        p.checked_div(10u128.checked_pow((-shift) as u32)?)?
    };
    if scaled == 0 {
        return None;
    }
    u64::try_from(scaled).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    fn canonical_k() -> u128 {
        (INITIAL_VIRTUAL_TOKEN_RESERVE as u128) * (INITIAL_VIRTUAL_SOL_RESERVE as u128)
    }

    #[test]
    fn buy_quote_matches_canonical_scenario() {
        // 1 SOL in at 0.4% fee: net 0.996 SOL against (800M tokens, 30 SOL).
        let net = LAMPORTS_PER_SOL - bps_of(LAMPORTS_PER_SOL, TRADE_FEE_BPS).unwrap();
        assert_eq!(net, 996_000_000);

        let out = cpmm_tokens_out(
            canonical_k(),
            INITIAL_VIRTUAL_TOKEN_RESERVE,
            INITIAL_VIRTUAL_SOL_RESERVE,
            net,
        )
        .unwrap();

        // 800_000_000e6 - k / 30.996e9
        let expected = INITIAL_VIRTUAL_TOKEN_RESERVE as u128 - canonical_k() / 30_996_000_000u128;
        assert_eq!(out as u128, expected);
        // ~25.7M whole tokens
        assert_eq!(out / TOKEN_UNIT, 25_706_542);
    }

    #[test]
    fn tokens_out_shrinks_as_reserve_depletes() {
        let k = canonical_k();
        let mut token_reserve = INITIAL_VIRTUAL_TOKEN_RESERVE;
        let mut sol_reserve = INITIAL_VIRTUAL_SOL_RESERVE;
        let mut last_out = u64::MAX;
        for _ in 0..5 {
            let out = cpmm_tokens_out(k, token_reserve, sol_reserve, LAMPORTS_PER_SOL).unwrap();
            assert!(out < last_out);
            last_out = out;
            token_reserve -= out;
            sol_reserve += LAMPORTS_PER_SOL;
        }
    }

    #[test]
    fn round_trip_returns_less_than_paid() {
        let k = canonical_k();
        let bought =
            cpmm_tokens_out(k, INITIAL_VIRTUAL_TOKEN_RESERVE, INITIAL_VIRTUAL_SOL_RESERVE, 996_000_000).unwrap();
        let token_reserve = INITIAL_VIRTUAL_TOKEN_RESERVE - bought;
        let sol_reserve = INITIAL_VIRTUAL_SOL_RESERVE + 996_000_000;
        let gross = cpmm_lamports_out(k, token_reserve, sol_reserve, bought).unwrap();
        // Selling everything unwinds the pool leg exactly (mod rounding dust);
        // the round trip still loses both fee legs.
        assert!(gross <= 996_000_000);
        let net = gross - bps_of(gross, TRADE_FEE_BPS).unwrap();
        assert!(net < LAMPORTS_PER_SOL);
    }

    #[test]
    fn migration_threshold_is_exact_at_25_usd() {
        // $69,000 at $25/unit = 2,760 native units.
        let threshold =
            usd_to_lamports(DEFAULT_MIGRATION_THRESHOLD_USD, 2_500_000_000).unwrap();
        assert_eq!(threshold, 2_760 * LAMPORTS_PER_SOL);
    }

    #[test]
    fn price_normalization_handles_exponents() {
        assert_eq!(normalize_price_usd(2_500_000_000, -8), Some(2_500_000_000));
        assert_eq!(normalize_price_usd(25_000_000_000, -9), Some(2_500_000_000));
        assert_eq!(normalize_price_usd(25, 0), Some(2_500_000_000));
        assert_eq!(normalize_price_usd(0, -8), None);
        assert_eq!(normalize_price_usd(-1, -8), None);
    }
}
