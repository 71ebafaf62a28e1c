use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::math::{bps_of, cpmm_lamports_out, cpmm_tokens_out, mul_div};

/// Per-mint constant-product exchange over virtual reserves.
///
/// `invariant_k` is fixed at creation; trading fees are carved outside the
/// pool so the product survives every trade. `Active -> Migrated` is the
/// only transition and it is terminal.
#[account]
#[derive(Default)]
pub struct BondingCurve {
    pub bump: u8,
    pub sol_vault_bump: u8,
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub created_at: i64,

    pub name: String,
    pub symbol: String,
    pub image_ref: String,

    pub virtual_token_reserve: u64,
    pub virtual_sol_reserve: u64,
    pub invariant_k: u128,

    /// Tokens issued to buyers and still outstanding
    pub real_tokens_sold: u64,
    /// Lamports actually collected, net of fees. Drives migration.
    pub sol_collected: u64,
    pub total_volume: u64,

    pub migrated: bool,
    /// Entry lock, held for the duration of a mutating instruction
    pub locked: bool,
    pub pool: Pubkey,

    pub reserved: [u64; 8],
}

pub struct BuyQuote {
    pub fee: u64,
    pub dev_share: u64,
    pub rage_fund_share: u64,
    pub net_in: u64,
    pub tokens_out: u64,
}

pub struct SellQuote {
    pub gross: u64,
    pub fee: u64,
    pub dev_fee_share: u64,
    pub rage_fund_fee_share: u64,
    pub rage_tax: u64,
    pub tax_fund_share: u64,
    pub tax_dev_share: u64,
    pub net_out: u64,
}

impl BondingCurve {
    pub const SPACE: usize = 8 // discriminator
        + 1
        + 1
        + 32 * 3
        + 8
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_SYMBOL_LEN)
        + (4 + MAX_IMAGE_LEN)
        + 8 * 2
        + 16
        + 8 * 3
        + 1
        + 1
        + 32
        + 8 * 8;

    pub fn init_reserves(&mut self) -> Result<()> {
        self.virtual_token_reserve = INITIAL_VIRTUAL_TOKEN_RESERVE;
        self.virtual_sol_reserve = INITIAL_VIRTUAL_SOL_RESERVE;
        self.invariant_k = (INITIAL_VIRTUAL_TOKEN_RESERVE as u128)
            .checked_mul(INITIAL_VIRTUAL_SOL_RESERVE as u128)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Lamports per whole token at the current reserve ratio.
    pub fn current_price(&self) -> Result<u64> {
        let v = mul_div(
            self.virtual_sol_reserve as u128,
            TOKEN_UNIT as u128,
            self.virtual_token_reserve as u128,
        )?;
        u64::try_from(v).map_err(|_| error!(ErrorCode::Overflow))
    }

    pub fn quote_buy(&self, sol_in: u64) -> Result<BuyQuote> {
        require!(sol_in > 0, ErrorCode::InvalidArgument);
        let fee = bps_of(sol_in, TRADE_FEE_BPS)?;
        let dev_share = fee / 2;
        let rage_fund_share = fee - dev_share;
        let net_in = sol_in.checked_sub(fee).ok_or(ErrorCode::Overflow)?;
        let tokens_out = cpmm_tokens_out(
            self.invariant_k,
            self.virtual_token_reserve,
            self.virtual_sol_reserve,
            net_in,
        )?;
        Ok(BuyQuote {
            fee,
            dev_share,
            rage_fund_share,
            net_in,
            tokens_out,
        })
    }

    pub fn apply_buy(&mut self, quote: &BuyQuote, sol_in: u64) -> Result<()> {
        self.virtual_token_reserve = self
            .virtual_token_reserve
            .checked_sub(quote.tokens_out)
            .ok_or(ErrorCode::Overflow)?;
        self.virtual_sol_reserve = self
            .virtual_sol_reserve
            .checked_add(quote.net_in)
            .ok_or(ErrorCode::Overflow)?;
        self.real_tokens_sold = self
            .real_tokens_sold
            .checked_add(quote.tokens_out)
            .ok_or(ErrorCode::Overflow)?;
        self.sol_collected = self
            .sol_collected
            .checked_add(quote.net_in)
            .ok_or(ErrorCode::Overflow)?;
        self.total_volume = self
            .total_volume
            .checked_add(sol_in)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Gross payout for returning `token_amount`, before fee and tax.
    pub fn quote_sell_gross(&self, token_amount: u64) -> Result<u64> {
        require!(token_amount > 0, ErrorCode::InvalidArgument);
        require!(
            token_amount <= self.real_tokens_sold,
            ErrorCode::InvalidArgument
        );
        cpmm_lamports_out(
            self.invariant_k,
            self.virtual_token_reserve,
            self.virtual_sol_reserve,
            token_amount,
        )
    }

    pub fn quote_sell(&self, token_amount: u64, rage_triggered: bool) -> Result<SellQuote> {
        let gross = self.quote_sell_gross(token_amount)?;
        let fee = bps_of(gross, TRADE_FEE_BPS)?;
        let dev_fee_share = fee / 2;
        let rage_fund_fee_share = fee - dev_fee_share;
        let (rage_tax, tax_fund_share, tax_dev_share) = if rage_triggered {
            let tax = bps_of(gross, RAGE_TAX_BPS)?;
            let to_fund = bps_of(tax, RAGE_TAX_FUND_SHARE_BPS)?;
            (tax, to_fund, tax - to_fund)
        } else {
            (0, 0, 0)
        };
        let net_out = gross
            .checked_sub(fee)
            .and_then(|v| v.checked_sub(rage_tax))
            .ok_or(ErrorCode::Overflow)?;
        Ok(SellQuote {
            gross,
            fee,
            dev_fee_share,
            rage_fund_fee_share,
            rage_tax,
            tax_fund_share,
            tax_dev_share,
            net_out,
        })
    }

    pub fn apply_sell(&mut self, token_amount: u64, gross: u64) -> Result<()> {
        self.virtual_token_reserve = self
            .virtual_token_reserve
            .checked_add(token_amount)
            .ok_or(ErrorCode::Overflow)?;
        self.virtual_sol_reserve = self
            .virtual_sol_reserve
            .checked_sub(gross)
            .ok_or(ErrorCode::Overflow)?;
        self.real_tokens_sold = self
            .real_tokens_sold
            .checked_sub(token_amount)
            .ok_or(ErrorCode::Overflow)?;
        self.sol_collected = self
            .sol_collected
            .checked_sub(gross)
            .ok_or(ErrorCode::Overflow)?;
        self.total_volume = self
            .total_volume
            .checked_add(gross)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn should_migrate(&self, threshold_lamports: u64) -> bool {
        !self.migrated && self.sol_collected >= threshold_lamports
    }

    /// Token amount pairing `liquidity_lamports` at the current implied price.
    pub fn pair_tokens_for_liquidity(&self, liquidity_lamports: u64) -> Result<u64> {
        let v = mul_div(
            liquidity_lamports as u128,
            self.virtual_token_reserve as u128,
            self.virtual_sol_reserve as u128,
        )?;
        u64::try_from(v).map_err(|_| error!(ErrorCode::Overflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    fn fresh_curve() -> BondingCurve {
        let mut curve = BondingCurve::default();
        curve.init_reserves().unwrap();
        curve
    }

    fn buy(curve: &mut BondingCurve, sol_in: u64) -> BuyQuote {
        let quote = curve.quote_buy(sol_in).unwrap();
        curve.apply_buy(&quote, sol_in).unwrap();
        quote
    }

    #[test]
    fn buy_moves_reserves_and_price_up() {
        let mut curve = fresh_curve();
        let price_before = curve.current_price().unwrap();

        let quote = buy(&mut curve, LAMPORTS_PER_SOL);

        assert_eq!(quote.net_in, 996_000_000);
        assert_eq!(quote.tokens_out / TOKEN_UNIT, 25_706_542);
        assert!(curve.virtual_token_reserve < INITIAL_VIRTUAL_TOKEN_RESERVE);
        assert_eq!(curve.virtual_sol_reserve, INITIAL_VIRTUAL_SOL_RESERVE + 996_000_000);
        assert_eq!(curve.sol_collected, 996_000_000);
        assert_eq!(curve.total_volume, LAMPORTS_PER_SOL);
        assert!(curve.current_price().unwrap() > price_before);
    }

    #[test]
    fn buy_fee_split_conserves_every_lamport() {
        let curve = fresh_curve();
        for sol_in in [1u64, 999, LAMPORTS_PER_SOL, 12_345_678_901] {
            let q = curve.quote_buy(sol_in).unwrap();
            assert_eq!(q.dev_share + q.rage_fund_share, q.fee);
            assert_eq!(q.net_in + q.fee, sol_in);
        }
    }

    #[test]
    fn zero_buy_is_rejected() {
        let curve = fresh_curve();
        assert!(curve.quote_buy(0).is_err());
    }

    #[test]
    fn sell_unwinds_buy_with_a_loss() {
        let mut curve = fresh_curve();
        let bought = buy(&mut curve, LAMPORTS_PER_SOL).tokens_out;

        let q = curve.quote_sell(bought, false).unwrap();
        assert_eq!(q.gross, 996_000_000);
        assert_eq!(q.net_out + q.fee, q.gross);
        assert!(q.net_out < LAMPORTS_PER_SOL);

        curve.apply_sell(bought, q.gross).unwrap();
        assert_eq!(curve.virtual_token_reserve, INITIAL_VIRTUAL_TOKEN_RESERVE);
        assert_eq!(curve.virtual_sol_reserve, INITIAL_VIRTUAL_SOL_RESERVE);
        assert_eq!(curve.real_tokens_sold, 0);
        assert_eq!(curve.sol_collected, 0);
    }

    #[test]
    fn sell_quote_with_rage_conserves_gross() {
        let mut curve = fresh_curve();
        let bought = buy(&mut curve, 5 * LAMPORTS_PER_SOL).tokens_out;

        let q = curve.quote_sell(bought / 2, true).unwrap();
        assert!(q.rage_tax > 0);
        assert_eq!(q.tax_fund_share + q.tax_dev_share, q.rage_tax);
        assert_eq!(q.dev_fee_share + q.rage_fund_fee_share, q.fee);
        assert_eq!(q.net_out + q.fee + q.rage_tax, q.gross);
    }

    #[test]
    fn sell_more_than_outstanding_is_rejected() {
        let mut curve = fresh_curve();
        let bought = buy(&mut curve, LAMPORTS_PER_SOL).tokens_out;
        assert!(curve.quote_sell_gross(bought + 1).is_err());
    }

    #[test]
    fn gross_payout_never_exceeds_collected() {
        // The virtual reserve floor (30 SOL) guarantees solvency of the
        // real vault for any sequence of partial exits.
        let mut curve = fresh_curve();
        buy(&mut curve, 7 * LAMPORTS_PER_SOL);
        buy(&mut curve, 3 * LAMPORTS_PER_SOL);

        let outstanding = curve.real_tokens_sold;
        for amount in [outstanding / 3, outstanding / 2, outstanding] {
            let gross = curve.quote_sell_gross(amount).unwrap();
            assert!(gross <= curve.sol_collected);
        }
    }

    #[test]
    fn migration_trips_on_collected_not_volume() {
        let mut curve = fresh_curve();
        assert!(!curve.should_migrate(2_760 * LAMPORTS_PER_SOL));

        curve.sol_collected = 2_760 * LAMPORTS_PER_SOL;
        assert!(curve.should_migrate(2_760 * LAMPORTS_PER_SOL));

        curve.migrated = true;
        assert!(!curve.should_migrate(2_760 * LAMPORTS_PER_SOL));
    }

    #[test]
    fn liquidity_pairing_follows_spot_price() {
        let mut curve = fresh_curve();
        buy(&mut curve, 10 * LAMPORTS_PER_SOL);

        let lamports = 2 * LAMPORTS_PER_SOL;
        let tokens = curve.pair_tokens_for_liquidity(lamports).unwrap();
        let expected = (lamports as u128) * (curve.virtual_token_reserve as u128)
            / (curve.virtual_sol_reserve as u128);
        assert_eq!(tokens as u128, expected);
    }
}
