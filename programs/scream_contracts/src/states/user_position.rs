use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

/// Lifetime acquisition ledger for one wallet on one curve. Sells never
/// reduce it; the average cost it implies is the reference point for every
/// future rage-tax decision.
#[account]
#[derive(Default)]
pub struct UserPosition {
    pub bump: u8,
    pub curve: Pubkey,
    pub authority: Pubkey,

    pub total_tokens_bought: u64,
    pub total_sol_spent: u64,

    pub reserved: [u64; 4],
}

impl UserPosition {
    pub fn record_buy(&mut self, tokens: u64, sol_spent: u64) -> Result<()> {
        self.total_tokens_bought = self
            .total_tokens_bought
            .checked_add(tokens)
            .ok_or(ErrorCode::Overflow)?;
        self.total_sol_spent = self
            .total_sol_spent
            .checked_add(sol_spent)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// True when realizing `gross_out` for `token_amount` lands more than
    /// 10% under the recorded average cost. Pure integer cross
    /// multiplication; a wallet that never bought has no basis and never
    /// rages.
    pub fn would_trigger_rage(&self, gross_out: u64, token_amount: u64) -> bool {
        if self.total_tokens_bought == 0 || token_amount == 0 {
            return false;
        }
        let realized = (gross_out as u128) * (self.total_tokens_bought as u128) * (BPS_DENOMINATOR as u128);
        let basis = (self.total_sol_spent as u128) * (token_amount as u128) * (RAGE_TRIGGER_BPS as u128);
        realized < basis
    }

    /// Average lamports paid per whole token, for display-style queries.
    pub fn avg_cost(&self) -> u64 {
        if self.total_tokens_bought == 0 {
            return 0;
        }
        ((self.total_sol_spent as u128) * (TOKEN_UNIT as u128)
            / (self.total_tokens_bought as u128)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(bought: u64, spent: u64) -> UserPosition {
        UserPosition {
            total_tokens_bought: bought,
            total_sol_spent: spent,
            ..Default::default()
        }
    }

    #[test]
    fn rage_triggers_only_past_ten_percent_loss() {
        // 1_000 lamports for 1_000_000 units: avg cost 1 lamport / 1_000 units.
        let p = position(1_000_000, 1_000);

        // Selling everything at exactly cost: no rage.
        assert!(!p.would_trigger_rage(1_000, 1_000_000));
        // At exactly 90% of cost: still no rage (strictly below).
        assert!(!p.would_trigger_rage(900, 1_000_000));
        // One lamport under the 90% line: rage.
        assert!(p.would_trigger_rage(899, 1_000_000));
    }

    #[test]
    fn rage_scales_with_partial_amounts() {
        let p = position(2_000_000, 4_000);
        // Half the stack at half the basis value: 1_000 vs basis 2_000 -> rage.
        assert!(p.would_trigger_rage(1_000, 1_000_000));
        // Half the stack at 95% of basis: no rage.
        assert!(!p.would_trigger_rage(1_900, 1_000_000));
    }

    #[test]
    fn no_basis_never_rages() {
        let p = position(0, 0);
        assert!(!p.would_trigger_rage(1, 1_000_000));
    }

    #[test]
    fn basis_accumulates_and_is_never_reduced() {
        let mut p = UserPosition::default();
        p.record_buy(1_000_000, 1_000).unwrap();
        p.record_buy(1_000_000, 3_000).unwrap();
        assert_eq!(p.total_tokens_bought, 2_000_000);
        assert_eq!(p.total_sol_spent, 4_000);
        // avg 2 lamports per 1_000 units -> 2_000 per whole token.
        assert_eq!(p.avg_cost(), 2_000);
    }
}
