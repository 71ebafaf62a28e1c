use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

/// Per-token escrow. Fee and tax shares accumulate here; lamports leave
/// only through the owner drain or the vested holder distribution.
#[account]
#[derive(Default)]
pub struct RageFund {
    pub bump: u8,
    pub mint: Pubkey,

    /// Lamports currently escrowed on top of the account's rent reserve
    pub balance: u64,
    /// Monotonic total of everything ever deposited
    pub total_deposited: u64,
    /// Unix time the holder distribution opened (0 until migration)
    pub vesting_start: i64,

    pub reserved: [u64; 4],
}

/// Per-(token, wallet) record of lamports already paid out, so repeated
/// claims only ever pay the newly vested delta.
#[account]
#[derive(Default)]
pub struct RageClaim {
    pub bump: u8,
    pub fund: Pubkey,
    pub authority: Pubkey,
    pub claimed: u64,
}

impl RageFund {
    pub fn record_deposit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::ZeroDeposit);
        self.balance = self.balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn start_vesting(&mut self, now: i64) {
        if self.vesting_start == 0 {
            self.vesting_start = now;
        }
    }

    /// Linear vesting over 90 days from `vesting_start`, in bps.
    pub fn vested_bps(&self, now: i64) -> u64 {
        if self.vesting_start == 0 || now <= self.vesting_start {
            return 0;
        }
        let elapsed = (now - self.vesting_start) as u128;
        let bps = elapsed * BPS_DENOMINATOR as u128 / RAGE_VESTING_SECS as u128;
        bps.min(BPS_DENOMINATOR as u128) as u64
    }

    /// Lamports claimable right now by a wallet holding `holder_tokens` of
    /// `tokens_outstanding`, having already been paid `already_claimed`.
    /// Capped by the remaining balance so distribution can fully drain the
    /// fund but never overdraw it.
    pub fn claimable(
        &self,
        now: i64,
        holder_tokens: u64,
        tokens_outstanding: u64,
        already_claimed: u64,
    ) -> Result<u64> {
        if tokens_outstanding == 0 || holder_tokens == 0 {
            return Ok(0);
        }
        let entitlement = (self.total_deposited as u128)
            .checked_mul(holder_tokens as u128)
            .and_then(|v| v.checked_div(tokens_outstanding as u128))
            .and_then(|v| v.checked_mul(self.vested_bps(now) as u128))
            .and_then(|v| v.checked_div(BPS_DENOMINATOR as u128))
            .ok_or(ErrorCode::Overflow)?;
        let entitlement = u64::try_from(entitlement).map_err(|_| error!(ErrorCode::Overflow))?;
        Ok(entitlement.saturating_sub(already_claimed).min(self.balance))
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Full drain for the owner escape hatch; returns the amount moved.
    pub fn drain(&mut self) -> Result<u64> {
        require!(self.balance > 0, ErrorCode::NoBalance);
        let amount = self.balance;
        self.balance = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_accumulate_and_zero_is_rejected() {
        let mut fund = RageFund::default();
        assert!(fund.record_deposit(0).is_err());
        fund.record_deposit(1_000).unwrap();
        fund.record_deposit(2_000).unwrap();
        assert_eq!(fund.balance, 3_000);
        assert_eq!(fund.total_deposited, 3_000);
    }

    #[test]
    fn drain_zeroes_and_refuses_twice() {
        let mut fund = RageFund::default();
        fund.record_deposit(5_000).unwrap();
        assert_eq!(fund.drain().unwrap(), 5_000);
        assert_eq!(fund.balance, 0);
        assert!(fund.drain().is_err());
        // The lifetime total is untouched by the drain.
        assert_eq!(fund.total_deposited, 5_000);
    }

    #[test]
    fn nothing_vests_before_distribution_opens() {
        let mut fund = RageFund::default();
        fund.record_deposit(10_000).unwrap();
        assert_eq!(fund.vested_bps(1_000_000), 0);
        assert_eq!(fund.claimable(1_000_000, 50, 100, 0).unwrap(), 0);
    }

    #[test]
    fn vesting_is_linear_and_caps_at_full() {
        let mut fund = RageFund::default();
        fund.start_vesting(100);
        assert_eq!(fund.vested_bps(100 + RAGE_VESTING_SECS / 2), BPS_DENOMINATOR / 2);
        assert_eq!(fund.vested_bps(100 + RAGE_VESTING_SECS), BPS_DENOMINATOR);
        assert_eq!(fund.vested_bps(100 + RAGE_VESTING_SECS * 3), BPS_DENOMINATOR);
        // Restarting is a no-op once set.
        fund.start_vesting(999);
        assert_eq!(fund.vesting_start, 100);
    }

    #[test]
    fn claims_pay_only_the_newly_vested_delta() {
        let mut fund = RageFund::default();
        fund.record_deposit(1_000).unwrap();
        fund.start_vesting(100);

        // Holder of half the supply, midway through vesting: 1000 * 1/2 * 1/2.
        let mid = 100 + RAGE_VESTING_SECS / 2;
        let first = fund.claimable(mid, 50, 100, 0).unwrap();
        assert_eq!(first, 250);
        fund.record_claim(first).unwrap();

        // Nothing more vests at the same instant.
        assert_eq!(fund.claimable(mid, 50, 100, first).unwrap(), 0);

        // Fully vested: the remaining 250 of the 500 entitlement.
        let second = fund
            .claimable(100 + RAGE_VESTING_SECS, 50, 100, first)
            .unwrap();
        assert_eq!(second, 250);
        fund.record_claim(second).unwrap();
        assert_eq!(fund.balance, 500);
    }

    #[test]
    fn claims_never_overdraw_the_balance() {
        let mut fund = RageFund::default();
        fund.record_deposit(1_000).unwrap();
        fund.start_vesting(100);
        fund.balance = 100; // most of the pot already distributed

        let claim = fund
            .claimable(100 + RAGE_VESTING_SECS, 100, 100, 0)
            .unwrap();
        assert_eq!(claim, 100);
    }
}
