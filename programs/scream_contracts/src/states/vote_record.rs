use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

/// Cooldown / streak record for one (voter, token) pair.
#[account]
#[derive(Default)]
pub struct VoteRecord {
    pub bump: u8,
    pub voter: Pubkey,
    pub mint: Pubkey,

    pub last_vote_time: i64,
    pub consecutive_days: u32,
    pub total_votes: u64,
}

impl VoteRecord {
    /// Registers a scream at `now`, enforcing the 24h cooldown and rolling
    /// the streak: another vote inside [24h, 48h) extends it, any later
    /// vote restarts at 1. Returns the streak the vote counts at.
    pub fn register(&mut self, now: i64) -> Result<u32> {
        if self.last_vote_time != 0 {
            let elapsed = now - self.last_vote_time;
            require!(elapsed >= VOTE_COOLDOWN_SECS, ErrorCode::CooldownActive);
            if elapsed < STREAK_WINDOW_SECS {
                self.consecutive_days = self
                    .consecutive_days
                    .checked_add(1)
                    .ok_or(ErrorCode::Overflow)?;
            } else {
                self.consecutive_days = 1;
            }
        } else {
            self.consecutive_days = 1;
        }
        self.last_vote_time = now;
        self.total_votes = self.total_votes.checked_add(1).ok_or(ErrorCode::Overflow)?;
        Ok(self.consecutive_days)
    }
}

/// Scream power: streak capped at 10, doubled for holders.
pub fn scream_power(consecutive_days: u32, is_holder: bool) -> u64 {
    let streak = consecutive_days.min(MAX_STREAK_POWER) as u64;
    if is_holder {
        streak * HOLDER_BONUS_MULTIPLIER
    } else {
        streak
    }
}

/// 25% dev / 25% development fund / 50% community treasury. The treasury
/// takes the rounding remainder so the three legs always rebuild the fee.
pub fn vote_fee_split(fee: u64) -> (u64, u64, u64) {
    let dev_share = fee / 4;
    let fund_share = fee / 4;
    let treasury_share = fee - dev_share - fund_share;
    (dev_share, fund_share, treasury_share)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 24 * 60 * 60;

    #[test]
    fn second_vote_inside_cooldown_fails() {
        let mut r = VoteRecord::default();
        assert_eq!(r.register(1_000).unwrap(), 1);
        assert!(r.register(1_000 + DAY - 1).is_err());
        // The failed attempt must not have touched the record.
        assert_eq!(r.last_vote_time, 1_000);
        assert_eq!(r.consecutive_days, 1);
    }

    #[test]
    fn next_day_extends_the_streak() {
        let mut r = VoteRecord::default();
        r.register(1_000).unwrap();
        assert_eq!(r.register(1_000 + DAY + 1).unwrap(), 2);
        assert_eq!(r.register(1_000 + DAY + 1 + DAY).unwrap(), 3);
    }

    #[test]
    fn skipping_a_day_resets_the_streak() {
        let mut r = VoteRecord::default();
        r.register(1_000).unwrap();
        r.register(1_000 + DAY).unwrap();
        assert_eq!(r.consecutive_days, 2);
        assert_eq!(r.register(1_000 + DAY + 2 * DAY).unwrap(), 1);
    }

    #[test]
    fn exactly_48h_is_a_reset() {
        let mut r = VoteRecord::default();
        r.register(1_000).unwrap();
        assert_eq!(r.register(1_000 + 2 * DAY).unwrap(), 1);
    }

    #[test]
    fn vote_fee_split_conserves_every_lamport() {
        for fee in [500_000u64, 500_001, 500_002, 500_003, 1_234_567] {
            let (dev, fund, treasury) = vote_fee_split(fee);
            assert_eq!(dev + fund + treasury, fee);
            assert_eq!(dev, fee / 4);
            assert_eq!(fund, fee / 4);
        }
        // The canonical fee splits with no remainder at all.
        let (dev, fund, treasury) = vote_fee_split(500_000);
        assert_eq!((dev, fund, treasury), (125_000, 125_000, 250_000));
    }

    #[test]
    fn power_caps_at_ten_and_doubles_for_holders() {
        assert_eq!(scream_power(1, false), 1);
        assert_eq!(scream_power(1, true), 2);
        assert_eq!(scream_power(7, true), 14);
        assert_eq!(scream_power(10, false), 10);
        assert_eq!(scream_power(25, false), 10);
        assert_eq!(scream_power(25, true), 20);
    }
}
