use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

/// Ordered table of every launched token, with its vote counters. The
/// account grows by realloc on each launch; registration order is the
/// stable tiebreak for both leaderboards.
#[account]
#[derive(Default)]
pub struct Registry {
    pub bump: u8,
    pub tokens: Vec<TokenEntry>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default)]
pub struct TokenEntry {
    pub mint: Pubkey,
    pub curve: Pubkey,
    pub daily_screams: u64,
    pub total_screams: u64,
    pub daily_window_start: i64,
}

impl TokenEntry {
    pub const SIZE: usize = 32 + 32 + 8 + 8 + 8;

    /// Folds one scream of `weight` into the counters, rolling the daily
    /// window when more than 24h have passed since it opened.
    pub fn apply_scream(&mut self, weight: u64, now: i64) -> Result<()> {
        if now > self.daily_window_start + DAILY_WINDOW_SECS {
            self.daily_screams = weight;
            self.daily_window_start = now;
        } else {
            self.daily_screams = self
                .daily_screams
                .checked_add(weight)
                .ok_or(ErrorCode::Overflow)?;
        }
        self.total_screams = self
            .total_screams
            .checked_add(weight)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }
}

impl Registry {
    pub fn space_for(entries: usize) -> usize {
        8 + 1 + 4 + entries * TokenEntry::SIZE
    }

    pub fn push(&mut self, mint: Pubkey, curve: Pubkey, now: i64) -> Result<()> {
        require!(self.tokens.len() < MAX_TOKENS, ErrorCode::TokenLimitReached);
        self.tokens.push(TokenEntry {
            mint,
            curve,
            daily_screams: 0,
            total_screams: 0,
            daily_window_start: now,
        });
        Ok(())
    }

    pub fn entry_mut(&mut self, mint: &Pubkey) -> Result<&mut TokenEntry> {
        self.tokens
            .iter_mut()
            .find(|e| e.mint == *mint)
            .ok_or_else(|| error!(ErrorCode::UnknownToken))
    }

    pub fn top_daily(&self, limit: usize) -> Vec<Pubkey> {
        self.top_by(limit, |e| e.daily_screams)
    }

    pub fn top_all_time(&self, limit: usize) -> Vec<Pubkey> {
        self.top_by(limit, |e| e.total_screams)
    }

    // Stable sort keeps ties in registration order; only the real set is
    // returned, never padding.
    fn top_by(&self, limit: usize, score: impl Fn(&TokenEntry) -> u64) -> Vec<Pubkey> {
        let mut ranked: Vec<&TokenEntry> = self.tokens.iter().collect();
        ranked.sort_by(|a, b| score(b).cmp(&score(a)));
        ranked
            .into_iter()
            .take(limit.min(self.tokens.len()))
            .map(|e| e.mint)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 24 * 60 * 60;

    fn registry_with(scores: &[(u64, u64)]) -> (Registry, Vec<Pubkey>) {
        let mut registry = Registry::default();
        let mut mints = Vec::new();
        for (i, (daily, total)) in scores.iter().enumerate() {
            let mint = Pubkey::new_from_array([i as u8 + 1; 32]);
            registry.push(mint, Pubkey::default(), 0).unwrap();
            registry.tokens[i].daily_screams = *daily;
            registry.tokens[i].total_screams = *total;
            mints.push(mint);
        }
        (registry, mints)
    }

    #[test]
    fn daily_and_all_time_rankings_are_independent() {
        let (registry, mints) = registry_with(&[(5, 100), (20, 40), (10, 70)]);
        assert_eq!(registry.top_daily(3), vec![mints[1], mints[2], mints[0]]);
        assert_eq!(registry.top_all_time(3), vec![mints[0], mints[2], mints[1]]);
    }

    #[test]
    fn ties_keep_registration_order() {
        let (registry, mints) = registry_with(&[(7, 7), (7, 7), (9, 1)]);
        assert_eq!(registry.top_daily(3), vec![mints[2], mints[0], mints[1]]);
    }

    #[test]
    fn oversized_limit_returns_the_real_set() {
        let (registry, _) = registry_with(&[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(registry.top_daily(100).len(), 3);
        assert_eq!(Registry::default().top_daily(10).len(), 0);
    }

    #[test]
    fn daily_window_resets_but_totals_accumulate() {
        let (mut registry, mints) = registry_with(&[(0, 0)]);
        let entry = registry.entry_mut(&mints[0]).unwrap();

        entry.apply_scream(3, 100).unwrap();
        entry.apply_scream(2, 200).unwrap();
        assert_eq!(entry.daily_screams, 5);
        assert_eq!(entry.total_screams, 5);

        entry.apply_scream(4, 200 + DAY + 1).unwrap();
        assert_eq!(entry.daily_screams, 4);
        assert_eq!(entry.daily_window_start, 200 + DAY + 1);
        assert_eq!(entry.total_screams, 9);
    }

    #[test]
    fn unknown_mint_is_rejected() {
        let (mut registry, _) = registry_with(&[(0, 0)]);
        assert!(registry.entry_mut(&Pubkey::new_from_array([99; 32])).is_err());
    }
}
