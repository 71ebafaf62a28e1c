use anchor_lang::prelude::*;

// Emitted when a token / curve pair is registered
#[event]
pub struct TokenCreated {
    pub mint: Pubkey,
    pub curve: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
}

// Emitted on successful buy (SOL -> token)
#[event]
pub struct TokensPurchased {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub sol_in: u64, // gross paid by the buyer (before fee)
    pub fee: u64,
    pub tokens_out: u64,
    pub virtual_sol_after: u64,
    pub virtual_token_after: u64,
}

// Emitted on successful sell (token -> SOL)
#[event]
pub struct TokensSold {
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub fee: u64,
    pub rage_tax: u64,
    pub sol_out: u64, // net paid to the seller
    pub virtual_sol_after: u64,
    pub virtual_token_after: u64,
}

#[event]
pub struct RageTaxCollected {
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub tax: u64,
    pub to_fund: u64,
    pub to_dev: u64,
}

// Emitted once per curve, when trading moves to the external pool
#[event]
pub struct CurveMigrated {
    pub mint: Pubkey,
    pub pool: Pubkey,
    pub sol_seeded: u64,
    pub tokens_seeded: u64,
}

#[event]
pub struct TokenScreamed {
    pub mint: Pubkey,
    pub voter: Pubkey,
    pub scream_power: u64,
    pub consecutive_days: u32,
    pub daily_screams: u64,
    pub total_screams: u64,
}

#[event]
pub struct RageFundDeposited {
    pub mint: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

#[event]
pub struct RageFundWithdrawn {
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RageFundClaimed {
    pub mint: Pubkey,
    pub claimant: Pubkey,
    pub amount: u64,
}
