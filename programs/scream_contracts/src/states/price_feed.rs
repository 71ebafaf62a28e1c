use std::ops::Deref;
use std::str::FromStr;

use anchor_lang::prelude::*;
use pyth_sdk_solana::state::load_price_account;

use crate::errors::ErrorCode;

#[cfg(feature = "dev")]
pub const PYTH_ORACLE_PROGRAM: &str = "gSbePebfvPy7tRqimPoVecS2UsBvYv46ynrzWocc92s";

#[cfg(feature = "prod")]
pub const PYTH_ORACLE_PROGRAM: &str = "FsJ3A3u2vn5cTVofAjvy6y5kwABJAqYWpe4975bi2epH";

/// Anchor wrapper over a raw Pyth price account, so feeds can sit in
/// account contexts with owner validation for free.
#[derive(Clone)]
pub struct PriceFeed(pyth_sdk::PriceFeed);

impl anchor_lang::Owner for PriceFeed {
    fn owner() -> Pubkey {
        Pubkey::from_str(PYTH_ORACLE_PROGRAM).unwrap()
    }
}

impl anchor_lang::AccountDeserialize for PriceFeed {
    fn try_deserialize_unchecked(data: &mut &[u8]) -> Result<Self> {
        let account = load_price_account(data).map_err(|_| error!(ErrorCode::PythError))?;
        // The feed id is irrelevant here, only price/publish-time are read.
        let zeros: [u8; 32] = [0; 32];
        let dummy_key = Pubkey::new_from_array(zeros);
        Ok(PriceFeed(account.to_price_feed(&dummy_key)))
    }
}

impl anchor_lang::AccountSerialize for PriceFeed {
    fn try_serialize<W: std::io::Write>(&self, _writer: &mut W) -> Result<()> {
        err!(ErrorCode::TryToSerializePriceAccount)
    }
}

impl Deref for PriceFeed {
    type Target = pyth_sdk::PriceFeed;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
