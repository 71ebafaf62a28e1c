use anchor_lang::prelude::*;

/// Which variant of the price capability served a threshold computation.
#[derive(Default, AnchorSerialize, AnchorDeserialize, Copy, Clone, PartialEq, Eq)]
pub enum PriceSource {
    #[default]
    Feed = 0,
    Fallback = 1,
}
