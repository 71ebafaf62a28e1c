pub mod global_state;
pub use global_state::*;

pub mod bonding_curve;
pub use bonding_curve::*;

pub mod user_position;
pub use user_position::*;

pub mod vote_record;
pub use vote_record::*;

pub mod registry;
pub use registry::*;

pub mod rage_fund;
pub use rage_fund::*;

pub mod price_feed;
pub use price_feed::*;
