pub mod create_global_state;
pub use create_global_state::*;

pub mod oracle_admin;
pub use oracle_admin::*;

pub mod wallet_admin;
pub use wallet_admin::*;

pub mod emergency_withdraw;
pub use emergency_withdraw::*;
