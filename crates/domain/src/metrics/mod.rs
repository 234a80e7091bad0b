//! Pure fee and yield formulas shared by the APR engine.

pub mod fees;

pub use fees::{annualize, daily_fees, days_live, swap_fee_apr_bps};
