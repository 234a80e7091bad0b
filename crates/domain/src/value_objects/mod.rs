pub mod amount;
pub mod apr;
pub mod percentage;
pub mod price;
pub mod protocol_revenue;

pub use amount::Amount;
pub use apr::{AprBreakdown, StakingApr};
pub use percentage::{Percentage, round_bps};
pub use price::Price;
pub use protocol_revenue::ProtocolRevenue;
