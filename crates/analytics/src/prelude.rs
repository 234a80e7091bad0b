//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_yield_analytics::prelude::*;
//! ```

// Engines
pub use crate::apr::AprEngine;
pub use crate::liquidity::LiquidityEngine;

// Configuration and time
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::AprConfig;

// Errors
pub use crate::error::{AnalyticsError, Result};

// Strategies
pub use crate::strategy::{LiquidityStrategy, PricedPoolToken};
