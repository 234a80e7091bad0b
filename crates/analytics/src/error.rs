//! Error types for liquidity valuation and APR composition.

/// Result alias used throughout the analytics engines.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors raised while valuing a pool or composing its APR.
///
/// Absent yield sources are not errors: a missing gauge, a missing swap fee
/// snapshot or an unresolvable nested pool reference all count as zero.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A counted token has no USD price.
    #[error("No USD price for token {token}")]
    MissingPrice { token: String },
    /// A nested pool was found but its BPT cannot be valued.
    #[error("Cannot value BPT of nested pool {pool_id}: {reason}")]
    MissingLiquidity { pool_id: String, reason: &'static str },
    /// Protocol revenue APR requested for a pool without a liquidity snapshot.
    #[error("Pool {pool_id} has no total liquidity snapshot")]
    MissingLiquidityBaseline { pool_id: String },
    /// A pool is reachable from itself through BPT holdings.
    #[error("Pool {pool_id} references itself through nested BPT holdings")]
    CyclicPoolReference { pool_id: String },
    /// A configured divisor was zero.
    #[error("Division by zero computing {0}")]
    DivisionByZero(&'static str),
    /// A value does not fit the numeric type.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
    /// A data provider failed.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}
