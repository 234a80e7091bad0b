//! Lookups shared by the valuation and APR engines.

use crate::error::{AnalyticsError, Result};
use lp_yield_data::{PoolProvider, TokenPriceProvider};
use lp_yield_domain::{Pool, PoolToken, Price};
use std::collections::HashSet;

/// Ids of the pools on the current recursion path, lowercased.
pub(crate) type Ancestors = HashSet<String>;

/// Extends the recursion path with `pool`.
///
/// Fails if `pool` is already on the path. Pools reached twice through
/// different parents are not on each other's path and are fine.
pub(crate) fn descend(ancestors: &Ancestors, pool: &Pool) -> Result<Ancestors> {
    let id = pool.id.to_ascii_lowercase();
    if ancestors.contains(&id) {
        return Err(AnalyticsError::CyclicPoolReference {
            pool_id: pool.id.clone(),
        });
    }
    let mut path = ancestors.clone();
    path.insert(id);
    Ok(path)
}

/// Outcome of looking up the pool behind a token.
#[derive(Debug)]
pub(crate) enum NestedPool {
    /// The token is the BPT of this pool.
    Found(Pool),
    /// The token is marked as a BPT but its pool cannot be found.
    Missing(String),
    /// The token is not a BPT.
    NotAPool,
}

/// Finds the pool a token is the BPT of.
///
/// A token carrying a pool id hint is resolved by id; any other token is
/// probed by address.
pub(crate) async fn find_nested_pool(
    pools: &dyn PoolProvider,
    token: &PoolToken,
) -> Result<NestedPool> {
    match &token.pool_id {
        Some(pool_id) => Ok(match pools.find_pool(pool_id).await? {
            Some(pool) => NestedPool::Found(pool),
            None => NestedPool::Missing(pool_id.clone()),
        }),
        None => Ok(match pools.find_pool_by_address(&token.address).await? {
            Some(pool) => NestedPool::Found(pool),
            None => NestedPool::NotAPool,
        }),
    }
}

/// USD price of a token, preferring the price cached on the snapshot.
pub(crate) async fn resolve_token_price(
    prices: &dyn TokenPriceProvider,
    token: &PoolToken,
) -> Result<Price> {
    if let Some(price) = token.price {
        return Ok(price);
    }
    prices
        .find_price(&token.address)
        .await?
        .ok_or_else(|| AnalyticsError::MissingPrice {
            token: token.address.clone(),
        })
}
