use oracle_interfaces::{
    math::unit, AssetPriceUpdaterClient, PriceOracleClient, SnapshotOracleClient,
    TwapUpdaterClient,
};
use sep_40_oracle::{Asset, PriceFeedClient};
use soroban_sdk::{Address, Env};

use crate::storage::{FeedSource, PriceSource};

impl PriceSource {
    /// Fetch the price of an asset from the source as a fixed point number with 18 decimals
    ///
    /// Returns 0 if the source fails, is stale, or reports a non-positive price
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    pub fn price(&self, e: &Env, asset: &Address) -> i128 {
        let price = match self {
            PriceSource::Feed(feed) => feed_price(e, feed, asset),
            PriceSource::Capped(oracle)
            | PriceSource::Twap(oracle)
            | PriceSource::Resilient(oracle) => oracle_price(e, oracle, asset),
        };
        match price {
            Some(price) if price > 0 => price,
            _ => 0,
        }
    }

    /// Refresh any state the source keeps for the asset. Failures are ignored.
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    pub fn update(&self, e: &Env, asset: &Address) {
        match self {
            PriceSource::Feed(_) => {}
            PriceSource::Capped(oracle) => {
                let _ = SnapshotOracleClient::new(e, oracle).try_update_snapshot();
            }
            PriceSource::Twap(oracle) => {
                let _ = TwapUpdaterClient::new(e, oracle).try_update_twap(asset);
            }
            PriceSource::Resilient(oracle) => {
                let _ = AssetPriceUpdaterClient::new(e, oracle).try_update_asset_price(asset);
            }
        }
    }

    /// The address of the contract backing the source
    pub fn address(&self) -> &Address {
        match self {
            PriceSource::Feed(feed) => &feed.feed,
            PriceSource::Capped(oracle)
            | PriceSource::Twap(oracle)
            | PriceSource::Resilient(oracle) => oracle,
        }
    }
}

fn oracle_price(e: &Env, oracle: &Address, asset: &Address) -> Option<i128> {
    match PriceOracleClient::new(e, oracle).try_get_price(asset) {
        Ok(Ok(price)) => Some(price),
        _ => None,
    }
}

fn feed_price(e: &Env, feed: &FeedSource, asset: &Address) -> Option<i128> {
    let price_data = match PriceFeedClient::new(e, &feed.feed)
        .try_lastprice(&Asset::Stellar(asset.clone()))
    {
        Ok(Ok(Some(price_data))) => price_data,
        _ => return None,
    };
    if price_data.timestamp.saturating_add(feed.max_age) < e.ledger().timestamp() {
        return None;
    }
    let scalar = unit(18u32.checked_sub(feed.decimals)?)?;
    price_data.price.checked_mul(scalar)
}
