use soroban_sdk::{contractclient, Address, Env, Symbol};

/// Any contract that can quote an asset price
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    /// Fetch the price of an asset as a fixed point number with 18 decimals
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    ///
    /// ### Panics
    /// If the oracle is unable to produce a price for the asset
    fn get_price(e: Env, asset: Address) -> i128;
}

/// A price oracle that bounds its price with a rate limited snapshot
#[contractclient(name = "SnapshotOracleClient")]
pub trait SnapshotOracle {
    /// Move the snapshot forward if the snapshot interval has passed
    fn update_snapshot(e: Env);
}

/// A price oracle backed by a time weighted average price window
#[contractclient(name = "TwapUpdaterClient")]
pub trait TwapUpdater {
    /// Roll the observation window if the anchor period has passed and refresh the cached price
    ///
    /// Returns the refreshed price
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    fn update_twap(e: Env, asset: Address) -> i128;
}

/// A price oracle that can refresh the state of the sources it aggregates
#[contractclient(name = "AssetPriceUpdaterClient")]
pub trait AssetPriceUpdater {
    /// Refresh every updatable source configured for the asset
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    fn update_asset_price(e: Env, asset: Address);
}

/// Validates a reported price against an anchor price
#[contractclient(name = "PriceValidatorClient")]
pub trait PriceValidator {
    /// Check if the reported price is within the configured bounds of the anchor price
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    /// * `reported_price` - The price being validated
    /// * `anchor_price` - The price used as ground truth
    fn validate_price_with_anchor_price(
        e: Env,
        asset: Address,
        reported_price: i128,
        anchor_price: i128,
    ) -> bool;
}

/// Grants accounts the right to call administrative functions
#[contractclient(name = "AccessControlClient")]
pub trait AccessControl {
    /// Check if `account` may call `function` on the invoking contract
    ///
    /// ### Arguments
    /// * `account` - The account attempting the call
    /// * `function` - The name of the function being called
    fn is_allowed_to_call(e: Env, account: Address, function: Symbol) -> bool;
}
