use soroban_sdk::{
    contracttype, unwrap::UnwrapOptimized, Address, Env, IntoVal, Symbol, TryFromVal, Val, U256,
};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

/********** Storage Types **********/

/// The pool and window used to price an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TwapTokenConfig {
    pub asset: Address,
    pub base_unit: i128,       // one whole unit of the asset
    pub quote_base_unit: i128, // one whole unit of the token the pool quotes the asset in
    pub pool: Address,
    pub is_native_based: bool, // if the pool quotes the asset in the native asset
    pub is_reversed: bool,     // if the asset is token 1 of the pool
    pub anchor_period: u64,    // the minimum length of the observation window, in seconds
}

/// A cumulative price observation
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Observation {
    pub timestamp: u64,
    pub acc: U256, // the cumulative price, as a UQ112x112 number
}

/// The observations bounding the TWAP window of an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TwapWindow {
    pub old: Observation,
    pub new: Observation,
}

/// The last price computed for an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CachedPrice {
    pub price: i128, // expressed in 18 decimals
    pub timestamp: u64,
}

/********** Storage Key Types **********/

const ACCESS_CONTROL_KEY: &str = "AccessCtl";
const NATIVE_ASSET_KEY: &str = "Native";

#[derive(Clone)]
#[contracttype]
pub enum TwapDataKey {
    // A map of an asset's address to its token config
    Config(Address),
    // A map of an asset's address to its observation window
    Window(Address),
    // A map of an asset's address to its cached price
    Price(Address),
}

/****************************
**         Storage         **
****************************/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Fetch an entry in persistent storage, bumping it if it exists
fn get_persistent<V: TryFromVal<Env, Val>>(
    e: &Env,
    key: &TwapDataKey,
) -> Option<V> {
    let result = e.storage().persistent().get::<TwapDataKey, V>(key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    }
    result
}

/// Set an entry in persistent storage and bump it
fn set_persistent<V: IntoVal<Env, Val>>(
    e: &Env,
    key: &TwapDataKey,
    value: &V,
) {
    e.storage().persistent().set::<TwapDataKey, V>(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** External Contracts **********/

/// Fetch the access control contract
pub fn get_access_control(e: &Env) -> Address {
    e.storage()
        .instance()
        .get::<Symbol, Address>(&Symbol::new(e, ACCESS_CONTROL_KEY))
        .unwrap_optimized()
}

/// Set the access control contract
///
/// ### Arguments
/// * `access_control` - The address of the access control contract
pub fn set_access_control(e: &Env, access_control: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ACCESS_CONTROL_KEY), access_control);
}

/// Checks if the access control contract is set
pub fn has_access_control(e: &Env) -> bool {
    e.storage()
        .instance()
        .has(&Symbol::new(e, ACCESS_CONTROL_KEY))
}

/// Fetch the wrapped native asset
pub fn get_native_asset(e: &Env) -> Address {
    e.storage()
        .instance()
        .get::<Symbol, Address>(&Symbol::new(e, NATIVE_ASSET_KEY))
        .unwrap_optimized()
}

/// Set the wrapped native asset
///
/// ### Arguments
/// * `native_asset` - The address of the wrapped native asset
pub fn set_native_asset(e: &Env, native_asset: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, NATIVE_ASSET_KEY), native_asset);
}

/********** Token Configs **********/

/// Fetch the token config for an asset, if one exists
///
/// ### Arguments
/// * `asset` - The address of the asset
pub fn get_token_config(e: &Env, asset: &Address) -> Option<TwapTokenConfig> {
    get_persistent(e, &TwapDataKey::Config(asset.clone()))
}

/// Set the token config for an asset
///
/// ### Arguments
/// * `config` - The token config, keyed by its asset
pub fn set_token_config(e: &Env, config: &TwapTokenConfig) {
    set_persistent(e, &TwapDataKey::Config(config.asset.clone()), config);
}

/********** Observations **********/

/// Fetch the observation window for an asset
///
/// ### Panics
/// If the asset has no observation window
pub fn get_window(e: &Env, asset: &Address) -> TwapWindow {
    get_persistent(e, &TwapDataKey::Window(asset.clone())).unwrap_optimized()
}

/// Set the observation window for an asset
///
/// ### Arguments
/// * `asset` - The address of the asset
/// * `window` - The observation window
pub fn set_window(e: &Env, asset: &Address, window: &TwapWindow) {
    set_persistent(e, &TwapDataKey::Window(asset.clone()), window);
}

/********** Prices **********/

/// Fetch the cached price for an asset, if one exists
///
/// ### Arguments
/// * `asset` - The address of the asset
pub fn get_cached_price(e: &Env, asset: &Address) -> Option<CachedPrice> {
    get_persistent(e, &TwapDataKey::Price(asset.clone()))
}

/// Set the cached price for an asset
///
/// ### Arguments
/// * `asset` - The address of the asset
/// * `price` - The cached price
pub fn set_cached_price(e: &Env, asset: &Address, price: &CachedPrice) {
    set_persistent(e, &TwapDataKey::Price(asset.clone()), price);
}
