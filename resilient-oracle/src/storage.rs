use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Symbol};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

/********** Storage Types **********/

/// A SEP-40 price feed read directly by the resolver
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeedSource {
    pub feed: Address,
    pub decimals: u32, // the decimals of the prices reported by the feed
    pub max_age: u64,  // the maximum age of a reported price, in seconds
}

/// A source the resolver can query for a price
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum PriceSource {
    // A SEP-40 price feed
    Feed(FeedSource),
    // A growth capped correlated token oracle
    Capped(Address),
    // A TWAP oracle
    Twap(Address),
    // Another resilient oracle
    Resilient(Address),
}

/// The position of a source in a token config
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum OracleRole {
    Main = 0,
    Pivot = 1,
    Fallback = 2,
}

/// A price source and if the resolver may query it
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct OracleSlot {
    pub source: Option<PriceSource>,
    pub enabled: bool,
}

/// The sources used to resolve the price of an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TokenConfig {
    pub asset: Address,
    pub main: OracleSlot,
    pub pivot: OracleSlot,
    pub fallback: OracleSlot,
}

impl TokenConfig {
    /// Fetch the slot for a role
    pub fn slot(&self, role: OracleRole) -> &OracleSlot {
        match role {
            OracleRole::Main => &self.main,
            OracleRole::Pivot => &self.pivot,
            OracleRole::Fallback => &self.fallback,
        }
    }

    /// Fetch the slot for a role as mutable
    pub fn slot_mut(&mut self, role: OracleRole) -> &mut OracleSlot {
        match role {
            OracleRole::Main => &mut self.main,
            OracleRole::Pivot => &mut self.pivot,
            OracleRole::Fallback => &mut self.fallback,
        }
    }
}

/********** Storage Key Types **********/

const ACCESS_CONTROL_KEY: &str = "AccessCtl";
const BOUND_VALIDATOR_KEY: &str = "BoundVal";
const PAUSED_KEY: &str = "Paused";

#[derive(Clone)]
#[contracttype]
pub enum ResilientOracleDataKey {
    // A map of an asset's address to its token config
    Config(Address),
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

/// Fetch the bound validator contract
pub fn get_bound_validator(e: &Env) -> Address {
    e.storage()
        .instance()
        .get::<Symbol, Address>(&Symbol::new(e, BOUND_VALIDATOR_KEY))
        .unwrap_optimized()
}

/// Set the bound validator contract
///
/// ### Arguments
/// * `bound_validator` - The address of the bound validator contract
pub fn set_bound_validator(e: &Env, bound_validator: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, BOUND_VALIDATOR_KEY), bound_validator);
}

/********** Status **********/

/// Checks if price reads are paused
pub fn get_paused(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<Symbol, bool>(&Symbol::new(e, PAUSED_KEY))
        .unwrap_or(false)
}

/// Set if price reads are paused
///
/// ### Arguments
/// * `paused` - The new paused status
pub fn set_paused(e: &Env, paused: bool) {
    e.storage()
        .instance()
        .set::<Symbol, bool>(&Symbol::new(e, PAUSED_KEY), &paused);
}

/********** Token Configs **********/

/// Fetch the token config for an asset, if one exists
///
/// ### Arguments
/// * `asset` - The address of the asset
pub fn get_token_config(e: &Env, asset: &Address) -> Option<TokenConfig> {
    let key = ResilientOracleDataKey::Config(asset.clone());
    let result = e
        .storage()
        .persistent()
        .get::<ResilientOracleDataKey, TokenConfig>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    }
    result
}

/// Set the token config for an asset
///
/// ### Arguments
/// * `config` - The token config, keyed by its asset
pub fn set_token_config(e: &Env, config: &TokenConfig) {
    let key = ResilientOracleDataKey::Config(config.asset.clone());
    e.storage()
        .persistent()
        .set::<ResilientOracleDataKey, TokenConfig>(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}
