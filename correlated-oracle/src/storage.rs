use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Symbol};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

/********** Storage Types **********/

/// The on-chain source of the correlated token's exchange rate
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum RateSource {
    // A staking pool exposing `exchange_rate()`
    StakePool(Address),
    // A vault exposing `convert_to_assets(shares)`
    Vault(Address),
    // An accountant exposing `get_rate()`
    Accountant(Address),
    // An oracle quoting the correlated token in units of the underlying, with 18 decimals
    Jump(Address),
}

/// The tokens priced by the oracle and where the prices come from
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CorrelatedConfig {
    pub correlated_token: Address,
    pub underlying_token: Address,
    pub price_source: Address, // the oracle quoting the underlying token
    pub rate_source: RateSource,
}

/// One whole unit of each token, read from the token contracts at initialization
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TokenUnits {
    pub correlated_unit: i128,
    pub underlying_unit: i128,
}

/// The growth allowed for the exchange rate between snapshots
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct GrowthConfig {
    pub annual_growth_rate: i128, // the maximum yearly growth of the exchange rate, expressed in 18 decimals
    pub snapshot_interval: u64,   // the minimum number of seconds between snapshots
    pub snapshot_gap: i128,       // an absolute buffer added to the cap, expressed in 18 decimals
}

/// A checkpoint of the maximum trusted exchange rate
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Snapshot {
    pub max_exchange_rate: i128, // expressed in 18 decimals
    pub timestamp: u64,
}

/********** Storage Key Types **********/

const ACCESS_CONTROL_KEY: &str = "AccessCtl";
const CONFIG_KEY: &str = "Config";
const UNITS_KEY: &str = "Units";
const GROWTH_KEY: &str = "Growth";
const SNAPSHOT_KEY: &str = "Snapshot";

/****************************
**         Storage         **
****************************/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** Access Control **********/

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

/********** Config **********/

/// Fetch the correlated token config
pub fn get_config(e: &Env) -> CorrelatedConfig {
    e.storage()
        .instance()
        .get::<Symbol, CorrelatedConfig>(&Symbol::new(e, CONFIG_KEY))
        .unwrap_optimized()
}

/// Set the correlated token config
///
/// ### Arguments
/// * `config` - The correlated token config
pub fn set_config(e: &Env, config: &CorrelatedConfig) {
    e.storage()
        .instance()
        .set::<Symbol, CorrelatedConfig>(&Symbol::new(e, CONFIG_KEY), config);
}

/// Fetch the token units
pub fn get_units(e: &Env) -> TokenUnits {
    e.storage()
        .instance()
        .get::<Symbol, TokenUnits>(&Symbol::new(e, UNITS_KEY))
        .unwrap_optimized()
}

/// Set the token units
///
/// ### Arguments
/// * `units` - One whole unit of each token
pub fn set_units(e: &Env, units: &TokenUnits) {
    e.storage()
        .instance()
        .set::<Symbol, TokenUnits>(&Symbol::new(e, UNITS_KEY), units);
}

/********** Growth **********/

/// Fetch the growth config
pub fn get_growth_config(e: &Env) -> GrowthConfig {
    e.storage()
        .instance()
        .get::<Symbol, GrowthConfig>(&Symbol::new(e, GROWTH_KEY))
        .unwrap_optimized()
}

/// Set the growth config
///
/// ### Arguments
/// * `growth` - The growth config
pub fn set_growth_config(e: &Env, growth: &GrowthConfig) {
    e.storage()
        .instance()
        .set::<Symbol, GrowthConfig>(&Symbol::new(e, GROWTH_KEY), growth);
}

/// Fetch the snapshot
pub fn get_snapshot(e: &Env) -> Snapshot {
    e.storage()
        .instance()
        .get::<Symbol, Snapshot>(&Symbol::new(e, SNAPSHOT_KEY))
        .unwrap_optimized()
}

/// Set the snapshot
///
/// ### Arguments
/// * `snapshot` - The new snapshot
pub fn set_snapshot(e: &Env, snapshot: &Snapshot) {
    e.storage()
        .instance()
        .set::<Symbol, Snapshot>(&Symbol::new(e, SNAPSHOT_KEY), snapshot);
}
