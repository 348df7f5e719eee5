use oracle_interfaces::{math::unit, PriceOracleClient};
use sep_41_token::TokenClient;
use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    errors::CorrelatedOracleError,
    pricer::SnapshotPricer,
    rate::RateAdapter,
    storage::{self, CorrelatedConfig, GrowthConfig, RateSource, Snapshot, TokenUnits},
};

/// Initialize the correlated oracle
///
/// ### Panics
/// If the contract is already initialized or any argument is invalid
pub fn execute_initialize(
    e: &Env,
    access_control: &Address,
    config: &CorrelatedConfig,
    growth: &GrowthConfig,
    snapshot: &Snapshot,
) {
    if storage::has_access_control(e) {
        panic_with_error!(e, CorrelatedOracleError::AlreadyInitializedError);
    }
    require_valid_config(e, config);
    require_valid_growth(e, growth.annual_growth_rate, growth.snapshot_interval);
    if growth.snapshot_gap < 0 {
        panic_with_error!(e, CorrelatedOracleError::BadRequest);
    }
    if growth.snapshot_interval > 0
        && (snapshot.max_exchange_rate <= 0 || snapshot.timestamp == 0)
    {
        panic_with_error!(e, CorrelatedOracleError::InvalidInitialSnapshot);
    }
    if snapshot.timestamp > e.ledger().timestamp() {
        panic_with_error!(e, CorrelatedOracleError::InvalidTimestamp);
    }

    let units = TokenUnits {
        correlated_unit: load_unit(e, &config.correlated_token),
        underlying_unit: load_unit(e, &config.underlying_token),
    };

    storage::set_access_control(e, access_control);
    storage::set_config(e, config);
    storage::set_units(e, &units);
    storage::set_growth_config(e, growth);
    storage::set_snapshot(e, snapshot);
}

/// Update the growth rate and snapshot interval
///
/// ### Panics
/// If exactly one of the values is zero, the rate is negative, or capping is enabled
/// without a valid snapshot
pub fn execute_set_growth_rate(e: &Env, annual_growth_rate: i128, snapshot_interval: u64) {
    require_valid_growth(e, annual_growth_rate, snapshot_interval);
    if snapshot_interval > 0 {
        let snapshot = storage::get_snapshot(e);
        if snapshot.max_exchange_rate <= 0 || snapshot.timestamp == 0 {
            panic_with_error!(e, CorrelatedOracleError::InvalidInitialSnapshot);
        }
    }
    let mut growth = storage::get_growth_config(e);
    growth.annual_growth_rate = annual_growth_rate;
    growth.snapshot_interval = snapshot_interval;
    storage::set_growth_config(e, &growth);
}

/// Update the absolute buffer added to the cap
///
/// ### Panics
/// If the gap is negative
pub fn execute_set_snapshot_gap(e: &Env, snapshot_gap: i128) {
    if snapshot_gap < 0 {
        panic_with_error!(e, CorrelatedOracleError::BadRequest);
    }
    let mut growth = storage::get_growth_config(e);
    growth.snapshot_gap = snapshot_gap;
    storage::set_growth_config(e, &growth);
}

/// Override the snapshot
///
/// ### Panics
/// If either value is zero or the timestamp is in the future or before the current snapshot
pub fn execute_set_snapshot(e: &Env, max_exchange_rate: i128, timestamp: u64) -> Snapshot {
    if max_exchange_rate <= 0 || timestamp == 0 {
        panic_with_error!(e, CorrelatedOracleError::BadRequest);
    }
    let current = storage::get_snapshot(e);
    if timestamp > e.ledger().timestamp() || timestamp < current.timestamp {
        panic_with_error!(e, CorrelatedOracleError::InvalidTimestamp);
    }
    let snapshot = Snapshot {
        max_exchange_rate,
        timestamp,
    };
    storage::set_snapshot(e, &snapshot);
    snapshot
}

/// Move the snapshot forward if one is due
///
/// Returns the new snapshot, or None if no snapshot was taken
pub fn execute_update_snapshot(e: &Env) -> Option<Snapshot> {
    let pricer = load_pricer(e);
    let snapshot = pricer.next_snapshot(e)?;
    storage::set_snapshot(e, &snapshot);
    Some(snapshot)
}

/// Fetch the price of the correlated token
///
/// ### Panics
/// If `asset` is not the correlated token, or a source fails
pub fn load_price(e: &Env, asset: &Address) -> i128 {
    let config = storage::get_config(e);
    if *asset != config.correlated_token {
        panic_with_error!(e, CorrelatedOracleError::InvalidTokenAddress);
    }
    let (amount, _) = load_pricer(e).capped_amount(e);
    let underlying_price =
        PriceOracleClient::new(e, &config.price_source).get_price(&config.underlying_token);
    SnapshotPricer::<RateAdapter>::value(e, amount, underlying_price)
}

/// Load the pricer with the stored configuration
pub fn load_pricer(e: &Env) -> SnapshotPricer<RateAdapter> {
    let config = storage::get_config(e);
    let adapter = RateAdapter::new(
        config.rate_source,
        config.correlated_token,
        storage::get_units(e),
    );
    SnapshotPricer::new(
        adapter,
        storage::get_growth_config(e),
        storage::get_snapshot(e),
    )
}

fn load_unit(e: &Env, token: &Address) -> i128 {
    let decimals = TokenClient::new(e, token).decimals();
    match unit(decimals) {
        Some(unit) => unit,
        None => panic_with_error!(e, CorrelatedOracleError::InvalidConfig),
    }
}

fn require_valid_growth(e: &Env, annual_growth_rate: i128, snapshot_interval: u64) {
    if annual_growth_rate < 0 || ((annual_growth_rate == 0) != (snapshot_interval == 0)) {
        panic_with_error!(e, CorrelatedOracleError::InvalidGrowthRate);
    }
}

fn require_valid_config(e: &Env, config: &CorrelatedConfig) {
    let this = e.current_contract_address();
    let rate_contract = match &config.rate_source {
        RateSource::StakePool(address)
        | RateSource::Vault(address)
        | RateSource::Accountant(address)
        | RateSource::Jump(address) => address,
    };
    if config.correlated_token == config.underlying_token
        || config.price_source == this
        || *rate_contract == this
    {
        panic_with_error!(e, CorrelatedOracleError::InvalidConfig);
    }
}
