use crate::{
    config,
    errors::CorrelatedOracleError,
    storage::{self, CorrelatedConfig, GrowthConfig, Snapshot},
};
use oracle_interfaces::{is_allowed, PriceOracle, SnapshotOracle};
use soroban_sdk::{contract, contractclient, contractimpl, panic_with_error, Address, Env, Symbol};

/// ### CorrelatedOracle
///
/// Prices a token whose value tracks an underlying token through an on-chain exchange rate.
/// The exchange rate is capped by the growth allowed since the last snapshot, so a rate that
/// jumps within a single transaction cannot inflate the price.
#[contract]
pub struct CorrelatedOracleContract;

#[contractclient(name = "CorrelatedOracleClient")]
pub trait CorrelatedOracle {
    /// Initialize the correlated oracle
    ///
    /// ### Arguments
    /// * `access_control` - The access control contract consulted for administrative calls
    /// * `config` - The tokens priced and the contracts that price them
    /// * `growth` - The growth allowed for the exchange rate
    /// * `snapshot` - The initial snapshot
    ///
    /// ### Panics
    /// If initialize has already been called or any argument is invalid
    fn initialize(
        e: Env,
        access_control: Address,
        config: CorrelatedConfig,
        growth: GrowthConfig,
        snapshot: Snapshot,
    );

    /// Check if the exchange rate is currently limited by the cap
    fn is_capped(e: Env) -> bool;

    /// Fetch the uncapped exchange rate, expressed in 18 decimals
    fn get_underlying_amount(e: Env) -> i128;

    /// Fetch the maximum exchange rate allowed now, expressed in 18 decimals
    ///
    /// If capping is disabled this is the uncapped exchange rate
    fn get_max_allowed_exchange_rate(e: Env) -> i128;

    /// (Access controlled) Set the growth rate and snapshot interval. Setting both to zero
    /// disables capping.
    ///
    /// ### Arguments
    /// * `caller` - The account making the change
    /// * `annual_growth_rate` - The maximum yearly growth, expressed in 18 decimals
    /// * `snapshot_interval` - The minimum number of seconds between snapshots
    fn set_growth_rate(e: Env, caller: Address, annual_growth_rate: i128, snapshot_interval: u64);

    /// (Access controlled) Set the absolute buffer added to the cap
    ///
    /// ### Arguments
    /// * `caller` - The account making the change
    /// * `snapshot_gap` - The buffer, expressed in 18 decimals
    fn set_snapshot_gap(e: Env, caller: Address, snapshot_gap: i128);

    /// (Access controlled) Override the snapshot
    ///
    /// ### Arguments
    /// * `caller` - The account making the change
    /// * `max_exchange_rate` - The maximum exchange rate, expressed in 18 decimals
    /// * `timestamp` - The time of the snapshot
    fn set_snapshot(e: Env, caller: Address, max_exchange_rate: i128, timestamp: u64);

    /// Fetch the correlated token config
    fn config(e: Env) -> CorrelatedConfig;

    /// Fetch the growth config
    fn growth_config(e: Env) -> GrowthConfig;

    /// Fetch the snapshot
    fn snapshot(e: Env) -> Snapshot;
}

#[contractimpl]
impl CorrelatedOracle for CorrelatedOracleContract {
    fn initialize(
        e: Env,
        access_control: Address,
        config: CorrelatedConfig,
        growth: GrowthConfig,
        snapshot: Snapshot,
    ) {
        storage::extend_instance(&e);

        config::execute_initialize(&e, &access_control, &config, &growth, &snapshot);
    }

    fn is_capped(e: Env) -> bool {
        config::load_pricer(&e).is_capped(&e)
    }

    fn get_underlying_amount(e: Env) -> i128 {
        config::load_pricer(&e).underlying_amount(&e)
    }

    fn get_max_allowed_exchange_rate(e: Env) -> i128 {
        let pricer = config::load_pricer(&e);
        match pricer.max_allowed_exchange_rate(&e) {
            Some(max_allowed) => max_allowed,
            None => pricer.underlying_amount(&e),
        }
    }

    fn set_growth_rate(e: Env, caller: Address, annual_growth_rate: i128, snapshot_interval: u64) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_growth_rate");

        config::execute_set_growth_rate(&e, annual_growth_rate, snapshot_interval);

        e.events().publish(
            (Symbol::new(&e, "set_growth_rate"),),
            (annual_growth_rate, snapshot_interval),
        );
    }

    fn set_snapshot_gap(e: Env, caller: Address, snapshot_gap: i128) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_snapshot_gap");

        config::execute_set_snapshot_gap(&e, snapshot_gap);

        e.events()
            .publish((Symbol::new(&e, "set_snapshot_gap"),), snapshot_gap);
    }

    fn set_snapshot(e: Env, caller: Address, max_exchange_rate: i128, timestamp: u64) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_snapshot");

        config::execute_set_snapshot(&e, max_exchange_rate, timestamp);

        e.events().publish(
            (Symbol::new(&e, "set_snapshot"),),
            (max_exchange_rate, timestamp),
        );
    }

    fn config(e: Env) -> CorrelatedConfig {
        storage::get_config(&e)
    }

    fn growth_config(e: Env) -> GrowthConfig {
        storage::get_growth_config(&e)
    }

    fn snapshot(e: Env) -> Snapshot {
        storage::get_snapshot(&e)
    }
}

#[contractimpl]
impl PriceOracle for CorrelatedOracleContract {
    fn get_price(e: Env, asset: Address) -> i128 {
        config::load_price(&e, &asset)
    }
}

#[contractimpl]
impl SnapshotOracle for CorrelatedOracleContract {
    fn update_snapshot(e: Env) {
        storage::extend_instance(&e);
        if let Some(snapshot) = config::execute_update_snapshot(&e) {
            e.events().publish(
                (Symbol::new(&e, "snapshot_updated"),),
                (snapshot.max_exchange_rate, snapshot.timestamp),
            );
        }
    }
}

fn require_allowed(e: &Env, caller: &Address, function: &str) {
    if !is_allowed(e, &storage::get_access_control(e), caller, function) {
        panic_with_error!(e, CorrelatedOracleError::UnauthorizedError);
    }
}
