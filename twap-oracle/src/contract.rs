use crate::{
    errors::TwapOracleError,
    storage::{self, CachedPrice, Observation, TwapTokenConfig},
    twap,
};
use oracle_interfaces::{is_allowed, PriceOracle, TwapUpdater};
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, Address, Env, Symbol, Vec,
};

/// ### TwapOracle
///
/// Prices assets with the time weighted average of a constant product pool's price
#[contract]
pub struct TwapOracleContract;

#[contractclient(name = "TwapOracleClient")]
pub trait TwapOracle {
    /// Initialize the TWAP oracle
    ///
    /// ### Arguments
    /// * `access_control` - The access control contract consulted for administrative calls
    /// * `native_asset` - The wrapped native asset that native based assets are quoted in
    ///
    /// ### Panics
    /// If initialize has already been called
    fn initialize(e: Env, access_control: Address, native_asset: Address);

    /// (Access controlled) Set the token config for an asset and reset its observation window
    ///
    /// ### Arguments
    /// * `caller` - The account setting the config
    /// * `config` - The token config
    ///
    /// ### Panics
    /// If the caller is not allowed or the config is invalid
    fn set_token_config(e: Env, caller: Address, config: TwapTokenConfig);

    /// (Access controlled) Set a batch of token configs
    ///
    /// ### Arguments
    /// * `caller` - The account setting the configs
    /// * `configs` - The token configs
    ///
    /// ### Panics
    /// If the caller is not allowed, the batch is empty, or any config is invalid
    fn set_token_configs(e: Env, caller: Address, configs: Vec<TwapTokenConfig>);

    /// Fetch the token config for an asset
    ///
    /// ### Panics
    /// If no config exists for the asset
    fn get_token_config(e: Env, asset: Address) -> TwapTokenConfig;

    /// Fetch the old and new observations of an asset's window
    ///
    /// ### Panics
    /// If no config exists for the asset
    fn get_observations(e: Env, asset: Address) -> (Observation, Observation);

    /// Fetch the last price computed for an asset, if any
    fn get_cached_price(e: Env, asset: Address) -> Option<CachedPrice>;
}

#[contractimpl]
impl TwapOracle for TwapOracleContract {
    fn initialize(e: Env, access_control: Address, native_asset: Address) {
        storage::extend_instance(&e);

        twap::execute_initialize(&e, &access_control, &native_asset);
    }

    fn set_token_config(e: Env, caller: Address, config: TwapTokenConfig) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_token_config");

        twap::execute_set_token_config(&e, &config);

        e.events()
            .publish((Symbol::new(&e, "set_token_config"), config.asset.clone()), config);
    }

    fn set_token_configs(e: Env, caller: Address, configs: Vec<TwapTokenConfig>) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_token_configs");

        twap::execute_set_token_configs(&e, &configs);

        for config in configs.iter() {
            e.events()
                .publish((Symbol::new(&e, "set_token_config"), config.asset.clone()), config);
        }
    }

    fn get_token_config(e: Env, asset: Address) -> TwapTokenConfig {
        twap::load_token_config(&e, &asset)
    }

    fn get_observations(e: Env, asset: Address) -> (Observation, Observation) {
        twap::load_token_config(&e, &asset);
        let window = storage::get_window(&e, &asset);
        (window.old, window.new)
    }

    fn get_cached_price(e: Env, asset: Address) -> Option<CachedPrice> {
        storage::get_cached_price(&e, &asset)
    }
}

#[contractimpl]
impl PriceOracle for TwapOracleContract {
    fn get_price(e: Env, asset: Address) -> i128 {
        twap::load_price(&e, &asset)
    }
}

#[contractimpl]
impl TwapUpdater for TwapOracleContract {
    fn update_twap(e: Env, asset: Address) -> i128 {
        storage::extend_instance(&e);
        twap::execute_update_twap(&e, &asset)
    }
}

fn require_allowed(e: &Env, caller: &Address, function: &str) {
    if !is_allowed(e, &storage::get_access_control(e), caller, function) {
        panic_with_error!(e, TwapOracleError::UnauthorizedError);
    }
}
