use crate::{
    errors::ResilientOracleError,
    resolver,
    storage::{self, OracleRole, PriceSource, TokenConfig},
};
use oracle_interfaces::{is_allowed, AssetPriceUpdater, PriceOracle};
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, Address, Env, Symbol, Vec,
};

/// ### ResilientOracle
///
/// Resolves asset prices from a main, a pivot and a fallback source
#[contract]
pub struct ResilientOracleContract;

#[contractclient(name = "ResilientOracleClient")]
pub trait ResilientOracle {
    /// Initialize the resilient oracle
    ///
    /// ### Arguments
    /// * `access_control` - The access control contract consulted for administrative calls
    /// * `bound_validator` - The contract validating prices against the pivot price
    ///
    /// ### Panics
    /// If initialize has already been called
    fn initialize(e: Env, access_control: Address, bound_validator: Address);

    /********** Configuration **********/

    /// (Access controlled) Set the token config for an asset
    ///
    /// ### Arguments
    /// * `caller` - The account setting the config
    /// * `config` - The token config
    ///
    /// ### Panics
    /// If the caller is not allowed, the config has no main source, or a source is invalid
    fn set_token_config(e: Env, caller: Address, config: TokenConfig);

    /// (Access controlled) Set a batch of token configs
    ///
    /// ### Arguments
    /// * `caller` - The account setting the configs
    /// * `configs` - The token configs
    ///
    /// ### Panics
    /// If the caller is not allowed, the batch is empty, or any config is invalid
    fn set_token_configs(e: Env, caller: Address, configs: Vec<TokenConfig>);

    /// (Access controlled) Set the source for a role of an asset
    ///
    /// ### Arguments
    /// * `caller` - The account setting the source
    /// * `asset` - The address of the asset
    /// * `source` - The new source, or None to clear the role
    /// * `role` - The role the source fills
    ///
    /// ### Panics
    /// If the caller is not allowed, no config exists, or the main source is cleared
    fn set_oracle(
        e: Env,
        caller: Address,
        asset: Address,
        source: Option<PriceSource>,
        role: OracleRole,
    );

    /// (Access controlled) Enable or disable the source for a role of an asset
    ///
    /// ### Arguments
    /// * `caller` - The account changing the source
    /// * `asset` - The address of the asset
    /// * `role` - The role of the source
    /// * `enable` - If the source may be queried
    fn enable_oracle(e: Env, caller: Address, asset: Address, role: OracleRole, enable: bool);

    /// (Access controlled) Pause price reads
    fn pause(e: Env, caller: Address);

    /// (Access controlled) Resume price reads
    fn unpause(e: Env, caller: Address);

    /********** Getters **********/

    /// Check if price reads are paused
    fn paused(e: Env) -> bool;

    /// Fetch the token config for an asset
    ///
    /// ### Panics
    /// If no config exists for the asset
    fn get_token_config(e: Env, asset: Address) -> TokenConfig;

    /// Fetch the source for a role of an asset and if it is enabled
    ///
    /// ### Panics
    /// If no config exists for the asset
    fn get_oracle(e: Env, asset: Address, role: OracleRole) -> (Option<PriceSource>, bool);

    /// Fetch the bound validator contract
    fn bound_validator(e: Env) -> Address;
}

#[contractimpl]
impl ResilientOracle for ResilientOracleContract {
    fn initialize(e: Env, access_control: Address, bound_validator: Address) {
        storage::extend_instance(&e);

        resolver::execute_initialize(&e, &access_control, &bound_validator);
    }

    fn set_token_config(e: Env, caller: Address, config: TokenConfig) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_token_config");

        resolver::execute_set_token_config(&e, &config);

        e.events()
            .publish((Symbol::new(&e, "set_token_config"), config.asset.clone()), config);
    }

    fn set_token_configs(e: Env, caller: Address, configs: Vec<TokenConfig>) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_token_configs");

        resolver::execute_set_token_configs(&e, &configs);

        for config in configs.iter() {
            e.events()
                .publish((Symbol::new(&e, "set_token_config"), config.asset.clone()), config);
        }
    }

    fn set_oracle(
        e: Env,
        caller: Address,
        asset: Address,
        source: Option<PriceSource>,
        role: OracleRole,
    ) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_oracle");

        resolver::execute_set_oracle(&e, &asset, &source, role);

        e.events()
            .publish((Symbol::new(&e, "set_oracle"), asset, role), source);
    }

    fn enable_oracle(e: Env, caller: Address, asset: Address, role: OracleRole, enable: bool) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "enable_oracle");

        resolver::execute_enable_oracle(&e, &asset, role, enable);

        e.events()
            .publish((Symbol::new(&e, "enable_oracle"), asset, role), enable);
    }

    fn pause(e: Env, caller: Address) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "pause");

        storage::set_paused(&e, true);

        e.events().publish((Symbol::new(&e, "pause"),), caller);
    }

    fn unpause(e: Env, caller: Address) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "unpause");

        storage::set_paused(&e, false);

        e.events().publish((Symbol::new(&e, "unpause"),), caller);
    }

    fn paused(e: Env) -> bool {
        storage::get_paused(&e)
    }

    fn get_token_config(e: Env, asset: Address) -> TokenConfig {
        resolver::load_token_config(&e, &asset)
    }

    fn get_oracle(e: Env, asset: Address, role: OracleRole) -> (Option<PriceSource>, bool) {
        let config = resolver::load_token_config(&e, &asset);
        let slot = config.slot(role);
        (slot.source.clone(), slot.enabled)
    }

    fn bound_validator(e: Env) -> Address {
        storage::get_bound_validator(&e)
    }
}

#[contractimpl]
impl PriceOracle for ResilientOracleContract {
    fn get_price(e: Env, asset: Address) -> i128 {
        resolver::load_price(&e, &asset)
    }
}

#[contractimpl]
impl AssetPriceUpdater for ResilientOracleContract {
    fn update_asset_price(e: Env, asset: Address) {
        storage::extend_instance(&e);
        resolver::update_asset_price(&e, &asset);
    }
}

fn require_allowed(e: &Env, caller: &Address, function: &str) {
    if !is_allowed(e, &storage::get_access_control(e), caller, function) {
        panic_with_error!(e, ResilientOracleError::UnauthorizedError);
    }
}

#[cfg(test)]
mod tests {
    use crate::{storage::OracleSlot, testutils};

    use super::*;
    use oracle_interfaces::{PriceOracleClient, SCALAR_18};
    use soroban_sdk::{
        testutils::{Address as _, Events},
        vec, IntoVal,
    };

    #[test]
    fn test_configure_and_get_price() {
        let e = Env::default();
        e.mock_all_auths();
        let (oracle, fixture) = testutils::setup_resolver(&e);
        let client = ResilientOracleClient::new(&e, &oracle);
        let asset = Address::generate(&e);
        fixture.set_bounds(&asset);
        fixture.main.set_price(&asset, &(10 * SCALAR_18));
        fixture.pivot.set_price(&asset, &(10 * SCALAR_18));

        let config = fixture.token_config(&asset);
        client.set_token_config(&fixture.admin, &config);
        let event = vec![&e, e.events().all().last_unchecked()];
        assert_eq!(
            event,
            vec![
                &e,
                (
                    oracle.clone(),
                    (Symbol::new(&e, "set_token_config"), asset.clone()).into_val(&e),
                    config.clone().into_val(&e),
                )
            ]
        );
        assert_eq!(client.get_token_config(&asset), config);
        assert_eq!(client.bound_validator(), fixture.bound_validator.address);

        let price_client = PriceOracleClient::new(&e, &oracle);
        assert_eq!(price_client.get_price(&asset), 10 * SCALAR_18);
    }

    #[test]
    fn test_set_and_enable_oracle() {
        let e = Env::default();
        e.mock_all_auths();
        let (oracle, fixture) = testutils::setup_resolver(&e);
        let client = ResilientOracleClient::new(&e, &oracle);
        let asset = Address::generate(&e);
        let twap = Address::generate(&e);

        let mut config = fixture.token_config(&asset);
        config.fallback = OracleSlot {
            source: None,
            enabled: false,
        };
        client.set_token_config(&fixture.admin, &config);

        let source = Some(PriceSource::Twap(twap.clone()));
        client.set_oracle(&fixture.admin, &asset, &source, &OracleRole::Fallback);
        let event = vec![&e, e.events().all().last_unchecked()];
        assert_eq!(
            event,
            vec![
                &e,
                (
                    oracle.clone(),
                    (Symbol::new(&e, "set_oracle"), asset.clone(), OracleRole::Fallback)
                        .into_val(&e),
                    source.clone().into_val(&e),
                )
            ]
        );
        assert_eq!(
            client.get_oracle(&asset, &OracleRole::Fallback),
            (source.clone(), false)
        );

        client.enable_oracle(&fixture.admin, &asset, &OracleRole::Fallback, &true);
        let event = vec![&e, e.events().all().last_unchecked()];
        assert_eq!(
            event,
            vec![
                &e,
                (
                    oracle.clone(),
                    (Symbol::new(&e, "enable_oracle"), asset.clone(), OracleRole::Fallback)
                        .into_val(&e),
                    true.into_val(&e),
                )
            ]
        );
        assert_eq!(
            client.get_oracle(&asset, &OracleRole::Fallback),
            (source, true)
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1302)")]
    fn test_pause() {
        let e = Env::default();
        e.mock_all_auths();
        let (oracle, fixture) = testutils::setup_resolver(&e);
        let client = ResilientOracleClient::new(&e, &oracle);
        let asset = Address::generate(&e);
        fixture.main.set_price(&asset, &(10 * SCALAR_18));
        client.set_token_config(&fixture.admin, &fixture.token_config(&asset));

        client.pause(&fixture.admin);
        assert!(client.paused());
        client.unpause(&fixture.admin);
        assert!(!client.paused());
        assert_eq!(
            PriceOracleClient::new(&e, &oracle).get_price(&asset),
            10 * SCALAR_18
        );

        client.pause(&fixture.admin);
        PriceOracleClient::new(&e, &oracle).get_price(&asset);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")]
    fn test_set_token_config_unauthorized() {
        let e = Env::default();
        e.mock_all_auths();
        let samwise = Address::generate(&e);

        let (access_control, access_control_client) = testutils::create_access_control(&e);
        access_control_client.set_allow_all(&false);
        let oracle = testutils::create_resilient_oracle(&e);
        let client = ResilientOracleClient::new(&e, &oracle);
        client.initialize(&access_control, &Address::generate(&e));

        let asset = Address::generate(&e);
        client.set_token_config(
            &samwise,
            &TokenConfig {
                asset,
                main: OracleSlot {
                    source: Some(PriceSource::Capped(Address::generate(&e))),
                    enabled: true,
                },
                pivot: OracleSlot {
                    source: None,
                    enabled: false,
                },
                fallback: OracleSlot {
                    source: None,
                    enabled: false,
                },
            },
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")]
    fn test_pause_permission_is_per_function() {
        let e = Env::default();
        e.mock_all_auths();
        let frodo = Address::generate(&e);

        let (access_control, access_control_client) = testutils::create_access_control(&e);
        access_control_client.set_allow_all(&false);
        access_control_client.set_permission(&frodo, &Symbol::new(&e, "unpause"), &true);
        let oracle = testutils::create_resilient_oracle(&e);
        let client = ResilientOracleClient::new(&e, &oracle);
        client.initialize(&access_control, &Address::generate(&e));

        client.unpause(&frodo);
        client.pause(&frodo);
    }
}
