use crate::{
    errors::BoundValidatorError,
    storage::{self, ValidateConfig},
    validator,
};
use oracle_interfaces::{is_allowed, PriceValidator};
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, Address, Env, Symbol, Vec,
};

/// ### BoundValidator
///
/// Decides if a reported price is close enough to an anchor price
#[contract]
pub struct BoundValidatorContract;

#[contractclient(name = "BoundValidatorClient")]
pub trait BoundValidator {
    /// Initialize the bound validator
    ///
    /// ### Arguments
    /// * `access_control` - The access control contract consulted for administrative calls
    ///
    /// ### Panics
    /// If initialize has already been called
    fn initialize(e: Env, access_control: Address);

    /// (Access controlled) Set the validate config for an asset
    ///
    /// ### Arguments
    /// * `caller` - The account setting the config
    /// * `config` - The validate config
    ///
    /// ### Panics
    /// If the caller is not allowed or the bounds are not `0 < lower < upper`
    fn set_validate_config(e: Env, caller: Address, config: ValidateConfig);

    /// (Access controlled) Set a batch of validate configs
    ///
    /// ### Arguments
    /// * `caller` - The account setting the configs
    /// * `configs` - The validate configs
    ///
    /// ### Panics
    /// If the caller is not allowed, the batch is empty, or any config is invalid
    fn set_validate_configs(e: Env, caller: Address, configs: Vec<ValidateConfig>);

    /// Fetch the validate config for an asset
    ///
    /// ### Arguments
    /// * `asset` - The address of the asset
    ///
    /// ### Panics
    /// If no config exists for the asset
    fn get_validate_config(e: Env, asset: Address) -> ValidateConfig;
}

#[contractimpl]
impl BoundValidator for BoundValidatorContract {
    fn initialize(e: Env, access_control: Address) {
        storage::extend_instance(&e);

        validator::execute_initialize(&e, &access_control);
    }

    fn set_validate_config(e: Env, caller: Address, config: ValidateConfig) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_validate_config");

        validator::execute_set_validate_config(&e, &config);

        e.events().publish(
            (Symbol::new(&e, "set_validate_config"), config.asset.clone()),
            (config.lower_bound_ratio, config.upper_bound_ratio),
        );
    }

    fn set_validate_configs(e: Env, caller: Address, configs: Vec<ValidateConfig>) {
        storage::extend_instance(&e);
        require_allowed(&e, &caller, "set_validate_configs");

        validator::execute_set_validate_configs(&e, &configs);

        for config in configs.iter() {
            e.events().publish(
                (Symbol::new(&e, "set_validate_config"), config.asset.clone()),
                (config.lower_bound_ratio, config.upper_bound_ratio),
            );
        }
    }

    fn get_validate_config(e: Env, asset: Address) -> ValidateConfig {
        storage::get_validate_config(&e, &asset)
            .unwrap_or_else(|| panic_with_error!(&e, BoundValidatorError::ConfigNotFound))
    }
}

#[contractimpl]
impl PriceValidator for BoundValidatorContract {
    fn validate_price_with_anchor_price(
        e: Env,
        asset: Address,
        reported_price: i128,
        anchor_price: i128,
    ) -> bool {
        validator::validate_price(&e, &asset, reported_price, anchor_price)
    }
}

fn require_allowed(e: &Env, caller: &Address, function: &str) {
    if !is_allowed(e, &storage::get_access_control(e), caller, function) {
        panic_with_error!(e, BoundValidatorError::UnauthorizedError);
    }
}
