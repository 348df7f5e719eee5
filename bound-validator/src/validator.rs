use oracle_interfaces::{math::mul_div_floor, SCALAR_18};
use soroban_sdk::{panic_with_error, Address, Env, Vec};

use crate::{
    errors::BoundValidatorError,
    storage::{self, ValidateConfig},
};

/// Initialize the bound validator
///
/// ### Panics
/// If the contract is already initialized
pub fn execute_initialize(e: &Env, access_control: &Address) {
    if storage::has_access_control(e) {
        panic_with_error!(e, BoundValidatorError::AlreadyInitializedError);
    }
    storage::set_access_control(e, access_control);
}

/// Store a validate config, replacing any existing config for the asset
///
/// ### Panics
/// If the bounds are not `0 < lower < upper`
pub fn execute_set_validate_config(e: &Env, config: &ValidateConfig) {
    require_valid_config(e, config);
    storage::set_validate_config(e, config);
}

/// Store a batch of validate configs
///
/// ### Panics
/// If the batch is empty or any config is invalid
pub fn execute_set_validate_configs(e: &Env, configs: &Vec<ValidateConfig>) {
    if configs.is_empty() {
        panic_with_error!(e, BoundValidatorError::BadRequest);
    }
    for config in configs.iter() {
        execute_set_validate_config(e, &config);
    }
}

/// Check if `reported_price` is within the configured bounds of `anchor_price`
///
/// The ratio `reported_price / anchor_price` is truncated to 18 decimals and both
/// bounds are inclusive.
///
/// ### Panics
/// If no config exists for the asset or the anchor price is not positive
pub fn validate_price(e: &Env, asset: &Address, reported_price: i128, anchor_price: i128) -> bool {
    let config = match storage::get_validate_config(e, asset) {
        Some(config) => config,
        None => panic_with_error!(e, BoundValidatorError::ConfigNotFound),
    };
    if anchor_price <= 0 {
        panic_with_error!(e, BoundValidatorError::InvalidAnchor);
    }
    let ratio = match mul_div_floor(e, reported_price, SCALAR_18, anchor_price) {
        Some(ratio) => ratio,
        // a ratio past i128 is always above the upper bound
        None => return false,
    };
    ratio >= config.lower_bound_ratio && ratio <= config.upper_bound_ratio
}

fn require_valid_config(e: &Env, config: &ValidateConfig) {
    if config.lower_bound_ratio <= 0 || config.upper_bound_ratio <= config.lower_bound_ratio {
        panic_with_error!(e, BoundValidatorError::InvalidConfig);
    }
}
