use oracle_interfaces::PriceValidatorClient;
use soroban_sdk::{panic_with_error, Address, Env, Vec};

use crate::{
    errors::ResilientOracleError,
    storage::{self, OracleRole, OracleSlot, PriceSource, TokenConfig},
};

/// Initialize the resilient oracle
///
/// ### Panics
/// If the contract is already initialized
pub fn execute_initialize(e: &Env, access_control: &Address, bound_validator: &Address) {
    if storage::has_access_control(e) {
        panic_with_error!(e, ResilientOracleError::AlreadyInitializedError);
    }
    storage::set_access_control(e, access_control);
    storage::set_bound_validator(e, bound_validator);
}

/// Store a token config, replacing any existing config for the asset
///
/// ### Panics
/// If the config has no main source or names an invalid source
pub fn execute_set_token_config(e: &Env, config: &TokenConfig) {
    if config.main.source.is_none() {
        panic_with_error!(e, ResilientOracleError::InvalidConfig);
    }
    require_valid_slot(e, &config.main);
    require_valid_slot(e, &config.pivot);
    require_valid_slot(e, &config.fallback);
    storage::set_token_config(e, config);
}

/// Store a batch of token configs
///
/// ### Panics
/// If the batch is empty or any config is invalid
pub fn execute_set_token_configs(e: &Env, configs: &Vec<TokenConfig>) {
    if configs.is_empty() {
        panic_with_error!(e, ResilientOracleError::BadRequest);
    }
    for config in configs.iter() {
        execute_set_token_config(e, &config);
    }
}

/// Replace the source used for a role of an asset's config. The enabled flag is kept.
///
/// ### Panics
/// If no config exists for the asset, the main source is removed, or the source is invalid
pub fn execute_set_oracle(
    e: &Env,
    asset: &Address,
    source: &Option<PriceSource>,
    role: OracleRole,
) {
    let mut config = load_token_config(e, asset);
    if role == OracleRole::Main && source.is_none() {
        panic_with_error!(e, ResilientOracleError::InvalidConfig);
    }
    let slot = config.slot_mut(role);
    slot.source = source.clone();
    require_valid_slot(e, config.slot(role));
    storage::set_token_config(e, &config);
}

/// Enable or disable the source used for a role of an asset's config
///
/// ### Panics
/// If no config exists for the asset
pub fn execute_enable_oracle(e: &Env, asset: &Address, role: OracleRole, enable: bool) {
    let mut config = load_token_config(e, asset);
    config.slot_mut(role).enabled = enable;
    storage::set_token_config(e, &config);
}

/// Load the token config for an asset
///
/// ### Panics
/// If no config exists for the asset
pub fn load_token_config(e: &Env, asset: &Address) -> TokenConfig {
    match storage::get_token_config(e, asset) {
        Some(config) => config,
        None => panic_with_error!(e, ResilientOracleError::ConfigNotFound),
    }
}

/// Resolve the price of an asset
///
/// The main price is returned if it is positive and, when the pivot produces a positive
/// price, within the validator's bounds of the pivot price. Otherwise the fallback price is
/// returned under the same rules. A failing source or validator never aborts resolution,
/// it only makes a price unusable.
///
/// ### Panics
/// If the oracle is paused, no config exists, or no source produced a usable price
pub fn load_price(e: &Env, asset: &Address) -> i128 {
    if storage::get_paused(e) {
        panic_with_error!(e, ResilientOracleError::Paused);
    }
    let config = load_token_config(e, asset);

    let pivot_price = slot_price(e, &config.pivot, asset);

    let main_price = slot_price(e, &config.main, asset);
    if is_valid(e, asset, main_price, pivot_price) {
        return main_price;
    }

    let fallback_price = slot_price(e, &config.fallback, asset);
    if is_valid(e, asset, fallback_price, pivot_price) {
        return fallback_price;
    }

    panic_with_error!(e, ResilientOracleError::InvalidPrice);
}

/// Refresh the state of every enabled source of an asset
///
/// ### Panics
/// If no config exists for the asset
pub fn update_asset_price(e: &Env, asset: &Address) {
    let config = load_token_config(e, asset);
    for slot in [&config.main, &config.pivot, &config.fallback] {
        if let (true, Some(source)) = (slot.enabled, &slot.source) {
            source.update(e, asset);
        }
    }
}

/// Fetch the price from a slot, or 0 if the slot is disabled, empty, or failing
fn slot_price(e: &Env, slot: &OracleSlot, asset: &Address) -> i128 {
    match (slot.enabled, &slot.source) {
        (true, Some(source)) => source.price(e, asset),
        _ => 0,
    }
}

/// Check if a price is usable. A non-positive pivot price never invalidates a price.
fn is_valid(e: &Env, asset: &Address, price: i128, pivot_price: i128) -> bool {
    if price <= 0 {
        return false;
    }
    if pivot_price <= 0 {
        return true;
    }
    let validator = PriceValidatorClient::new(e, &storage::get_bound_validator(e));
    matches!(
        validator.try_validate_price_with_anchor_price(asset, &price, &pivot_price),
        Ok(Ok(true))
    )
}

fn require_valid_slot(e: &Env, slot: &OracleSlot) {
    if let Some(source) = &slot.source {
        if *source.address() == e.current_contract_address() {
            panic_with_error!(e, ResilientOracleError::InvalidConfig);
        }
        if let PriceSource::Feed(feed) = source {
            if feed.decimals > 18 || feed.max_age == 0 {
                panic_with_error!(e, ResilientOracleError::InvalidConfig);
            }
        }
    }
}
