use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Symbol};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

/********** Storage Types **********/

/// The bounds a reported price must respect relative to an anchor price
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ValidateConfig {
    pub asset: Address,
    pub upper_bound_ratio: i128, // the maximum reported / anchor ratio, expressed in 18 decimals
    pub lower_bound_ratio: i128, // the minimum reported / anchor ratio, expressed in 18 decimals
}

/********** Storage Key Types **********/

const ACCESS_CONTROL_KEY: &str = "AccessCtl";

#[derive(Clone)]
#[contracttype]
pub enum BoundValidatorDataKey {
    // A map of an asset's address to its validate config
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

/********** Access Control **********/

/// Fetch the access control contract
///
/// ### Panics
/// If the access control contract is not set
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

/********** Validate Configs **********/

/// Fetch the validate config for an asset, if one exists
///
/// ### Arguments
/// * `asset` - The address of the asset
pub fn get_validate_config(e: &Env, asset: &Address) -> Option<ValidateConfig> {
    let key = BoundValidatorDataKey::Config(asset.clone());
    let result = e
        .storage()
        .persistent()
        .get::<BoundValidatorDataKey, ValidateConfig>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    }
    result
}

/// Set the validate config for an asset
///
/// ### Arguments
/// * `config` - The validate config, keyed by its asset
pub fn set_validate_config(e: &Env, config: &ValidateConfig) {
    let key = BoundValidatorDataKey::Config(config.asset.clone());
    e.storage()
        .persistent()
        .set::<BoundValidatorDataKey, ValidateConfig>(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}
