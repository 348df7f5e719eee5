use oracle_interfaces::{
    math::{mul_div_floor, unit},
    Q112_BITS, SCALAR_18,
};
use sep_41_token::TokenClient;
use soroban_sdk::{panic_with_error, Address, Env, Symbol, Vec, U256};

use crate::{
    dependencies::LiquidityPoolClient,
    errors::TwapOracleError,
    storage::{self, CachedPrice, Observation, TwapTokenConfig, TwapWindow},
};

/// Initialize the TWAP oracle
///
/// ### Panics
/// If the contract is already initialized
pub fn execute_initialize(e: &Env, access_control: &Address, native_asset: &Address) {
    if storage::has_access_control(e) {
        panic_with_error!(e, TwapOracleError::AlreadyInitializedError);
    }
    storage::set_access_control(e, access_control);
    storage::set_native_asset(e, native_asset);
}

/// Store a token config and reset the asset's observation window to the pool's current
/// cumulative price
///
/// ### Panics
/// If the config is invalid
pub fn execute_set_token_config(e: &Env, config: &TwapTokenConfig) {
    require_valid_config(e, config);

    let observation = Observation {
        timestamp: e.ledger().timestamp(),
        acc: current_cumulative_price(e, config),
    };
    storage::set_token_config(e, config);
    storage::set_window(
        e,
        &config.asset,
        &TwapWindow {
            old: observation.clone(),
            new: observation,
        },
    );
}

/// Store a batch of token configs
///
/// ### Panics
/// If the batch is empty or any config is invalid
pub fn execute_set_token_configs(e: &Env, configs: &Vec<TwapTokenConfig>) {
    if configs.is_empty() {
        panic_with_error!(e, TwapOracleError::BadRequest);
    }
    for config in configs.iter() {
        execute_set_token_config(e, &config);
    }
}

/// Load the token config for an asset
///
/// ### Panics
/// If no config exists for the asset
pub fn load_token_config(e: &Env, asset: &Address) -> TwapTokenConfig {
    match storage::get_token_config(e, asset) {
        Some(config) => config,
        None => panic_with_error!(e, TwapOracleError::ConfigNotFound),
    }
}

/// Roll the observation window if the anchor period has passed since the newest
/// observation, then compute and cache the TWAP of the asset
///
/// Returns the TWAP, expressed in 18 decimals
///
/// ### Panics
/// If no config exists for the asset or no time has passed since the oldest observation
pub fn execute_update_twap(e: &Env, asset: &Address) -> i128 {
    let config = load_token_config(e, asset);
    let native_price = if config.is_native_based {
        Some(execute_update_twap(e, &storage::get_native_asset(e)))
    } else {
        None
    };
    let now = e.ledger().timestamp();
    let current = current_cumulative_price(e, &config);

    let mut window = storage::get_window(e, asset);
    if now - window.new.timestamp >= config.anchor_period {
        let fresh = Observation {
            timestamp: now,
            acc: current.clone(),
        };
        e.events().publish(
            (Symbol::new(e, "twap_window"), asset.clone()),
            (window.old.clone(), fresh.clone()),
        );
        window.old = window.new;
        window.new = fresh;
        storage::set_window(e, asset, &window);
    }

    if now <= window.old.timestamp {
        panic_with_error!(e, TwapOracleError::InvalidTimestamp);
    }
    if current < window.old.acc {
        panic_with_error!(e, TwapOracleError::InvalidConfig);
    }
    let elapsed = U256::from_u128(e, (now - window.old.timestamp) as u128);
    let average = current.sub(&window.old.acc).div(&elapsed);
    let mut price = to_price(e, &config, &average);

    if let Some(native_price) = native_price {
        price = match mul_div_floor(e, price, native_price, SCALAR_18) {
            Some(price) => price,
            None => panic_with_error!(e, TwapOracleError::OverflowError),
        };
    }

    storage::set_cached_price(
        e,
        asset,
        &CachedPrice {
            price,
            timestamp: now,
        },
    );
    e.events()
        .publish((Symbol::new(e, "price_updated"), asset.clone()), (price, now));
    price
}

/// Fetch the cached TWAP of an asset
///
/// ### Panics
/// If no config exists for the asset or the TWAP was never computed
pub fn load_price(e: &Env, asset: &Address) -> i128 {
    load_token_config(e, asset);
    match storage::get_cached_price(e, asset) {
        Some(cached) => cached.price,
        None => panic_with_error!(e, TwapOracleError::StalePrice),
    }
}

/// Fetch the pool's cumulative price for the asset's side, extrapolated to now with the
/// current reserves if the pool has not been updated this ledger
fn current_cumulative_price(e: &Env, config: &TwapTokenConfig) -> U256 {
    let pool = LiquidityPoolClient::new(e, &config.pool);
    let (reserve_0, reserve_1, last_update) = pool.get_reserves();
    let (cumulative, reserve_this, reserve_other) = if config.is_reversed {
        (pool.price_1_cumulative_last(), reserve_1, reserve_0)
    } else {
        (pool.price_0_cumulative_last(), reserve_0, reserve_1)
    };

    let now = e.ledger().timestamp();
    if last_update == now || reserve_this <= 0 || reserve_other <= 0 {
        return cumulative;
    }
    let elapsed = U256::from_u128(e, (now - last_update) as u128);
    let spot = U256::from_u128(e, reserve_other as u128)
        .shl(Q112_BITS)
        .div(&U256::from_u128(e, reserve_this as u128));
    cumulative.add(&spot.mul(&elapsed))
}

/// Convert an average UQ112x112 pool price into a price with 18 decimals
///
/// The average is scaled to whole token units first, and the integer and fractional parts
/// are scaled to 18 decimals separately to keep every intermediate within 256 bits
fn to_price(e: &Env, config: &TwapTokenConfig, average: &U256) -> i128 {
    let base_unit = U256::from_u128(e, config.base_unit as u128);
    let max_average =
        U256::from_parts(e, u64::MAX, u64::MAX, u64::MAX, u64::MAX).div(&base_unit);
    if *average > max_average {
        panic_with_error!(e, TwapOracleError::OverflowError);
    }
    let scaled = average
        .mul(&base_unit)
        .div(&U256::from_u128(e, config.quote_base_unit as u128));

    let whole = scaled.shr(Q112_BITS);
    let fraction = scaled.sub(&whole.shl(Q112_BITS));
    let fraction_price = fraction
        .mul(&U256::from_u128(e, SCALAR_18 as u128))
        .shr(Q112_BITS)
        .to_u128()
        .and_then(|price| i128::try_from(price).ok());
    let price = whole
        .to_u128()
        .and_then(|whole| i128::try_from(whole).ok())
        .and_then(|whole| whole.checked_mul(SCALAR_18))
        .zip(fraction_price)
        .and_then(|(whole, fraction)| whole.checked_add(fraction));
    match price {
        Some(price) => price,
        None => panic_with_error!(e, TwapOracleError::OverflowError),
    }
}

fn require_valid_config(e: &Env, config: &TwapTokenConfig) {
    if config.base_unit <= 0 || config.quote_base_unit <= 0 || config.anchor_period == 0 {
        panic_with_error!(e, TwapOracleError::InvalidConfig);
    }
    if unit(TokenClient::new(e, &config.asset).decimals()) != Some(config.base_unit) {
        panic_with_error!(e, TwapOracleError::InvalidConfig);
    }
    if config.is_native_based {
        let native_asset = storage::get_native_asset(e);
        if config.asset == native_asset {
            panic_with_error!(e, TwapOracleError::InvalidConfig);
        }
        match storage::get_token_config(e, &native_asset) {
            Some(native_config) if native_config.base_unit == config.quote_base_unit => {}
            _ => panic_with_error!(e, TwapOracleError::InvalidConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testutils::{self, default_config, set_timestamp, ANCHOR_PERIOD, START};

    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn q112(e: &Env, value: u128) -> U256 {
        U256::from_u128(e, value).shl(Q112_BITS)
    }

    #[test]
    fn test_set_token_config_initializes_window() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        // the pool accrues before the config is set
        set_timestamp(&e, START + 10);
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));

            let window = storage::get_window(&e, &asset);
            let expected = Observation {
                timestamp: START + 10,
                acc: q112(&e, 2).mul(&U256::from_u32(&e, 10)),
            };
            assert_eq!(window.old, expected);
            assert_eq!(window.new, expected);
        });
    }

    #[test]
    fn test_update_twap_within_anchor_period() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            let window = storage::get_window(&e, &asset);

            let price = execute_update_twap(&e, &asset);
            assert_eq!(price, 2 * SCALAR_18);
            assert_eq!(storage::get_window(&e, &asset), window);
            assert_eq!(
                storage::get_cached_price(&e, &asset),
                Some(CachedPrice {
                    price: 2 * SCALAR_18,
                    timestamp: START + 100,
                })
            );
            assert_eq!(load_price(&e, &asset), 2 * SCALAR_18);
        });
    }

    #[test]
    fn test_update_twap_rotates_window() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
        });

        set_timestamp(&e, START + ANCHOR_PERIOD);
        e.as_contract(&fixture.oracle, || {
            let price = execute_update_twap(&e, &asset);
            assert_eq!(price, 2 * SCALAR_18);

            let window = storage::get_window(&e, &asset);
            assert_eq!(
                window.old,
                Observation {
                    timestamp: START,
                    acc: U256::from_u32(&e, 0),
                }
            );
            assert_eq!(
                window.new,
                Observation {
                    timestamp: START + ANCHOR_PERIOD,
                    acc: q112(&e, 2).mul(&U256::from_u128(&e, ANCHOR_PERIOD as u128)),
                }
            );
        });

        // price doubles halfway into the next window
        pool_client.set_reserves(&1000_0000000, &4000_0000000);
        set_timestamp(&e, START + ANCHOR_PERIOD + ANCHOR_PERIOD / 2);
        e.as_contract(&fixture.oracle, || {
            let window = storage::get_window(&e, &asset);

            // (2 * 1800 + 4 * 900) / 2700
            let price = execute_update_twap(&e, &asset);
            assert_eq!(price, 2_666_666_666_666_666_666);
            assert_eq!(storage::get_window(&e, &asset), window);
        });
    }

    #[test]
    fn test_update_twap_reversed() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&2000_0000000, &1000_0000000);

        let mut config = default_config(&asset, &pool);
        config.is_reversed = true;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &config);
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            assert_eq!(execute_update_twap(&e, &asset), 2 * SCALAR_18);
        });
    }

    #[test]
    fn test_update_twap_decimals() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 18);
        let (pool, pool_client) = testutils::create_pair(&e);
        // 1 asset with 18 decimals for 2000 of a 6 decimal token
        pool_client.set_reserves(&SCALAR_18, &2000_000000);

        let mut config = default_config(&asset, &pool);
        config.base_unit = SCALAR_18;
        config.quote_base_unit = 1_000000;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &config);
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            let price = execute_update_twap(&e, &asset);
            // the UQ112x112 spot price truncates
            assert!((2000 * SCALAR_18 - price) <= 1);
            assert!(price <= 2000 * SCALAR_18);
        });
    }

    #[test]
    fn test_update_twap_native_based() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (native_pool, native_pool_client) = testutils::create_pair(&e);
        let (asset_pool, asset_pool_client) = testutils::create_pair(&e);
        // 8 native for 1 quote token, 40 native for 1 asset
        native_pool_client.set_reserves(&8_0000000, &1_0000000);
        asset_pool_client.set_reserves(&1_0000000, &40_0000000);

        let mut config = default_config(&asset, &asset_pool);
        config.is_native_based = true;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&fixture.native, &native_pool));
            execute_set_token_config(&e, &config);
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            assert_eq!(execute_update_twap(&e, &asset), 5 * SCALAR_18);
            assert_eq!(load_price(&e, &fixture.native), 0_125_000_000_000_000_000);
        });
    }

    #[test]
    fn test_update_twap_large_price() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 18);
        let (pool, pool_client) = testutils::create_pair(&e);
        // 1 asset for 100M of the quote token, both with 18 decimals
        pool_client.set_reserves(&SCALAR_18, &(100_000_000 * SCALAR_18));

        let mut config = default_config(&asset, &pool);
        config.base_unit = SCALAR_18;
        config.quote_base_unit = SCALAR_18;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &config);
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            assert_eq!(execute_update_twap(&e, &asset), 100_000_000 * SCALAR_18);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1603)")]
    fn test_update_twap_cumulative_price_decreased() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
            let observation = Observation {
                timestamp: START,
                acc: q112(&e, 1_000_000_000),
            };
            storage::set_window(
                &e,
                &asset,
                &TwapWindow {
                    old: observation.clone(),
                    new: observation,
                },
            );
        });

        set_timestamp(&e, START + 100);
        e.as_contract(&fixture.oracle, || {
            execute_update_twap(&e, &asset);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1602)")]
    fn test_update_twap_same_timestamp_as_config() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
            execute_update_twap(&e, &asset);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1601)")]
    fn test_load_price_never_updated() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, pool_client) = testutils::create_pair(&e);
        pool_client.set_reserves(&1000_0000000, &2000_0000000);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
            load_price(&e, &asset);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1600)")]
    fn test_update_twap_no_config() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);

        e.as_contract(&fixture.oracle, || {
            execute_update_twap(&e, &Address::generate(&e));
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1603)")]
    fn test_set_token_config_zero_anchor_period() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, _) = testutils::create_pair(&e);

        let mut config = default_config(&asset, &pool);
        config.anchor_period = 0;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &config);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1603)")]
    fn test_set_token_config_base_unit_mismatch() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 6);
        let (pool, _) = testutils::create_pair(&e);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&asset, &pool));
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1603)")]
    fn test_set_token_config_native_based_requires_native() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (pool, _) = testutils::create_pair(&e);

        let mut config = default_config(&asset, &pool);
        config.is_native_based = true;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &config);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #8)")]
    fn test_set_token_configs_empty() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);

        e.as_contract(&fixture.oracle, || {
            execute_set_token_configs(&e, &soroban_sdk::vec![&e]);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1603)")]
    fn test_set_token_config_native_based_quote_unit_mismatch() {
        let e = Env::default();
        e.mock_all_auths();
        set_timestamp(&e, START);
        let fixture = testutils::setup_twap_oracle(&e);
        let (asset, _) = testutils::create_token_contract(&e, &fixture.admin, 7);
        let (native_pool, native_pool_client) = testutils::create_pair(&e);
        let (asset_pool, _) = testutils::create_pair(&e);
        native_pool_client.set_reserves(&8_0000000, &1_0000000);

        // the native asset has 7 decimals
        let mut config = default_config(&asset, &asset_pool);
        config.is_native_based = true;
        config.quote_base_unit = SCALAR_18;
        e.as_contract(&fixture.oracle, || {
            execute_set_token_config(&e, &default_config(&fixture.native, &native_pool));
            execute_set_token_config(&e, &config);
        });
    }
}
