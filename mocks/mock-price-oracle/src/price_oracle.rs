use oracle_interfaces::PriceOracle;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env,
};

#[derive(Clone)]
#[contracttype]
pub enum MockPriceOracleDataKey {
    // MOCK: The price to return for an asset
    Price(Address),
    // MOCK: If the oracle should fail for an asset
    Broken(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockPriceOracleError {
    PriceNotFound = 1,
    Broken = 2,
}

/// ### Mock Price Oracle
///
/// Contract to return mocked asset prices with 18 decimals.
///
/// ### Dev
/// For testing purposes only!
#[contract]
pub struct MockPriceOracle;

pub trait MockPriceOracleTrait {
    /// Sets the mocked price for an asset
    fn set_price(e: Env, asset: Address, price: i128);

    /// Sets if the oracle fails when asked for the price of an asset
    fn set_broken(e: Env, asset: Address, broken: bool);
}

#[contractimpl]
impl MockPriceOracleTrait for MockPriceOracle {
    fn set_price(e: Env, asset: Address, price: i128) {
        e.storage()
            .instance()
            .set::<MockPriceOracleDataKey, i128>(&MockPriceOracleDataKey::Price(asset), &price);
    }

    fn set_broken(e: Env, asset: Address, broken: bool) {
        e.storage()
            .instance()
            .set::<MockPriceOracleDataKey, bool>(&MockPriceOracleDataKey::Broken(asset), &broken);
    }
}

#[contractimpl]
impl PriceOracle for MockPriceOracle {
    fn get_price(e: Env, asset: Address) -> i128 {
        let broken = e
            .storage()
            .instance()
            .get::<MockPriceOracleDataKey, bool>(&MockPriceOracleDataKey::Broken(asset.clone()))
            .unwrap_or(false);
        if broken {
            panic_with_error!(&e, MockPriceOracleError::Broken);
        }
        e.storage()
            .instance()
            .get::<MockPriceOracleDataKey, i128>(&MockPriceOracleDataKey::Price(asset))
            .unwrap_or_else(|| panic_with_error!(&e, MockPriceOracleError::PriceNotFound))
    }
}
