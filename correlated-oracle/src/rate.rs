use oracle_interfaces::{math::mul_div_floor, PriceOracleClient, SCALAR_18};
use soroban_sdk::{Address, Env};

use crate::{
    dependencies::{AccountantClient, StakePoolClient, VaultClient},
    storage::{RateSource, TokenUnits},
};

/// Reads how much of the underlying token one whole correlated token is worth
pub trait ExchangeRate {
    /// Fetch the underlying amount per whole correlated token, expressed in 18 decimals
    ///
    /// Returns None if the source could not be read
    fn underlying_amount(&self, e: &Env) -> Option<i128>;
}

/// Reads the exchange rate from the contract named by a `RateSource`
pub struct RateAdapter {
    pub source: RateSource,
    pub correlated_token: Address,
    pub units: TokenUnits,
}

impl RateAdapter {
    pub fn new(source: RateSource, correlated_token: Address, units: TokenUnits) -> Self {
        RateAdapter {
            source,
            correlated_token,
            units,
        }
    }

    /// Convert an amount of underlying token units to 18 decimals
    fn normalize(&self, e: &Env, amount: i128) -> Option<i128> {
        mul_div_floor(e, amount, SCALAR_18, self.units.underlying_unit)
    }
}

impl ExchangeRate for RateAdapter {
    fn underlying_amount(&self, e: &Env) -> Option<i128> {
        let amount = match &self.source {
            RateSource::StakePool(pool) => match StakePoolClient::new(e, pool).try_exchange_rate()
            {
                Ok(Ok(rate)) => self.normalize(e, rate),
                _ => None,
            },
            RateSource::Vault(vault) => match VaultClient::new(e, vault)
                .try_convert_to_assets(&self.units.correlated_unit)
            {
                Ok(Ok(assets)) => self.normalize(e, assets),
                _ => None,
            },
            RateSource::Accountant(accountant) => {
                match AccountantClient::new(e, accountant).try_get_rate() {
                    Ok(Ok(rate)) => self.normalize(e, rate),
                    _ => None,
                }
            }
            // already quoted in underlying with 18 decimals
            RateSource::Jump(oracle) => {
                match PriceOracleClient::new(e, oracle).try_get_price(&self.correlated_token) {
                    Ok(Ok(price)) => Some(price),
                    _ => None,
                }
            }
        };
        amount.filter(|amount| *amount > 0)
    }
}
