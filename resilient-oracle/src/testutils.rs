#![cfg(test)]

use crate::{
    storage::{OracleSlot, PriceSource, TokenConfig},
    ResilientOracleClient, ResilientOracleContract,
};
use bound_validator::{BoundValidatorClient, BoundValidatorContract, ValidateConfig};
use mock_access_control::{MockAccessControl, MockAccessControlClient};
use mock_price_oracle::{MockPriceOracle, MockPriceOracleClient};
use sep_40_oracle::testutils::{MockPriceOracleClient as MockFeedClient, MockPriceOracleWASM};
use soroban_sdk::{testutils::Address as _, Address, Env};

pub(crate) fn create_resilient_oracle(e: &Env) -> Address {
    e.register_contract(None, ResilientOracleContract {})
}

//************************************************
//           External Contract Helpers
//************************************************

pub(crate) fn create_access_control<'a>(e: &Env) -> (Address, MockAccessControlClient<'a>) {
    let contract_address = e.register_contract(None, MockAccessControl {});
    let client = MockAccessControlClient::new(e, &contract_address);
    client.set_allow_all(&true);
    (contract_address, client)
}

pub(crate) fn create_bound_validator<'a>(
    e: &Env,
    access_control: &Address,
) -> (Address, BoundValidatorClient<'a>) {
    let contract_address = e.register_contract(None, BoundValidatorContract {});
    let client = BoundValidatorClient::new(e, &contract_address);
    client.initialize(access_control);
    (contract_address, client)
}

pub(crate) fn create_mock_price_oracle<'a>(e: &Env) -> (Address, MockPriceOracleClient<'a>) {
    let contract_address = e.register_contract(None, MockPriceOracle {});
    (
        contract_address.clone(),
        MockPriceOracleClient::new(e, &contract_address),
    )
}

pub(crate) fn create_feed<'a>(e: &Env) -> (Address, MockFeedClient<'a>) {
    let contract_address = e.register_contract_wasm(None, MockPriceOracleWASM);
    (
        contract_address.clone(),
        MockFeedClient::new(e, &contract_address),
    )
}

//************************************************
//           Resolver Fixture
//************************************************

pub(crate) struct ResolverFixture<'a> {
    pub admin: Address,
    pub bound_validator: BoundValidatorClient<'a>,
    pub main_id: Address,
    pub main: MockPriceOracleClient<'a>,
    pub pivot_id: Address,
    pub pivot: MockPriceOracleClient<'a>,
    pub fallback_id: Address,
    pub fallback: MockPriceOracleClient<'a>,
}

impl ResolverFixture<'_> {
    /// Allow prices within 5% of the pivot price
    pub fn set_bounds(&self, asset: &Address) {
        self.bound_validator.set_validate_config(
            &self.admin,
            &ValidateConfig {
                asset: asset.clone(),
                upper_bound_ratio: 1_050_000_000_000_000_000,
                lower_bound_ratio: 0_950_000_000_000_000_000,
            },
        );
    }

    /// A token config with all three mock oracles enabled
    pub fn token_config(&self, asset: &Address) -> TokenConfig {
        TokenConfig {
            asset: asset.clone(),
            main: OracleSlot {
                source: Some(PriceSource::Resilient(self.main_id.clone())),
                enabled: true,
            },
            pivot: OracleSlot {
                source: Some(PriceSource::Resilient(self.pivot_id.clone())),
                enabled: true,
            },
            fallback: OracleSlot {
                source: Some(PriceSource::Resilient(self.fallback_id.clone())),
                enabled: true,
            },
        }
    }
}

/// Deploy and initialize a resilient oracle with a bound validator and three mock oracles
pub(crate) fn setup_resolver<'a>(e: &Env) -> (Address, ResolverFixture<'a>) {
    let admin = Address::generate(e);
    let (access_control, _) = create_access_control(e);
    let (bound_validator_id, bound_validator) = create_bound_validator(e, &access_control);
    let (main_id, main) = create_mock_price_oracle(e);
    let (pivot_id, pivot) = create_mock_price_oracle(e);
    let (fallback_id, fallback) = create_mock_price_oracle(e);

    let oracle = create_resilient_oracle(e);
    ResilientOracleClient::new(e, &oracle).initialize(&access_control, &bound_validator_id);
    (
        oracle,
        ResolverFixture {
            admin,
            bound_validator,
            main_id,
            main,
            pivot_id,
            pivot,
            fallback_id,
            fallback,
        },
    )
}
