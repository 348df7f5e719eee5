#![cfg(test)]

use crate::{
    storage::{CorrelatedConfig, GrowthConfig, RateSource, Snapshot},
    CorrelatedOracleClient, CorrelatedOracleContract,
};
use mock_access_control::{MockAccessControl, MockAccessControlClient};
use mock_price_oracle::{MockPriceOracle, MockPriceOracleClient};
use mock_rate_source::{MockRateSource, MockRateSourceClient};
use sep_41_token::testutils::{MockTokenClient, MockTokenWASM};
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    Address, Env, IntoVal,
};

pub(crate) fn create_correlated_oracle(e: &Env) -> Address {
    e.register_contract(None, CorrelatedOracleContract {})
}

//************************************************
//           External Contract Helpers
//************************************************

pub(crate) fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
    decimals: u32,
) -> (Address, MockTokenClient<'a>) {
    let contract_address = Address::generate(e);
    e.register_contract_wasm(&contract_address, MockTokenWASM);
    let client = MockTokenClient::new(e, &contract_address);
    client.initialize(admin, &decimals, &"unit".into_val(e), &"test".into_val(e));
    (contract_address, client)
}

pub(crate) fn create_access_control<'a>(e: &Env) -> (Address, MockAccessControlClient<'a>) {
    let contract_address = e.register_contract(None, MockAccessControl {});
    let client = MockAccessControlClient::new(e, &contract_address);
    client.set_allow_all(&true);
    (contract_address, client)
}

pub(crate) fn create_mock_price_oracle<'a>(e: &Env) -> (Address, MockPriceOracleClient<'a>) {
    let contract_address = e.register_contract(None, MockPriceOracle {});
    (
        contract_address.clone(),
        MockPriceOracleClient::new(e, &contract_address),
    )
}

pub(crate) fn create_rate_source<'a>(e: &Env) -> (Address, MockRateSourceClient<'a>) {
    let contract_address = e.register_contract(None, MockRateSource {});
    (
        contract_address.clone(),
        MockRateSourceClient::new(e, &contract_address),
    )
}

pub(crate) fn set_timestamp(e: &Env, timestamp: u64) {
    e.ledger().set(LedgerInfo {
        timestamp,
        protocol_version: 20,
        sequence_number: 1234,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 10,
        min_persistent_entry_ttl: 10,
        max_entry_ttl: 2000000,
    });
}

//************************************************
//           Correlated Oracle Fixture
//************************************************

pub(crate) struct CorrelatedFixture<'a> {
    pub admin: Address,
    pub access_control: MockAccessControlClient<'a>,
    pub oracle: Address,
    pub client: CorrelatedOracleClient<'a>,
    pub correlated_token: Address,
    pub underlying_token: Address,
    pub price_source: MockPriceOracleClient<'a>,
    pub rate_source: MockRateSourceClient<'a>,
}

/// Deploy and initialize a correlated oracle for a 7 decimal staked token backed by a
/// 7 decimal underlying token, reading its rate from a stake pool
pub(crate) fn setup_correlated_oracle<'a>(
    e: &Env,
    growth: &GrowthConfig,
    snapshot: &Snapshot,
) -> CorrelatedFixture<'a> {
    let admin = Address::generate(e);
    let (access_control_id, access_control) = create_access_control(e);
    let (correlated_token, _) = create_token_contract(e, &admin, 7);
    let (underlying_token, _) = create_token_contract(e, &admin, 7);
    let (price_source_id, price_source) = create_mock_price_oracle(e);
    let (rate_source_id, rate_source) = create_rate_source(e);

    let oracle = create_correlated_oracle(e);
    let client = CorrelatedOracleClient::new(e, &oracle);
    client.initialize(
        &access_control_id,
        &CorrelatedConfig {
            correlated_token: correlated_token.clone(),
            underlying_token: underlying_token.clone(),
            price_source: price_source_id,
            rate_source: RateSource::StakePool(rate_source_id),
        },
        growth,
        snapshot,
    );
    CorrelatedFixture {
        admin,
        access_control,
        oracle,
        client,
        correlated_token,
        underlying_token,
        price_source,
        rate_source,
    }
}
