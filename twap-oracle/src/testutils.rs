#![cfg(test)]

use crate::{storage::TwapTokenConfig, TwapOracleClient, TwapOracleContract};
use mock_access_control::{MockAccessControl, MockAccessControlClient};
use mock_pair::{MockPair, MockPairClient};
use sep_41_token::testutils::{MockTokenClient, MockTokenWASM};
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    Address, Env, IntoVal,
};

pub(crate) const START: u64 = 1_700_000_000;
pub(crate) const ANCHOR_PERIOD: u64 = 30 * 60;

pub(crate) fn create_twap_oracle(e: &Env) -> Address {
    e.register_contract(None, TwapOracleContract {})
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

pub(crate) fn create_pair<'a>(e: &Env) -> (Address, MockPairClient<'a>) {
    let contract_address = e.register_contract(None, MockPair {});
    (
        contract_address.clone(),
        MockPairClient::new(e, &contract_address),
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

/// A config for a 7 decimal asset quoted in a 7 decimal token
pub(crate) fn default_config(asset: &Address, pool: &Address) -> TwapTokenConfig {
    TwapTokenConfig {
        asset: asset.clone(),
        base_unit: 1_0000000,
        quote_base_unit: 1_0000000,
        pool: pool.clone(),
        is_native_based: false,
        is_reversed: false,
        anchor_period: ANCHOR_PERIOD,
    }
}

//************************************************
//           TWAP Oracle Fixture
//************************************************

pub(crate) struct TwapFixture<'a> {
    pub admin: Address,
    pub access_control: MockAccessControlClient<'a>,
    pub oracle: Address,
    pub client: TwapOracleClient<'a>,
    pub native: Address,
}

/// Deploy and initialize a TWAP oracle with a 7 decimal native asset
pub(crate) fn setup_twap_oracle<'a>(e: &Env) -> TwapFixture<'a> {
    let admin = Address::generate(e);
    let (access_control_id, access_control) = create_access_control(e);
    let (native, _) = create_token_contract(e, &admin, 7);

    let oracle = create_twap_oracle(e);
    let client = TwapOracleClient::new(e, &oracle);
    client.initialize(&access_control_id, &native);
    TwapFixture {
        admin,
        access_control,
        oracle,
        client,
        native,
    }
}
