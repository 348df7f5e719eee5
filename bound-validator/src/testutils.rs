#![cfg(test)]

use crate::BoundValidatorContract;
use mock_access_control::{MockAccessControl, MockAccessControlClient};
use soroban_sdk::{Address, Env};

pub(crate) fn create_bound_validator(e: &Env) -> Address {
    e.register_contract(None, BoundValidatorContract {})
}

//************************************************
//           External Contract Helpers
//************************************************

pub(crate) fn create_access_control<'a>(e: &Env) -> (Address, MockAccessControlClient<'a>) {
    let contract_address = e.register_contract(None, MockAccessControl {});
    (
        contract_address.clone(),
        MockAccessControlClient::new(e, &contract_address),
    )
}
