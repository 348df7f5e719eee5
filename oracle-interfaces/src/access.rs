use soroban_sdk::{Address, Env, Symbol};

use crate::AccessControlClient;

/// Authenticate `caller` and check with the access control contract that it may call
/// `function` on the current contract
///
/// The caller is expected to handle the negative case
///
/// ### Arguments
/// * `access_control` - The address of the access control contract
/// * `caller` - The account attempting the call
/// * `function` - The name of the function being called
pub fn is_allowed(e: &Env, access_control: &Address, caller: &Address, function: &str) -> bool {
    caller.require_auth();
    AccessControlClient::new(e, access_control)
        .is_allowed_to_call(caller, &Symbol::new(e, function))
}
