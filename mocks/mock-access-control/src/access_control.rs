use oracle_interfaces::AccessControl;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[derive(Clone)]
#[contracttype]
pub struct PermissionKey {
    pub account: Address,
    pub function: Symbol,
}

#[derive(Clone)]
#[contracttype]
pub enum MockAccessControlDataKey {
    // MOCK: If every account is allowed to call every function
    AllowAll,
    // MOCK: An explicit permission for an account and function
    Permission(PermissionKey),
}

/// ### Mock Access Control
///
/// Contract to mock an access control manager.
///
/// ### Dev
/// For testing purposes only!
#[contract]
pub struct MockAccessControl;

pub trait MockAccessControlTrait {
    /// Allow or deny every account that has no explicit permission set
    fn set_allow_all(e: Env, allow: bool);

    /// Set an explicit permission for `account` to call `function`
    fn set_permission(e: Env, account: Address, function: Symbol, allowed: bool);
}

#[contractimpl]
impl MockAccessControlTrait for MockAccessControl {
    fn set_allow_all(e: Env, allow: bool) {
        e.storage()
            .instance()
            .set::<MockAccessControlDataKey, bool>(&MockAccessControlDataKey::AllowAll, &allow);
    }

    fn set_permission(e: Env, account: Address, function: Symbol, allowed: bool) {
        let key = MockAccessControlDataKey::Permission(PermissionKey { account, function });
        e.storage()
            .instance()
            .set::<MockAccessControlDataKey, bool>(&key, &allowed);
    }
}

#[contractimpl]
impl AccessControl for MockAccessControl {
    fn is_allowed_to_call(e: Env, account: Address, function: Symbol) -> bool {
        let key = MockAccessControlDataKey::Permission(PermissionKey { account, function });
        if let Some(allowed) = e
            .storage()
            .instance()
            .get::<MockAccessControlDataKey, bool>(&key)
        {
            return allowed;
        }
        e.storage()
            .instance()
            .get::<MockAccessControlDataKey, bool>(&MockAccessControlDataKey::AllowAll)
            .unwrap_or(false)
    }
}
