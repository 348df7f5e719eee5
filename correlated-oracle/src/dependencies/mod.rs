use soroban_sdk::{contractclient, Env};

/// A liquid staking pool that reports the underlying backing one whole staked token
#[contractclient(name = "StakePoolClient")]
pub trait StakePool {
    /// Fetch the underlying units backing one whole staked token
    fn exchange_rate(e: Env) -> i128;
}

/// A tokenized vault
#[contractclient(name = "VaultClient")]
pub trait Vault {
    /// Fetch the underlying units redeemable for `shares`
    fn convert_to_assets(e: Env, shares: i128) -> i128;
}

/// A restaking accountant that tracks the rate of a restaked token
#[contractclient(name = "AccountantClient")]
pub trait Accountant {
    /// Fetch the underlying units backing one whole restaked token
    fn get_rate(e: Env) -> i128;
}
