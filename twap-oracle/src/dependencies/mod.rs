use soroban_sdk::{contractclient, Env, U256};

/// A constant product liquidity pool that tracks cumulative prices as UQ112x112 numbers
#[contractclient(name = "LiquidityPoolClient")]
pub trait LiquidityPool {
    /// Fetch the reserves of both tokens and the timestamp they were last updated
    fn get_reserves(e: Env) -> (i128, i128, u64);

    /// Fetch the cumulative price of token 0 in units of token 1
    fn price_0_cumulative_last(e: Env) -> U256;

    /// Fetch the cumulative price of token 1 in units of token 0
    fn price_1_cumulative_last(e: Env) -> U256;
}
