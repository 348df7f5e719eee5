use soroban_sdk::{contract, contractimpl, contracttype, Env, U256};

#[derive(Clone)]
#[contracttype]
pub struct PairState {
    pub reserve_0: i128,
    pub reserve_1: i128,
    pub block_timestamp_last: u64,
    pub price_0_cumulative_last: U256,
    pub price_1_cumulative_last: U256,
}

const STATE_KEY: &str = "State";

/// ### Mock Pair
///
/// Contract to mock the price accounting of a constant product pool. Cumulative prices are
/// UQ112x112 numbers accumulated with the reserves that were in place since the last update.
///
/// ### Dev
/// For testing purposes only!
#[contract]
pub struct MockPair;

pub trait MockPairTrait {
    /// Accrue the cumulative prices with the current reserves, then set new reserves
    fn set_reserves(e: Env, reserve_0: i128, reserve_1: i128);

    /// Fetch the reserves and the timestamp of the last update
    fn get_reserves(e: Env) -> (i128, i128, u64);

    /// Fetch the cumulative price of token 0 in terms of token 1
    fn price_0_cumulative_last(e: Env) -> U256;

    /// Fetch the cumulative price of token 1 in terms of token 0
    fn price_1_cumulative_last(e: Env) -> U256;
}

fn load_state(e: &Env) -> PairState {
    e.storage()
        .instance()
        .get::<_, PairState>(&soroban_sdk::Symbol::new(e, STATE_KEY))
        .unwrap_or(PairState {
            reserve_0: 0,
            reserve_1: 0,
            block_timestamp_last: 0,
            price_0_cumulative_last: U256::from_u32(e, 0),
            price_1_cumulative_last: U256::from_u32(e, 0),
        })
}

#[contractimpl]
impl MockPairTrait for MockPair {
    fn set_reserves(e: Env, reserve_0: i128, reserve_1: i128) {
        let mut state = load_state(&e);
        let now = e.ledger().timestamp();
        let elapsed = now - state.block_timestamp_last;
        if elapsed > 0 && state.reserve_0 > 0 && state.reserve_1 > 0 {
            let r_0 = U256::from_u128(&e, state.reserve_0 as u128);
            let r_1 = U256::from_u128(&e, state.reserve_1 as u128);
            let elapsed = U256::from_u128(&e, elapsed as u128);
            state.price_0_cumulative_last = state
                .price_0_cumulative_last
                .add(&r_1.shl(112).div(&r_0).mul(&elapsed));
            state.price_1_cumulative_last = state
                .price_1_cumulative_last
                .add(&r_0.shl(112).div(&r_1).mul(&elapsed));
        }
        state.reserve_0 = reserve_0;
        state.reserve_1 = reserve_1;
        state.block_timestamp_last = now;
        e.storage()
            .instance()
            .set(&soroban_sdk::Symbol::new(&e, STATE_KEY), &state);
    }

    fn get_reserves(e: Env) -> (i128, i128, u64) {
        let state = load_state(&e);
        (state.reserve_0, state.reserve_1, state.block_timestamp_last)
    }

    fn price_0_cumulative_last(e: Env) -> U256 {
        load_state(&e).price_0_cumulative_last
    }

    fn price_1_cumulative_last(e: Env) -> U256 {
        load_state(&e).price_1_cumulative_last
    }
}
