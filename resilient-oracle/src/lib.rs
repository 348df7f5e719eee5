#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod contract;
mod errors;
mod resolver;
mod sources;
mod storage;
mod testutils;

pub use contract::*;
pub use errors::ResilientOracleError;
pub use storage::{
    FeedSource, OracleRole, OracleSlot, PriceSource, ResilientOracleDataKey, TokenConfig,
};
