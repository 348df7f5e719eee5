#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod contract;
mod dependencies;
mod errors;
mod storage;
mod testutils;
mod twap;

pub use contract::*;
pub use errors::TwapOracleError;
pub use storage::{CachedPrice, Observation, TwapDataKey, TwapTokenConfig, TwapWindow};
