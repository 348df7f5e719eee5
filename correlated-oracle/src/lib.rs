#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod config;
mod contract;
mod dependencies;
mod errors;
mod pricer;
mod rate;
mod storage;
mod testutils;

pub use contract::*;
pub use errors::CorrelatedOracleError;
pub use pricer::SnapshotPricer;
pub use rate::{ExchangeRate, RateAdapter};
pub use storage::{CorrelatedConfig, GrowthConfig, RateSource, Snapshot, TokenUnits};
