#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod access;
mod clients;
mod constants;
pub mod math;

pub use access::is_allowed;
pub use clients::{
    AccessControl, AccessControlClient, AssetPriceUpdater, AssetPriceUpdaterClient, PriceOracle,
    PriceOracleClient, PriceValidator, PriceValidatorClient, SnapshotOracle, SnapshotOracleClient,
    TwapUpdater, TwapUpdaterClient,
};
pub use constants::{Q112_BITS, SCALAR_18, SECONDS_PER_YEAR};
