#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod price_oracle;

pub use price_oracle::*;
