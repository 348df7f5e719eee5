#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod rate_source;

pub use rate_source::*;
