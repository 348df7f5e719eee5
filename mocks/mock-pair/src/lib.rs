#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod pair;

pub use pair::*;
