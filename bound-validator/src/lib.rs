#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod contract;
mod errors;
mod storage;
mod testutils;
mod validator;

pub use contract::*;
pub use errors::BoundValidatorError;
pub use storage::{BoundValidatorDataKey, ValidateConfig};
