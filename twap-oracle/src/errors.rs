use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the TWAP oracle contract. Common errors are codes that match up with the built-in
/// contracts error reporting. TWAP oracle specific errors start at 1600.
pub enum TwapOracleError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    BadRequest = 8,
    OverflowError = 12,

    // TWAP Oracle
    ConfigNotFound = 1600,
    StalePrice = 1601,
    InvalidTimestamp = 1602,
    InvalidConfig = 1603,
}
