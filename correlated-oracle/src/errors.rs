use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the correlated oracle contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Correlated oracle specific errors start at 1500.
pub enum CorrelatedOracleError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    BadRequest = 8,
    OverflowError = 12,

    // Correlated Oracle
    InvalidTokenAddress = 1500,
    SourceUnavailable = 1501,
    InvalidGrowthRate = 1502,
    InvalidInitialSnapshot = 1503,
    InvalidTimestamp = 1504,
    InvalidConfig = 1505,
}
