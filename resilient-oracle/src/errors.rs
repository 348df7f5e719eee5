use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the resilient oracle contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Resilient oracle specific errors start at 1300.
pub enum ResilientOracleError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    BadRequest = 8,

    // Resilient Oracle
    ConfigNotFound = 1300,
    InvalidPrice = 1301,
    Paused = 1302,
    InvalidConfig = 1303,
}
