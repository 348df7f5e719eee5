use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the bound validator contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Bound validator specific errors start at 1400.
pub enum BoundValidatorError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    BadRequest = 8,

    // Bound Validator
    ConfigNotFound = 1400,
    InvalidAnchor = 1401,
    InvalidConfig = 1402,
}
