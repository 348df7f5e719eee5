/// Fixed-point scalar for 18 decimal numbers
pub const SCALAR_18: i128 = 1_000_000_000_000_000_000;

/// Seconds in a 365 day year, used to express growth rates as annual rates
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Number of fractional bits of a UQ112x112 number, the format constant-product pools
/// use for their cumulative price counters
pub const Q112_BITS: u32 = 112;
