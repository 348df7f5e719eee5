use soroban_sdk::{Env, I256};

/// Compute `x * y / denominator`, truncating, with a 256 bit intermediate product
///
/// Prices with 18 decimals multiplied by another 18 decimal number quickly leave the i128
/// range, so any product of two unbounded fixed point values goes through here.
///
/// Returns None if the denominator is zero or the result does not fit in an i128
pub fn mul_div_floor(e: &Env, x: i128, y: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    I256::from_i128(e, x)
        .mul(&I256::from_i128(e, y))
        .div(&I256::from_i128(e, denominator))
        .to_i128()
}

/// Fetch 10^decimals as an i128
///
/// Returns None if the value does not fit in an i128
pub fn unit(decimals: u32) -> Option<i128> {
    10i128.checked_pow(decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SCALAR_18;

    #[test]
    fn test_mul_div_floor() {
        let e = Env::default();

        let result = mul_div_floor(&e, 1_5000000, 10 * SCALAR_18, 1_0000000).unwrap();
        assert_eq!(result, 15 * SCALAR_18);

        // truncates
        let result = mul_div_floor(&e, 10, 10, 3).unwrap();
        assert_eq!(result, 33);
    }

    #[test]
    fn test_mul_div_floor_large_intermediate() {
        let e = Env::default();

        // 2000 * 1e18 * 1e18 does not fit in an i128
        let price = 2000 * SCALAR_18;
        let result = mul_div_floor(&e, price, SCALAR_18, SCALAR_18).unwrap();
        assert_eq!(result, price);
    }

    #[test]
    fn test_mul_div_floor_invalid() {
        let e = Env::default();

        assert_eq!(mul_div_floor(&e, 1, 1, 0), None);
        assert_eq!(mul_div_floor(&e, i128::MAX, 2, 1), None);
    }

    #[test]
    fn test_unit() {
        assert_eq!(unit(0), Some(1));
        assert_eq!(unit(7), Some(1_0000000));
        assert_eq!(unit(18), Some(SCALAR_18));
        assert_eq!(unit(39), None);
    }
}
