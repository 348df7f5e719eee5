use oracle_interfaces::{math::mul_div_floor, SCALAR_18, SECONDS_PER_YEAR};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{panic_with_error, Env};

use crate::{
    errors::CorrelatedOracleError,
    rate::ExchangeRate,
    storage::{GrowthConfig, Snapshot},
};

/// Prices a correlated token from its underlying price and an exchange rate, where the
/// exchange rate is capped by the growth allowed since the last snapshot
pub struct SnapshotPricer<R: ExchangeRate> {
    pub rate: R,
    pub growth: GrowthConfig,
    pub snapshot: Snapshot,
}

impl<R: ExchangeRate> SnapshotPricer<R> {
    pub fn new(rate: R, growth: GrowthConfig, snapshot: Snapshot) -> Self {
        SnapshotPricer {
            rate,
            growth,
            snapshot,
        }
    }

    /// Check if the exchange rate is capped at all
    pub fn is_capping_enabled(&self) -> bool {
        self.growth.annual_growth_rate != 0 && self.growth.snapshot_interval != 0
    }

    /// Fetch the current exchange rate, expressed in 18 decimals
    ///
    /// ### Panics
    /// If the exchange rate source could not be read
    pub fn underlying_amount(&self, e: &Env) -> i128 {
        match self.rate.underlying_amount(e) {
            Some(amount) => amount,
            None => panic_with_error!(e, CorrelatedOracleError::SourceUnavailable),
        }
    }

    /// Fetch the maximum exchange rate allowed now, or None if capping is disabled
    ///
    /// The snapshot's rate grows linearly at the annual growth rate, then the gap is added
    pub fn max_allowed_exchange_rate(&self, e: &Env) -> Option<i128> {
        if !self.is_capping_enabled() {
            return None;
        }
        let elapsed = e
            .ledger()
            .timestamp()
            .saturating_sub(self.snapshot.timestamp);
        let growth = self
            .growth
            .annual_growth_rate
            .fixed_mul_floor(cast::i128(elapsed), cast::i128(SECONDS_PER_YEAR))
            .and_then(|accrued| accrued.checked_add(SCALAR_18));
        let max_allowed = growth
            .and_then(|growth| mul_div_floor(e, self.snapshot.max_exchange_rate, growth, SCALAR_18))
            .and_then(|max_allowed| max_allowed.checked_add(self.growth.snapshot_gap));
        match max_allowed {
            Some(max_allowed) => Some(max_allowed),
            None => panic_with_error!(e, CorrelatedOracleError::OverflowError),
        }
    }

    /// Fetch the capped exchange rate and the raw exchange rate, both expressed in 18 decimals
    ///
    /// ### Panics
    /// If the exchange rate source could not be read
    pub fn capped_amount(&self, e: &Env) -> (i128, i128) {
        let raw = self.underlying_amount(e);
        match self.max_allowed_exchange_rate(e) {
            Some(max_allowed) if max_allowed < raw => (max_allowed, raw),
            _ => (raw, raw),
        }
    }

    /// Check if the exchange rate is currently limited by the cap
    pub fn is_capped(&self, e: &Env) -> bool {
        let (amount, raw) = self.capped_amount(e);
        amount < raw
    }

    /// Fetch the price of the correlated token
    ///
    /// ### Arguments
    /// * `underlying_price` - The price of the underlying token, expressed in 18 decimals
    pub fn price(&self, e: &Env, underlying_price: i128) -> i128 {
        let (amount, _) = self.capped_amount(e);
        Self::value(e, amount, underlying_price)
    }

    /// Fetch the value of `amount` of the underlying token at `underlying_price`
    pub fn value(e: &Env, amount: i128, underlying_price: i128) -> i128 {
        match mul_div_floor(e, amount, underlying_price, SCALAR_18) {
            Some(price) => price,
            None => panic_with_error!(e, CorrelatedOracleError::OverflowError),
        }
    }

    /// Fetch the snapshot to store if one is due
    ///
    /// Returns None if capping is disabled or the snapshot interval has not passed
    pub fn next_snapshot(&self, e: &Env) -> Option<Snapshot> {
        if !self.is_capping_enabled() {
            return None;
        }
        let now = e.ledger().timestamp();
        if now.saturating_sub(self.snapshot.timestamp) < self.growth.snapshot_interval {
            return None;
        }
        let (amount, _) = self.capped_amount(e);
        Some(Snapshot {
            max_exchange_rate: amount,
            timestamp: now,
        })
    }
}
