use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Env,
};

#[derive(Clone)]
#[contracttype]
pub enum MockRateSourceDataKey {
    // MOCK: Underlying units backing one whole share
    Rate,
    // MOCK: The number of share units in one whole share
    ShareUnit,
    // MOCK: If the rate source should fail
    Broken,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockRateSourceError {
    RateNotSet = 1,
    Broken = 2,
}

/// ### Mock Rate Source
///
/// Contract to mock the exchange rate reads of staking pools, vaults and accountants.
///
/// ### Dev
/// For testing purposes only!
#[contract]
pub struct MockRateSource;

pub trait MockRateSourceTrait {
    /// Sets the number of underlying units backing one whole share
    ///
    /// ### Arguments
    /// * `rate` - Underlying units per whole share
    /// * `share_unit` - The number of share units in one whole share
    fn set_rate(e: Env, rate: i128, share_unit: i128);

    /// Sets if every rate read fails
    fn set_broken(e: Env, broken: bool);

    /// Staking pool style read: underlying units per whole share
    fn exchange_rate(e: Env) -> i128;

    /// Accountant style read: underlying units per whole share
    fn get_rate(e: Env) -> i128;

    /// Vault style read: underlying units for an amount of shares
    fn convert_to_assets(e: Env, shares: i128) -> i128;
}

fn load_rate(e: &Env) -> (i128, i128) {
    let broken = e
        .storage()
        .instance()
        .get::<MockRateSourceDataKey, bool>(&MockRateSourceDataKey::Broken)
        .unwrap_or(false);
    if broken {
        panic_with_error!(e, MockRateSourceError::Broken);
    }
    let rate = e
        .storage()
        .instance()
        .get::<MockRateSourceDataKey, i128>(&MockRateSourceDataKey::Rate)
        .unwrap_or_else(|| panic_with_error!(e, MockRateSourceError::RateNotSet));
    let share_unit = e
        .storage()
        .instance()
        .get::<MockRateSourceDataKey, i128>(&MockRateSourceDataKey::ShareUnit)
        .unwrap_or_else(|| panic_with_error!(e, MockRateSourceError::RateNotSet));
    (rate, share_unit)
}

#[contractimpl]
impl MockRateSourceTrait for MockRateSource {
    fn set_rate(e: Env, rate: i128, share_unit: i128) {
        e.storage()
            .instance()
            .set::<MockRateSourceDataKey, i128>(&MockRateSourceDataKey::Rate, &rate);
        e.storage()
            .instance()
            .set::<MockRateSourceDataKey, i128>(&MockRateSourceDataKey::ShareUnit, &share_unit);
    }

    fn set_broken(e: Env, broken: bool) {
        e.storage()
            .instance()
            .set::<MockRateSourceDataKey, bool>(&MockRateSourceDataKey::Broken, &broken);
    }

    fn exchange_rate(e: Env) -> i128 {
        load_rate(&e).0
    }

    fn get_rate(e: Env) -> i128 {
        load_rate(&e).0
    }

    fn convert_to_assets(e: Env, shares: i128) -> i128 {
        let (rate, share_unit) = load_rate(&e);
        shares * rate / share_unit
    }
}
