#![cfg(test)]

use oracle_interfaces::SCALAR_18;
use resilient_oracle::{FeedSource, OracleRole, PriceSource};
use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation, Events},
    vec, Address, IntoVal, Symbol, Val,
};
use test_suites::test_fixture::{TestFixture, TokenIndex, FEED_MAX_AGE, ONE_DAY};

/// Test prices resolved through every kind of source, and that initialization can't be re-run
#[test]
fn test_resilient_oracle_prices() {
    let fixture = TestFixture::create();
    let e = &fixture.env;

    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();
    let usdc = fixture.tokens[TokenIndex::USDC].address.clone();
    let weth = fixture.tokens[TokenIndex::WETH].address.clone();
    let stxlm = fixture.tokens[TokenIndex::STXLM].address.clone();
    let aqua = fixture.tokens[TokenIndex::AQUA].address.clone();

    let result = fixture
        .oracle
        .try_initialize(&Address::generate(e), &Address::generate(e));
    assert!(result.is_err());
    assert_eq!(
        fixture.oracle.bound_validator(),
        fixture.bound_validator.address
    );

    // feed prices, XLM is validated against the TWAP
    let base = fixture.base_oracle.address.clone();
    assert_eq!(fixture.get_price(&base, &xlm), SCALAR_18 / 8);
    assert_eq!(fixture.get_price(&base, &usdc), SCALAR_18);
    assert_eq!(fixture.get_price(&base, &weth), 2000 * SCALAR_18);

    // nested resolver, growth capped oracle, and native based TWAP
    let oracle = fixture.oracle.address.clone();
    assert_eq!(fixture.get_price(&oracle, &xlm), SCALAR_18 / 8);
    assert_eq!(fixture.get_price(&oracle, &stxlm), SCALAR_18 / 8);
    assert_eq!(fixture.get_price(&oracle, &aqua), SCALAR_18 / 2);
}

#[test]
fn test_stale_main_feed_uses_fallback() {
    let fixture = TestFixture::create();
    let e = &fixture.env;
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();
    let usdc = fixture.tokens[TokenIndex::USDC].address.clone();
    let base = fixture.base_oracle.address.clone();

    fixture.jump(2 * 60 * 60);
    let now = e.ledger().timestamp();
    fixture.feed.set_price(
        &vec![e, 0_1250000, 1_0000000, 2000_0000000],
        &(now - FEED_MAX_AGE - 1),
    );
    fixture
        .backup_feed
        .set_price_stable(&vec![e, 0_1260000, 0_9990000, 2000_0000000]);

    assert_eq!(fixture.get_price(&base, &xlm), 126_000_000_000_000_000);
    assert_eq!(fixture.get_price(&base, &usdc), 999_000_000_000_000_000);

    // the main feed is used again once it reports
    fixture.feed.set_price(
        &vec![e, 0_1250000, 1_0000000, 2000_0000000],
        &(now - FEED_MAX_AGE),
    );
    assert_eq!(fixture.get_price(&base, &xlm), SCALAR_18 / 8);
    assert_eq!(fixture.get_price(&base, &usdc), SCALAR_18);
}

#[test]
fn test_main_feed_outside_pivot_bounds_uses_fallback() {
    let fixture = TestFixture::create();
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();
    let base = fixture.base_oracle.address.clone();

    // the main feed is 60% above the TWAP
    fixture.set_feed_prices(0_2000000, 0_1240000);
    assert_eq!(fixture.get_price(&base, &xlm), 124_000_000_000_000_000);
    assert_eq!(
        fixture.get_price(&fixture.oracle.address, &xlm),
        124_000_000_000_000_000
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #1301)")]
fn test_no_valid_source() {
    let fixture = TestFixture::create();
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();

    fixture.set_feed_prices(0_2000000, 0_0500000);
    fixture.get_price(&fixture.base_oracle.address, &xlm);
}

/// Test the administrative functions of the resolver for auth and events
#[test]
fn test_resilient_oracle_admin() {
    let fixture = TestFixture::create();
    let e = &fixture.env;
    let bombadil = fixture.bombadil.clone();
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();
    let base = fixture.base_oracle.address.clone();

    // disabling the pivot skips validation
    fixture.set_feed_prices(0_2000000, 0_1240000);
    fixture
        .base_oracle
        .enable_oracle(&bombadil, &xlm, &OracleRole::Pivot, &false);
    let event = vec![e, e.events().all().last_unchecked()];
    assert_eq!(
        event,
        vec![
            e,
            (
                base.clone(),
                (Symbol::new(e, "enable_oracle"), xlm.clone(), OracleRole::Pivot).into_val(e),
                false.into_val(e)
            )
        ]
    );
    assert_eq!(fixture.get_price(&base, &xlm), SCALAR_18 / 5);
    let (pivot, enabled) = fixture.base_oracle.get_oracle(&xlm, &OracleRole::Pivot);
    assert_eq!(pivot, Some(PriceSource::Twap(fixture.twap_oracle.address.clone())));
    assert!(!enabled);

    // point the top level oracle directly at the backup feed
    let source = Some(PriceSource::Feed(FeedSource {
        feed: fixture.backup_feed.address.clone(),
        decimals: 7,
        max_age: FEED_MAX_AGE,
    }));
    fixture
        .oracle
        .set_oracle(&bombadil, &xlm, &source, &OracleRole::Main);
    assert_eq!(
        e.auths()[0],
        (
            bombadil.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    fixture.oracle.address.clone(),
                    Symbol::new(e, "set_oracle"),
                    vec![
                        e,
                        bombadil.to_val(),
                        xlm.to_val(),
                        source.into_val(e),
                        OracleRole::Main.into_val(e),
                    ]
                )),
                sub_invocations: std::vec![]
            }
        )
    );
    let event = vec![e, e.events().all().last_unchecked()];
    let event_data: Val = source.into_val(e);
    assert_eq!(
        event,
        vec![
            e,
            (
                fixture.oracle.address.clone(),
                (Symbol::new(e, "set_oracle"), xlm.clone(), OracleRole::Main).into_val(e),
                event_data
            )
        ]
    );
    assert_eq!(
        fixture.get_price(&fixture.oracle.address, &xlm),
        124_000_000_000_000_000
    );
    assert_eq!(fixture.oracle.get_token_config(&xlm).main.source, source);
}

#[test]
#[should_panic(expected = "Error(Contract, #1303)")]
fn test_clear_main_source() {
    let fixture = TestFixture::create();
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();

    fixture
        .oracle
        .set_oracle(&fixture.bombadil, &xlm, &None, &OracleRole::Main);
}

#[test]
fn test_pause() {
    let fixture = TestFixture::create();
    let e = &fixture.env;
    let xlm = fixture.tokens[TokenIndex::XLM].address.clone();
    let frodo = Address::generate(e);

    // only permitted accounts can pause
    fixture.access_control.set_allow_all(&false);
    let result = fixture.oracle.try_pause(&frodo);
    assert!(result.is_err());
    fixture.access_control.set_permission(&frodo, &Symbol::new(e, "pause"), &true);

    fixture.oracle.pause(&frodo);
    assert!(fixture.oracle.paused());
    let event = vec![e, e.events().all().last_unchecked()];
    assert_eq!(
        event,
        vec![
            e,
            (
                fixture.oracle.address.clone(),
                (Symbol::new(e, "pause"),).into_val(e),
                frodo.into_val(e)
            )
        ]
    );
    let result = oracle_interfaces::PriceOracleClient::new(e, &fixture.oracle.address)
        .try_get_price(&xlm);
    assert!(result.is_err());

    // the paused resolver does not break the base oracle
    assert_eq!(
        fixture.get_price(&fixture.base_oracle.address, &xlm),
        SCALAR_18 / 8
    );

    fixture.access_control.set_allow_all(&true);
    fixture.oracle.unpause(&fixture.bombadil);
    assert!(!fixture.oracle.paused());
    assert_eq!(
        fixture.get_price(&fixture.oracle.address, &xlm),
        SCALAR_18 / 8
    );
}

#[test]
fn test_update_asset_price_ignores_failed_sources() {
    let fixture = TestFixture::create();
    let e = &fixture.env;
    let stxlm = fixture.tokens[TokenIndex::STXLM].address.clone();
    let snapshot = fixture.correlated_oracle.snapshot();

    fixture.jump(ONE_DAY);
    fixture.stake_pool.set_broken(&true);
    fixture.update_asset_price(&stxlm);
    assert_eq!(fixture.correlated_oracle.snapshot(), snapshot);

    fixture.stake_pool.set_broken(&false);
    fixture.update_asset_price(&stxlm);
    let updated = fixture.correlated_oracle.snapshot();
    assert_eq!(updated.max_exchange_rate, SCALAR_18);
    assert_eq!(updated.timestamp, e.ledger().timestamp());
}
