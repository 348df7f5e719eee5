use std::ops::Index;

use crate::token::create_token;
use bound_validator::{BoundValidatorClient, BoundValidatorContract, ValidateConfig};
use correlated_oracle::{
    CorrelatedConfig, CorrelatedOracleClient, CorrelatedOracleContract, GrowthConfig, RateSource,
    Snapshot,
};
use mock_access_control::{MockAccessControl, MockAccessControlClient};
use mock_pair::{MockPair, MockPairClient};
use mock_rate_source::{MockRateSource, MockRateSourceClient};
use oracle_interfaces::{AssetPriceUpdaterClient, PriceOracleClient, SCALAR_18};
use resilient_oracle::{
    FeedSource, OracleSlot, PriceSource, ResilientOracleClient, ResilientOracleContract,
    TokenConfig,
};
use sep_40_oracle::testutils::{Asset, MockPriceOracleClient, MockPriceOracleWASM};
use sep_41_token::testutils::MockTokenClient;
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    vec as svec, Address, Env, Symbol,
};
use twap_oracle::{TwapOracleClient, TwapOracleContract, TwapTokenConfig};

pub const SCALAR_7: i128 = 1_000_0000;
pub const ONE_DAY: u64 = 24 * 60 * 60;
pub const ANCHOR_PERIOD: u64 = 30 * 60;
pub const FEED_MAX_AGE: u64 = 60 * 60;

#[derive(Clone, Copy)]
#[repr(usize)]
pub enum TokenIndex {
    XLM = 0,
    USDC = 1,
    WETH = 2,
    STXLM = 3,
    AQUA = 4,
}

pub struct TokenList<'a>(pub Vec<MockTokenClient<'a>>);

impl<'a> Index<TokenIndex> for TokenList<'a> {
    type Output = MockTokenClient<'a>;

    fn index(&self, index: TokenIndex) -> &Self::Output {
        &self.0[index as usize]
    }
}

/// The full oracle suite deployed against mock feeds, pools and rate sources
///
/// The `base_oracle` prices XLM, USDC and wETH from the SEP-40 feeds, using the TWAP oracle
/// as the pivot for XLM. The `oracle` prices stXLM through the correlated oracle, AQUA
/// through the TWAP oracle, and XLM by deferring to the `base_oracle`.
pub struct TestFixture<'a> {
    pub env: Env,
    pub bombadil: Address,
    pub access_control: MockAccessControlClient<'a>,
    pub bound_validator: BoundValidatorClient<'a>,
    pub feed: MockPriceOracleClient<'a>,
    pub backup_feed: MockPriceOracleClient<'a>,
    pub twap_oracle: TwapOracleClient<'a>,
    pub xlm_usdc_pair: MockPairClient<'a>,
    pub aqua_xlm_pair: MockPairClient<'a>,
    pub stake_pool: MockRateSourceClient<'a>,
    pub correlated_oracle: CorrelatedOracleClient<'a>,
    pub base_oracle: ResilientOracleClient<'a>,
    pub oracle: ResilientOracleClient<'a>,
    pub tokens: TokenList<'a>,
}

impl TestFixture<'_> {
    /// Create a new TestFixture for the oracle suite
    ///
    /// Deploys XLM (0), USDC (1), wETH (2), stXLM (3) and AQUA (4) test tokens. Feeds report
    /// XLM at 0.125 USDC, USDC at 1 and wETH at 2000. The pools quote XLM at 0.125 USDC and
    /// AQUA at 4 XLM. stXLM starts at an exchange rate of 1 XLM.
    ///
    /// The ledger is left one hour after deployment, with every TWAP window rotated once.
    pub fn create<'a>() -> TestFixture<'a> {
        let e = Env::default();
        e.mock_all_auths();
        e.budget().reset_unlimited();

        let bombadil = Address::generate(&e);

        e.ledger().set(LedgerInfo {
            timestamp: 1_700_000_000,
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });
        let start = e.ledger().timestamp();

        // deploy tokens
        let (xlm_id, xlm_client) = create_token(&e, &bombadil, 7, "XLM");
        let (usdc_id, usdc_client) = create_token(&e, &bombadil, 7, "USDC");
        let (weth_id, weth_client) = create_token(&e, &bombadil, 9, "wETH");
        let (stxlm_id, stxlm_client) = create_token(&e, &bombadil, 7, "stXLM");
        let (aqua_id, aqua_client) = create_token(&e, &bombadil, 7, "AQUA");

        // deploy access control
        let access_control_id = e.register_contract(None, MockAccessControl {});
        let access_control = MockAccessControlClient::new(&e, &access_control_id);
        access_control.set_allow_all(&true);

        // deploy feeds
        let feed_assets = svec![
            &e,
            Asset::Stellar(xlm_id.clone()),
            Asset::Stellar(usdc_id.clone()),
            Asset::Stellar(weth_id.clone()),
        ];
        let feed_id = e.register_contract_wasm(None, MockPriceOracleWASM);
        let feed = MockPriceOracleClient::new(&e, &feed_id);
        feed.set_data(
            &bombadil,
            &Asset::Other(Symbol::new(&e, "USD")),
            &feed_assets,
            &7,
            &300,
        );
        let backup_feed_id = e.register_contract_wasm(None, MockPriceOracleWASM);
        let backup_feed = MockPriceOracleClient::new(&e, &backup_feed_id);
        backup_feed.set_data(
            &bombadil,
            &Asset::Other(Symbol::new(&e, "USD")),
            &feed_assets,
            &7,
            &300,
        );

        // deploy bound validator
        let bound_validator_id = e.register_contract(None, BoundValidatorContract {});
        let bound_validator = BoundValidatorClient::new(&e, &bound_validator_id);
        bound_validator.initialize(&access_control_id);
        let mut validate_configs = svec![&e];
        for asset in [&xlm_id, &usdc_id, &weth_id, &stxlm_id, &aqua_id] {
            validate_configs.push_back(ValidateConfig {
                asset: asset.clone(),
                upper_bound_ratio: 1_050_000_000_000_000_000,
                lower_bound_ratio: 0_950_000_000_000_000_000,
            });
        }
        bound_validator.set_validate_configs(&bombadil, &validate_configs);

        // deploy pools
        let xlm_usdc_pair_id = e.register_contract(None, MockPair {});
        let xlm_usdc_pair = MockPairClient::new(&e, &xlm_usdc_pair_id);
        xlm_usdc_pair.set_reserves(&(800_000 * SCALAR_7), &(100_000 * SCALAR_7));
        let aqua_xlm_pair_id = e.register_contract(None, MockPair {});
        let aqua_xlm_pair = MockPairClient::new(&e, &aqua_xlm_pair_id);
        aqua_xlm_pair.set_reserves(&(1_000 * SCALAR_7), &(4_000 * SCALAR_7));

        // deploy TWAP oracle
        let twap_oracle_id = e.register_contract(None, TwapOracleContract {});
        let twap_oracle = TwapOracleClient::new(&e, &twap_oracle_id);
        twap_oracle.initialize(&access_control_id, &xlm_id);
        twap_oracle.set_token_configs(
            &bombadil,
            &svec![
                &e,
                TwapTokenConfig {
                    asset: xlm_id.clone(),
                    base_unit: SCALAR_7,
                    quote_base_unit: SCALAR_7,
                    pool: xlm_usdc_pair_id.clone(),
                    is_native_based: false,
                    is_reversed: false,
                    anchor_period: ANCHOR_PERIOD,
                },
                TwapTokenConfig {
                    asset: aqua_id.clone(),
                    base_unit: SCALAR_7,
                    quote_base_unit: SCALAR_7,
                    pool: aqua_xlm_pair_id.clone(),
                    is_native_based: true,
                    is_reversed: false,
                    anchor_period: ANCHOR_PERIOD,
                },
            ],
        );

        // deploy base oracle
        let base_oracle_id = e.register_contract(None, ResilientOracleContract {});
        let base_oracle = ResilientOracleClient::new(&e, &base_oracle_id);
        base_oracle.initialize(&access_control_id, &bound_validator_id);
        let feed_source = |feed: &Address| {
            Some(PriceSource::Feed(FeedSource {
                feed: feed.clone(),
                decimals: 7,
                max_age: FEED_MAX_AGE,
            }))
        };
        let mut base_configs = svec![
            &e,
            TokenConfig {
                asset: xlm_id.clone(),
                main: slot(feed_source(&feed_id)),
                pivot: slot(Some(PriceSource::Twap(twap_oracle_id.clone()))),
                fallback: slot(feed_source(&backup_feed_id)),
            }
        ];
        for asset in [&usdc_id, &weth_id] {
            base_configs.push_back(TokenConfig {
                asset: asset.clone(),
                main: slot(feed_source(&feed_id)),
                pivot: slot(None),
                fallback: slot(feed_source(&backup_feed_id)),
            });
        }
        base_oracle.set_token_configs(&bombadil, &base_configs);

        // deploy correlated oracle
        let stake_pool_id = e.register_contract(None, MockRateSource {});
        let stake_pool = MockRateSourceClient::new(&e, &stake_pool_id);
        stake_pool.set_rate(&SCALAR_7, &SCALAR_7);
        let correlated_oracle_id = e.register_contract(None, CorrelatedOracleContract {});
        let correlated_oracle = CorrelatedOracleClient::new(&e, &correlated_oracle_id);
        correlated_oracle.initialize(
            &access_control_id,
            &CorrelatedConfig {
                correlated_token: stxlm_id.clone(),
                underlying_token: xlm_id.clone(),
                price_source: base_oracle_id.clone(),
                rate_source: RateSource::StakePool(stake_pool_id.clone()),
            },
            &GrowthConfig {
                annual_growth_rate: 0_050_000_000_000_000_000,
                snapshot_interval: ONE_DAY,
                snapshot_gap: 0,
            },
            &Snapshot {
                max_exchange_rate: SCALAR_18,
                timestamp: start,
            },
        );

        // deploy oracle
        let oracle_id = e.register_contract(None, ResilientOracleContract {});
        let oracle = ResilientOracleClient::new(&e, &oracle_id);
        oracle.initialize(&access_control_id, &bound_validator_id);
        oracle.set_token_configs(
            &bombadil,
            &svec![
                &e,
                TokenConfig {
                    asset: xlm_id.clone(),
                    main: slot(Some(PriceSource::Resilient(base_oracle_id.clone()))),
                    pivot: slot(None),
                    fallback: slot(None),
                },
                TokenConfig {
                    asset: stxlm_id.clone(),
                    main: slot(Some(PriceSource::Capped(correlated_oracle_id.clone()))),
                    pivot: slot(None),
                    fallback: slot(None),
                },
                TokenConfig {
                    asset: aqua_id.clone(),
                    main: slot(Some(PriceSource::Twap(twap_oracle_id.clone()))),
                    pivot: slot(None),
                    fallback: slot(None),
                },
            ],
        );

        let fixture = TestFixture {
            env: e,
            bombadil,
            access_control,
            bound_validator,
            feed,
            backup_feed,
            twap_oracle,
            xlm_usdc_pair,
            aqua_xlm_pair,
            stake_pool,
            correlated_oracle,
            base_oracle,
            oracle,
            tokens: TokenList(std::vec![
                xlm_client,
                usdc_client,
                weth_client,
                stxlm_client,
                aqua_client,
            ]),
        };

        // pass 1 hour and fill the TWAP windows
        fixture.jump(60 * 60);
        fixture.set_feed_prices(0_1250000, 0_1250000);
        fixture.update_asset_price(&xlm_id);
        fixture.update_asset_price(&aqua_id);

        fixture
    }

    /********** Oracle Helpers ***********/

    /// Fetch the price of an asset from any oracle in the suite
    pub fn get_price(&self, oracle: &Address, asset: &Address) -> i128 {
        PriceOracleClient::new(&self.env, oracle).get_price(asset)
    }

    /// Refresh the sources of an asset through the top level oracle
    pub fn update_asset_price(&self, asset: &Address) {
        AssetPriceUpdaterClient::new(&self.env, &self.oracle.address).update_asset_price(asset);
    }

    /// Report fresh prices on both feeds. USDC is reported at 1 and wETH at 2000.
    ///
    /// ### Arguments
    /// * `xlm_price` - The XLM price reported by the main feed, in 7 decimals
    /// * `backup_xlm_price` - The XLM price reported by the backup feed, in 7 decimals
    pub fn set_feed_prices(&self, xlm_price: i128, backup_xlm_price: i128) {
        self.feed.set_price_stable(&svec![
            &self.env,
            xlm_price,
            1_0000000,
            2000_0000000
        ]);
        self.backup_feed.set_price_stable(&svec![
            &self.env,
            backup_xlm_price,
            1_0000000,
            2000_0000000
        ]);
    }

    /********** Chain Helpers ***********/

    pub fn jump(&self, time: u64) {
        self.env.ledger().set(LedgerInfo {
            timestamp: self.env.ledger().timestamp() + time,
            protocol_version: 20,
            sequence_number: self.env.ledger().sequence() + 1,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });
    }
}

fn slot(source: Option<PriceSource>) -> OracleSlot {
    let enabled = source.is_some();
    OracleSlot { source, enabled }
}
