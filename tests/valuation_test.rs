mod common;

use assert_matches::assert_matches;
use chrono::{DateTime, TimeZone, Utc};
use portfolio_check::data_ingestion::DataLoader;
use portfolio_check::domain_types::PositionComposition;
use portfolio_check::valuation::{MissingPricePolicy, Registry, ValuationError};

fn load(dir: &std::path::Path) -> Registry {
    let (registry, _) = DataLoader::new(common::data_config(dir)).load().unwrap();
    registry
}

fn june_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_stock_uses_latest_price_before_query() {
    let dir = tempfile::tempdir().unwrap();
    common::write_stock_and_fund_dataset(dir.path());
    let registry = load(dir.path());

    let valuation = registry
        .value_portfolio("Investor1", june_first(), MissingPricePolicy::Zero)
        .unwrap();

    assert_eq!(valuation.total(), 5000.0);
    assert_eq!(valuation.stock, 5000.0);
    assert!(!valuation.is_degraded());
}

#[test]
fn test_fund_share_and_real_estate() {
    let dir = tempfile::tempdir().unwrap();
    common::write_stock_and_fund_dataset(dir.path());
    let registry = load(dir.path());

    let valuation = registry
        .value_portfolio("Investor2", june_first(), MissingPricePolicy::Zero)
        .unwrap();

    assert_eq!(valuation.fonds, 1250.0);
    assert_eq!(valuation.estate, 2000.0);
    assert_eq!(valuation.total(), 3250.0);

    // 七月之後新增的建物也計入
    let july = Utc.with_ymd_and_hms(2020, 7, 2, 0, 0, 0).unwrap();
    let later = registry
        .value_portfolio("Investor2", july, MissingPricePolicy::Zero)
        .unwrap();
    assert_eq!(later.estate, 2500.0);
    assert_eq!(later.fonds, 0.25 * 7000.0);
}

#[test]
fn test_query_before_any_transaction_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    common::write_stock_and_fund_dataset(dir.path());
    let registry = load(dir.path());

    let early = Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap();
    let valuation = registry
        .value_portfolio("Investor2", early, MissingPricePolicy::Fail)
        .unwrap();
    assert_eq!(valuation.total(), 0.0);
}

#[test]
fn test_unknown_investor() {
    let dir = tempfile::tempdir().unwrap();
    common::write_stock_and_fund_dataset(dir.path());
    let registry = load(dir.path());

    assert_matches!(
        registry.value_portfolio("Investor9", june_first(), MissingPricePolicy::Zero),
        Err(ValuationError::InvestorNotFound(ref id)) if id == "Investor9"
    );
}

#[test]
fn test_cyclic_fund_ownership_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(
        dir.path(),
        &[
            "FondsA;Investment1;Fonds;;;FondsB",
            "FondsB;Investment2;Fonds;;;FondsA",
        ],
        &[],
        &[
            "Investment1;Percentage;01-01-2020;0.5",
            "Investment2;Percentage;01-01-2020;0.5",
        ],
    );
    let registry = load(dir.path());

    assert_matches!(
        registry.value_portfolio("FondsA", june_first(), MissingPricePolicy::Zero),
        Err(ValuationError::CyclicOwnership { ref chain }) if chain == &["FondsA", "FondsB", "FondsA"]
    );
}

#[test]
fn test_missing_price_policies() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(
        dir.path(),
        &[
            "Investor1;Investment1;Stock;ISIN1;;",
            "Investor1;Investment2;Stock;NOPRICE;;",
        ],
        &["ISIN1;01-01-2020;10.0"],
        &[
            "Investment1;Shares;01-01-2020;10",
            "Investment2;Shares;01-01-2020;10",
        ],
    );
    let registry = load(dir.path());

    let degraded = registry
        .value_portfolio("Investor1", june_first(), MissingPricePolicy::Zero)
        .unwrap();
    assert_eq!(degraded.total(), 100.0);
    assert!(degraded.unpriced_isins.contains("NOPRICE"));

    assert_matches!(
        registry.value_portfolio("Investor1", june_first(), MissingPricePolicy::Fail),
        Err(ValuationError::PriceNotFound { ref isin, .. }) if isin == "NOPRICE"
    );
}

#[test]
fn test_combining_with_empty_composition() {
    let dir = tempfile::tempdir().unwrap();
    common::write_stock_and_fund_dataset(dir.path());
    let registry = load(dir.path());

    let mut composition = registry
        .investor("Investor1")
        .unwrap()
        .composition_at(june_first());
    let before = composition.clone();
    composition.combine(&PositionComposition::new());

    assert_eq!(composition, before);
    let resolver = registry.resolver(MissingPricePolicy::Zero);
    assert_eq!(resolver.value_of(&composition, june_first()).unwrap().total(), 5000.0);
}
