use crate::config::AnalysisConfig;
use crate::domain::errors::ConfigError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_without_overrides_uses_defaults() {
    let config = AnalysisConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, AnalysisConfig::default());
}

#[test]
fn test_config_with_overrides() {
    let config = AnalysisConfig::from_lookup(lookup_from(&[
        ("FX_PAIRS", "EURUSD=X,AUDUSD=X"),
        ("FX_START_DATE", "2024-01-01"),
        ("FX_END_DATE", "2024-06-30"),
        ("FX_OUTPUT_DIR", "out"),
        ("FX_SHOW_CHARTS", "false"),
        ("FX_PROVIDER_URL", "http://127.0.0.1:9000"),
    ]))
    .unwrap();

    assert_eq!(config.pairs, vec!["EURUSD=X", "AUDUSD=X"]);
    assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert!(!config.show_charts);
    assert_eq!(config.provider.base_url, "http://127.0.0.1:9000");
}

#[test]
fn test_config_rejects_reversed_range() {
    let err = AnalysisConfig::from_lookup(lookup_from(&[
        ("FX_START_DATE", "2024-06-30"),
        ("FX_END_DATE", "2024-01-01"),
    ]))
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidRange { .. })
    ));
}

#[test]
fn test_config_rejects_empty_pair_list() {
    let err = AnalysisConfig::from_lookup(lookup_from(&[("FX_PAIRS", " , ")])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::EmptyPairList)
    ));
}

#[test]
fn test_config_rejects_malformed_date() {
    let err = AnalysisConfig::from_lookup(lookup_from(&[("FX_END_DATE", "31/12/2024")])).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("FX_END_DATE"));
    assert!(msg.contains("31/12/2024"));
}
