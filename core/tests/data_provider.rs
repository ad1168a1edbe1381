//! Built-in sample data, the JSON data directory, and validation.

use churnboard_core::{
    config::DashboardConfig,
    error::DashError,
    provider::DashboardData,
    risk::{ProbabilityPolicy, RiskThresholds},
};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

#[test]
fn sample_is_valid() {
    let data = DashboardData::sample();
    assert!(data.validate().is_ok());
    assert_eq!(data.customers.len(), 5);
    assert_eq!(data.sales.monthly.len(), 12);
    assert_eq!(data.sales.quarterly.len(), 4);
    assert_eq!(data.model_performance.len(), 4);
    assert_eq!(data.segments.len(), 4);
    assert_eq!(data.feature_importance.len(), 7);
}

#[test]
fn sample_is_stable_across_calls() {
    assert_eq!(DashboardData::sample(), DashboardData::sample());
}

#[test]
fn data_directory_matches_sample() {
    let loaded = DashboardData::load(DATA_DIR).expect("data dir should load");
    assert_eq!(loaded, DashboardData::sample());
}

#[test]
fn config_in_data_directory_is_the_default() {
    let cfg = DashboardConfig::load(DATA_DIR).unwrap();
    assert_eq!(cfg, DashboardConfig::default());
    assert_eq!(cfg.risk_thresholds, RiskThresholds::default());
    assert_eq!(cfg.probability_policy, ProbabilityPolicy::Reject);
}

#[test]
fn missing_directory_is_an_io_error() {
    let err = DashboardData::load("/nonexistent/churnboard").unwrap_err();
    assert!(matches!(err, DashError::Io { .. }), "got {err:?}");
}

#[test]
fn latest_activity_and_lookup() {
    let data = DashboardData::sample();
    assert_eq!(data.latest_activity().unwrap().to_string(), "2024-01-12");
    assert_eq!(data.customer(2).unwrap().name, "Sarah Johnson");
    assert!(matches!(data.customer(42), Err(DashError::CustomerNotFound { id: 42 })));
}

#[test]
fn duplicate_customer_ids_are_rejected() {
    let mut data = DashboardData::sample();
    data.customers[1].id = data.customers[0].id;
    assert!(matches!(
        data.validate(),
        Err(DashError::InvalidArgument { what: "customer id", .. })
    ));
}

#[test]
fn out_of_range_probability_is_rejected() {
    let mut data = DashboardData::sample();
    data.customers[3].churn_probability = 1.5;
    assert!(matches!(data.validate(), Err(DashError::OutOfRange { .. })));

    data.customers[3].churn_probability = f64::NAN;
    assert!(matches!(data.validate(), Err(DashError::OutOfRange { .. })));
}

#[test]
fn duplicate_model_names_are_rejected() {
    let mut data = DashboardData::sample();
    data.model_performance[1].model = data.model_performance[0].model.clone();
    assert!(matches!(
        data.validate(),
        Err(DashError::InvalidArgument { what: "model name", .. })
    ));
}

#[test]
fn model_scores_must_be_ratios() {
    let mut data = DashboardData::sample();
    data.model_performance[2].recall = 1.2;
    assert!(data.validate().is_err());
}

#[test]
fn malformed_customer_json_is_a_serialization_error() {
    let result: Result<Vec<churnboard_core::CustomerRecord>, _> =
        serde_json::from_str(r#"[{ "id": 1, "name": "X" }]"#);
    let err: DashError = result.unwrap_err().into();
    assert!(matches!(err, DashError::Serialization(_)));
}
