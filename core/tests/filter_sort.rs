//! Customer table filter/sort view.

use chrono::NaiveDate;
use churnboard_core::{
    customer::{ContractType, CustomerRecord, ServicePlan},
    error::DashError,
    provider::DashboardData,
    risk::{RiskThresholds, RiskTier},
    view::{project, DateRange, SortKey, SortOrder, ViewState},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn customer(id: u32, name: &str, segment: &str, p: f64, tenure: u32) -> CustomerRecord {
    CustomerRecord {
        id,
        name: name.into(),
        age: 30,
        tenure,
        monthly_charges: 50.0,
        total_charges: 50.0 * tenure as f64,
        churn_probability: p,
        segment: segment.into(),
        last_activity: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        plan: None,
    }
}

fn names(records: &[&CustomerRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── project() ────────────────────────────────────────────────────────────────

/// Probabilities [0.15, 0.78, 0.25, 0.45, 0.12] sorted descending.
#[test]
fn churn_probability_descending_orders_largest_first() {
    let data = DashboardData::sample();
    let out = project(&data.customers, "", SortKey::ChurnProbability, SortOrder::Descending);

    let probs: Vec<f64> = out.iter().map(|r| r.churn_probability).collect();
    assert_eq!(probs, vec![0.78, 0.45, 0.25, 0.15, 0.12]);
}

#[test]
fn tenure_ascending_orders_smallest_first() {
    let data = DashboardData::sample();
    let out = project(&data.customers, "", SortKey::Tenure, SortOrder::Ascending);
    assert_eq!(
        names(&out),
        vec!["Sarah Johnson", "Emily Davis", "John Smith", "Mike Chen", "Alex Wilson"]
    );
}

#[test]
fn total_charges_descending() {
    let data = DashboardData::sample();
    let out = project(&data.customers, "", SortKey::TotalCharges, SortOrder::Descending);
    let totals: Vec<f64> = out.iter().map(|r| r.total_charges).collect();
    assert_eq!(totals, vec![5304.0, 3429.0, 2052.0, 966.0, 780.0]);
}

#[test]
fn query_sar_keeps_only_sarah() {
    let records = vec![
        customer(1, "Mike Chen", "Medium Risk", 0.25, 36),
        customer(2, "Sarah Johnson", "High Risk", 0.78, 8),
    ];
    let out = project(&records, "sar", SortKey::ChurnProbability, SortOrder::Descending);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Sarah Johnson");
    assert_eq!(out[0].churn_probability, 0.78);
}

#[test]
fn every_result_contains_the_query_in_name_or_segment() {
    let data = DashboardData::sample();
    for query in ["risk", "LOW", "jo", "en", "Medium", "zzz"] {
        let needle = query.to_lowercase();
        let out = project(&data.customers, query, SortKey::Tenure, SortOrder::Ascending);
        for r in &out {
            assert!(
                r.name.to_lowercase().contains(&needle)
                    || r.segment.to_lowercase().contains(&needle),
                "'{}' / '{}' does not contain '{query}'", r.name, r.segment
            );
        }
        let expected = data
            .customers
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.segment.to_lowercase().contains(&needle)
            })
            .count();
        assert_eq!(out.len(), expected, "query '{query}' dropped a matching record");
    }
}

#[test]
fn segment_match_is_case_insensitive() {
    let data = DashboardData::sample();
    let out = project(&data.customers, "HIGH RISK", SortKey::Tenure, SortOrder::Ascending);
    assert_eq!(names(&out), vec!["Sarah Johnson"]);
}

/// With every key equal, the sort must leave input order untouched,
/// so the empty-query result is exactly the input sequence.
#[test]
fn empty_query_returns_all_records_in_input_order() {
    let records: Vec<CustomerRecord> = (1..=6)
        .map(|i| customer(i, &format!("Customer {i}"), "Low Risk", 0.2, 10))
        .collect();

    for order in [SortOrder::Ascending, SortOrder::Descending] {
        let out = project(&records, "", SortKey::ChurnProbability, order);
        let ids: Vec<u32> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}

#[test]
fn equal_keys_keep_relative_order_in_both_directions() {
    let records = vec![
        customer(1, "First", "Low Risk", 0.50, 12),
        customer(2, "Other", "Low Risk", 0.10, 24),
        customer(3, "Second", "Low Risk", 0.50, 12),
        customer(4, "Third", "Low Risk", 0.50, 12),
    ];

    let asc = project(&records, "", SortKey::Tenure, SortOrder::Ascending);
    assert_eq!(names(&asc), vec!["First", "Second", "Third", "Other"]);

    let desc = project(&records, "", SortKey::Tenure, SortOrder::Descending);
    assert_eq!(names(&desc), vec!["Other", "First", "Second", "Third"]);

    let by_prob = project(&records, "", SortKey::ChurnProbability, SortOrder::Descending);
    assert_eq!(names(&by_prob), vec!["First", "Second", "Third", "Other"]);
}

/// `-0.0` and `0.0` are the same key and must not be reordered.
#[test]
fn signed_zero_keys_are_equal() {
    let json = r#"[
        {"id":1,"name":"Zero","age":30,"tenure":5,"monthlyCharges":0.0,
         "totalCharges":0.0,"churnProbability":0.0,"segment":"Low Risk","lastActivity":"2024-01-01"},
        {"id":2,"name":"Negative Zero","age":30,"tenure":5,"monthlyCharges":-0.0,
         "totalCharges":-0.0,"churnProbability":-0.0,"segment":"Low Risk","lastActivity":"2024-01-01"}
    ]"#;
    let records: Vec<CustomerRecord> = serde_json::from_str(json).unwrap();
    assert!(records.iter().all(|r| r.validate().is_ok()));

    for key in [SortKey::ChurnProbability, SortKey::MonthlyCharges, SortKey::TotalCharges] {
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let ids: Vec<u32> = project(&records, "", key, order).iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![1, 2], "{key:?} {order:?}");
        }
    }
}

#[test]
fn projection_is_idempotent() {
    let data = DashboardData::sample();
    let a = project(&data.customers, "risk", SortKey::MonthlyCharges, SortOrder::Ascending);
    let b = project(&data.customers, "risk", SortKey::MonthlyCharges, SortOrder::Ascending);
    assert_eq!(a, b);

    // Re-projecting the output changes nothing either.
    let owned: Vec<CustomerRecord> = a.iter().map(|r| (*r).clone()).collect();
    let c = project(&owned, "risk", SortKey::MonthlyCharges, SortOrder::Ascending);
    assert_eq!(names(&a), names(&c));
}

#[test]
fn empty_input_yields_empty_output() {
    let out = project(&[], "anything", SortKey::Tenure, SortOrder::Descending);
    assert!(out.is_empty());
}

// ── Parsing ──────────────────────────────────────────────────────────────────

#[test]
fn sort_keys_parse_from_both_spellings() {
    assert_eq!("churnProbability".parse::<SortKey>().unwrap(), SortKey::ChurnProbability);
    assert_eq!("churn_probability".parse::<SortKey>().unwrap(), SortKey::ChurnProbability);
    assert_eq!("tenure".parse::<SortKey>().unwrap(), SortKey::Tenure);
    assert_eq!("monthlyCharges".parse::<SortKey>().unwrap(), SortKey::MonthlyCharges);
    assert_eq!("total_charges".parse::<SortKey>().unwrap(), SortKey::TotalCharges);
}

#[test]
fn sort_key_labels_mark_the_active_header() {
    let mut view = ViewState::default();
    assert_eq!(SortKey::ChurnProbability.label(), "Churn Risk");
    assert_eq!(view.header("Churn Risk"), "Churn Risk ▼");
    assert_eq!(view.header("Tenure"), "Tenure");

    view.toggle_sort(SortKey::Tenure);
    view.toggle_sort(SortKey::Tenure);
    assert_eq!(view.header("Tenure"), "Tenure ▲");
    assert_eq!(view.header("Churn Risk"), "Churn Risk");
}

#[test]
fn unknown_sort_key_is_invalid_argument() {
    let err = "age".parse::<SortKey>().unwrap_err();
    assert!(matches!(err, DashError::InvalidArgument { what: "sort key", .. }));

    let err = "sideways".parse::<SortOrder>().unwrap_err();
    assert!(matches!(err, DashError::InvalidArgument { what: "sort order", .. }));
}

// ── ViewState ────────────────────────────────────────────────────────────────

#[test]
fn default_view_sorts_by_churn_risk_descending() {
    let view = ViewState::default();
    assert_eq!(view.sort_key, SortKey::ChurnProbability);
    assert_eq!(view.sort_order, SortOrder::Descending);
    assert!(!view.has_filters());
}

#[test]
fn toggle_sort_flips_same_key_and_resets_new_key() {
    let mut view = ViewState::default();

    view.toggle_sort(SortKey::ChurnProbability);
    assert_eq!(view.sort_order, SortOrder::Ascending);
    view.toggle_sort(SortKey::ChurnProbability);
    assert_eq!(view.sort_order, SortOrder::Descending);

    view.toggle_sort(SortKey::Tenure);
    view.toggle_sort(SortKey::Tenure);
    assert_eq!(view.sort_order, SortOrder::Ascending);

    view.toggle_sort(SortKey::MonthlyCharges);
    assert_eq!(view.sort_key, SortKey::MonthlyCharges);
    assert_eq!(view.sort_order, SortOrder::Descending);
}

#[test]
fn risk_level_filter_uses_classification_bands() {
    let data = DashboardData::sample();
    let thresholds = RiskThresholds::default();
    let as_of = date(2024, 1, 12);

    let view = ViewState { risk_level: Some(RiskTier::High), ..Default::default() };
    assert_eq!(names(&view.apply(&data.customers, as_of, &thresholds)), vec!["Sarah Johnson"]);

    let view = ViewState { risk_level: Some(RiskTier::Low), ..Default::default() };
    assert_eq!(
        names(&view.apply(&data.customers, as_of, &thresholds)),
        vec!["Mike Chen", "John Smith", "Alex Wilson"]
    );
}

#[test]
fn segment_filter_is_exact_and_case_insensitive() {
    let data = DashboardData::sample();
    let view = ViewState { segment: Some("medium risk".into()), ..Default::default() };
    let out = view.apply(&data.customers, date(2024, 1, 12), &RiskThresholds::default());
    assert_eq!(names(&out), vec!["Emily Davis", "Mike Chen"]);
}

#[test]
fn date_range_is_relative_to_as_of() {
    let data = DashboardData::sample();
    let thresholds = RiskThresholds::default();
    let as_of = date(2024, 1, 20);

    let view = ViewState { date_range: DateRange::Last30Days, ..Default::default() };
    let out = view.apply(&data.customers, as_of, &thresholds);
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|r| r.name != "Sarah Johnson"));

    let view = ViewState { date_range: DateRange::Last90Days, ..Default::default() };
    assert_eq!(view.apply(&data.customers, as_of, &thresholds).len(), 5);
}

#[test]
fn date_range_window_is_inclusive() {
    let as_of = date(2024, 3, 31);
    assert!(DateRange::Last30Days.contains(date(2024, 3, 1), as_of));
    assert!(!DateRange::Last30Days.contains(date(2024, 2, 29), as_of));
    assert!(!DateRange::Last30Days.contains(date(2024, 4, 1), as_of));
    assert!(DateRange::AllTime.contains(date(1999, 1, 1), as_of));
}

#[test]
fn filters_combine_with_and() {
    let data = DashboardData::sample();
    let view = ViewState {
        query: "risk".into(),
        risk_level: Some(RiskTier::Medium),
        sort_key: SortKey::Tenure,
        ..Default::default()
    };
    let out = view.apply(&data.customers, date(2024, 1, 12), &RiskThresholds::default());
    assert_eq!(names(&out), vec!["Emily Davis"]);
}

#[test]
fn contract_filter_skips_records_without_a_plan() {
    let plan = |contract| ServicePlan {
        contract_type:    contract,
        payment_method:   "Credit card".into(),
        internet_service: "DSL".into(),
    };
    let records = vec![
        CustomerRecord { plan: Some(plan(ContractType::MonthToMonth)), ..customer(1, "Monthly", "Low Risk", 0.2, 3) },
        CustomerRecord { plan: Some(plan(ContractType::TwoYear)), ..customer(2, "Two Year", "Low Risk", 0.1, 30) },
        customer(3, "No Plan", "Low Risk", 0.3, 10),
    ];

    let view = ViewState { contract: Some(ContractType::MonthToMonth), ..Default::default() };
    let out = view.apply(&records, date(2024, 1, 1), &RiskThresholds::default());
    assert_eq!(names(&out), vec!["Monthly"]);
    assert!(view.has_filters());

    let all = ViewState::default().apply(&records, date(2024, 1, 1), &RiskThresholds::default());
    assert_eq!(all.len(), 3);
}
