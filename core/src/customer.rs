use crate::{
    error::{DashError, DashResult},
    risk::{check_probability, RiskThresholds, RiskTier},
    types::{CustomerId, Ratio},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear      => "One year",
            Self::TwoYear      => "Two year",
        }
    }
}

impl FromStr for ContractType {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month-to-month" | "month_to_month" | "monthly" => Ok(Self::MonthToMonth),
            "one year" | "one_year"                         => Ok(Self::OneYear),
            "two year" | "two_year"                         => Ok(Self::TwoYear),
            _ => Err(DashError::invalid("contract type", s)),
        }
    }
}

/// Subscription details carried by generated customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
    pub contract_type:    ContractType,
    pub payment_method:   String,
    pub internet_service: String,
}

/// One row of the customer table. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id:                CustomerId,
    pub name:              String,
    pub age:               u32,
    /// Months subscribed.
    pub tenure:            u32,
    pub monthly_charges:   f64,
    pub total_charges:     f64,
    pub churn_probability: Ratio,
    pub segment:           String,
    pub last_activity:     NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan:              Option<ServicePlan>,
}

impl CustomerRecord {
    pub fn validate(&self) -> DashResult<()> {
        check_probability(self.churn_probability)?;
        if !(self.monthly_charges >= 0.0) {
            return Err(DashError::invalid("monthly charges", self.monthly_charges));
        }
        if !(self.total_charges >= 0.0) {
            return Err(DashError::invalid("total charges", self.total_charges));
        }
        Ok(())
    }

    /// Tier under `thresholds`. Records are validated on load, so the
    /// probability is always in range here.
    pub fn risk_tier(&self, thresholds: &RiskThresholds) -> RiskTier {
        thresholds.tier(self.churn_probability)
    }

    /// Case-insensitive substring match against name or segment.
    /// `needle_lower` must already be lowercased.
    pub fn contract_type(&self) -> Option<ContractType> {
        self.plan.as_ref().map(|p| p.contract_type)
    }

    pub fn matches_query(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.segment.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, segment: &str, p: f64) -> CustomerRecord {
        CustomerRecord {
            id: 1,
            name: name.into(),
            age: 30,
            tenure: 12,
            monthly_charges: 50.0,
            total_charges: 600.0,
            churn_probability: p,
            segment: segment.into(),
            last_activity: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            plan: None,
        }
    }

    #[test]
    fn query_matches_name_or_segment() {
        let r = record("Sarah Johnson", "High Risk", 0.78);
        assert!(r.matches_query("sar"));
        assert!(r.matches_query("high"));
        assert!(!r.matches_query("mike"));
    }

    #[test]
    fn negative_charges_fail_validation() {
        let mut r = record("A", "Low Risk", 0.1);
        r.monthly_charges = -1.0;
        assert!(matches!(r.validate(), Err(DashError::InvalidArgument { .. })));
    }

    #[test]
    fn probability_above_one_fails_validation() {
        let r = record("A", "Low Risk", 1.2);
        assert!(matches!(r.validate(), Err(DashError::OutOfRange { .. })));
    }

    #[test]
    fn camel_case_json_round_trips_dates() {
        let json = r#"{"id":2,"name":"Sarah Johnson","age":42,"tenure":8,
            "monthlyCharges":120.75,"totalCharges":966,"churnProbability":0.78,
            "segment":"High Risk","lastActivity":"2023-12-15"}"#;
        let r: CustomerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.last_activity, NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
        assert_eq!(r.total_charges, 966.0);
        assert!(r.plan.is_none());
    }

    #[test]
    fn plan_reads_contract_labels() {
        let json = r#"{"id":7,"name":"Lisa Kim","age":29,"tenure":3,
            "monthlyCharges":70.0,"totalCharges":210.0,"churnProbability":0.5,
            "segment":"Medium Risk","lastActivity":"2024-01-02",
            "plan":{"contractType":"Two year","paymentMethod":"Credit card","internetService":"DSL"}}"#;
        let r: CustomerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.contract_type(), Some(ContractType::TwoYear));
        assert_eq!("month-to-month".parse::<ContractType>().unwrap(), ContractType::MonthToMonth);
        assert!("weekly".parse::<ContractType>().is_err());
    }
}
