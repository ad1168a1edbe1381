//! Aggregate and reference records served by the data provider.

use crate::{
    customer::CustomerRecord,
    error::{DashError, DashResult},
    risk::{RiskThresholds, RiskTier},
    types::{Percent, Ratio},
};
use serde::{Deserialize, Serialize};

/// Rate tolerance for the advisory churn + retention ≈ 100 check.
pub const RATE_SUM_TOLERANCE: Percent = 0.5;

/// A customer above this probability counts as churned in derived metrics.
pub const CHURN_CUTOFF: Ratio = 0.5;

/// Months of High-tier charges counted as revenue at risk.
pub const REVENUE_AT_RISK_MONTHS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnMetrics {
    pub total_customers:   u64,
    pub churned_customers: u64,
    pub churn_rate:        Percent,
    pub retention_rate:    Percent,
    /// Months.
    pub average_lifetime:  f64,
    pub revenue_at_risk:   f64,
}

impl ChurnMetrics {
    /// Headline metrics recomputed from a customer list, for data sets
    /// that carry no precomputed metrics of their own.
    pub fn from_customers(customers: &[CustomerRecord], thresholds: &RiskThresholds) -> Self {
        let total = customers.len();
        let churned = customers
            .iter()
            .filter(|c| c.churn_probability > CHURN_CUTOFF)
            .count();
        let tenure_months: f64 = customers.iter().map(|c| f64::from(c.tenure)).sum();
        let high_risk_monthly: f64 = customers
            .iter()
            .filter(|c| c.risk_tier(thresholds) == RiskTier::High)
            .map(|c| c.monthly_charges)
            .sum();

        let churn_rate = if total == 0 { 0.0 } else { churned as f64 / total as f64 * 100.0 };
        Self {
            total_customers:   total as u64,
            churned_customers: churned as u64,
            churn_rate,
            retention_rate:    100.0 - churn_rate,
            average_lifetime:  if total == 0 { 0.0 } else { tenure_months / total as f64 },
            revenue_at_risk:   high_risk_monthly * REVENUE_AT_RISK_MONTHS,
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.churned_customers > self.total_customers {
            return Err(DashError::invalid(
                "churned count",
                format!("{} > total {}", self.churned_customers, self.total_customers),
            ));
        }
        if !self.rates_consistent() {
            log::warn!(
                "churn metrics: churn_rate={} + retention_rate={} is not ~100",
                self.churn_rate, self.retention_rate,
            );
        }
        Ok(())
    }

    /// Churn + retention within tolerance of 100. Advisory only.
    pub fn rates_consistent(&self) -> bool {
        (self.churn_rate + self.retention_rate - 100.0).abs() <= RATE_SUM_TOLERANCE
    }

    /// Churn rate recomputed from the counts.
    pub fn derived_churn_rate(&self) -> Percent {
        if self.total_customers == 0 {
            return 0.0;
        }
        self.churned_customers as f64 / self.total_customers as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub model:     String,
    pub accuracy:  Ratio,
    pub precision: Ratio,
    pub recall:    Ratio,
    pub f1_score:  Ratio,
}

impl ModelPerformance {
    pub fn validate(&self) -> DashResult<()> {
        for (what, v) in [
            ("accuracy", self.accuracy),
            ("precision", self.precision),
            ("recall", self.recall),
            ("f1 score", self.f1_score),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(DashError::invalid(what, format!("{} = {v}", self.model)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    pub segment:     String,
    pub count:       u64,
    pub avg_revenue: f64,
    pub churn_rate:  Percent,
    pub color:       String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month:        String,
    pub sales:        f64,
    pub transactions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlySales {
    pub quarter:    String,
    pub sales:      f64,
    pub churn_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesData {
    pub monthly:   Vec<MonthlySales>,
    pub quarterly: Vec<QuarterlySales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature:     String,
    pub importance:  Ratio,
    pub description: String,
}
