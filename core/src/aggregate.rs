//! Aggregates over the provider collections and metric cards built from them.

use crate::{
    customer::{ContractType, CustomerRecord},
    error::{DashError, DashResult},
    format::{
        format_count, format_currency_thousands, format_currency_whole, format_percent,
        format_probability,
    },
    records::{ChurnMetrics, FeatureImportance, ModelPerformance, SalesData},
    risk::{RiskThresholds, RiskTier},
    types::{cmp_values, Percent, Ratio},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ── Metric cards ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title:  String,
    pub value:  String,
    pub change: Option<String>,
    pub trend:  Option<Trend>,
}

impl MetricCard {
    pub fn new(title: &str, value: String) -> Self {
        Self { title: title.into(), value, change: None, trend: None }
    }

    pub fn with_change(mut self, change: String, trend: Trend) -> Self {
        self.change = Some(change);
        self.trend = Some(trend);
        self
    }
}

/// Headline cards for the aggregate churn metrics.
pub fn churn_metric_cards(metrics: &ChurnMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Total Customers", format_count(metrics.total_customers)),
        MetricCard::new("Churned Customers", format_count(metrics.churned_customers)),
        MetricCard::new("Churn Rate", format_percent(metrics.churn_rate)),
        MetricCard::new("Retention Rate", format_percent(metrics.retention_rate)),
        MetricCard::new("Avg Lifetime", format!("{:.1} months", metrics.average_lifetime)),
        MetricCard::new("Revenue at Risk", format_currency_thousands(metrics.revenue_at_risk)),
    ]
}

// ── Customer summary ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub total_customers:       usize,
    pub avg_churn_probability: Ratio,
    pub monthly_revenue:       f64,
    pub high_risk_count:       usize,
    /// Monthly charges of High-tier customers.
    pub revenue_at_risk:       f64,
}

impl CustomerSummary {
    pub fn from_records<'a, I>(records: I, thresholds: &RiskThresholds) -> Self
    where
        I: IntoIterator<Item = &'a CustomerRecord>,
    {
        let mut total = 0usize;
        let mut prob_sum = 0.0;
        let mut monthly_revenue = 0.0;
        let mut high_risk_count = 0usize;
        let mut revenue_at_risk = 0.0;

        for r in records {
            total += 1;
            prob_sum += r.churn_probability;
            monthly_revenue += r.monthly_charges;
            if r.risk_tier(thresholds) == RiskTier::High {
                high_risk_count += 1;
                revenue_at_risk += r.monthly_charges;
            }
        }

        Self {
            total_customers: total,
            avg_churn_probability: mean(prob_sum, total),
            monthly_revenue,
            high_risk_count,
            revenue_at_risk,
        }
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        vec![
            MetricCard::new("Customers", format_count(self.total_customers as u64)),
            MetricCard::new("Avg Churn Risk", format_probability(self.avg_churn_probability)),
            MetricCard::new("Monthly Revenue", format_currency_whole(self.monthly_revenue)),
            MetricCard::new("High Risk Customers", format_count(self.high_risk_count as u64)),
        ]
    }
}

// ── Segment breakdown ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub segment:               String,
    pub count:                 usize,
    pub avg_monthly_charges:   f64,
    pub avg_churn_probability: Ratio,
    pub avg_tenure:            f64,
    pub avg_age:               f64,
}

/// Group customers by segment label, in first-seen order.
pub fn segment_breakdown<'a, I>(records: I) -> Vec<SegmentStats>
where
    I: IntoIterator<Item = &'a CustomerRecord>,
{
    struct Acc {
        segment: String,
        count:   usize,
        monthly: f64,
        prob:    f64,
        tenure:  f64,
        age:     f64,
    }

    let mut groups: Vec<Acc> = Vec::new();
    for r in records {
        let idx = match groups.iter().position(|g| g.segment == r.segment) {
            Some(i) => i,
            None => {
                groups.push(Acc {
                    segment: r.segment.clone(),
                    count: 0,
                    monthly: 0.0,
                    prob: 0.0,
                    tenure: 0.0,
                    age: 0.0,
                });
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        g.count += 1;
        g.monthly += r.monthly_charges;
        g.prob += r.churn_probability;
        g.tenure += r.tenure as f64;
        g.age += r.age as f64;
    }

    groups
        .into_iter()
        .map(|g| SegmentStats {
            avg_monthly_charges:   mean(g.monthly, g.count),
            avg_churn_probability: mean(g.prob, g.count),
            avg_tenure:            mean(g.tenure, g.count),
            avg_age:               mean(g.age, g.count),
            count:                 g.count,
            segment:               g.segment,
        })
        .collect()
}

/// Per contract type: customer count and average churn risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractStats {
    pub contract:              ContractType,
    pub count:                 usize,
    pub avg_churn_probability: Ratio,
}

/// Customers per contract type in `ContractType::ALL` order. Records
/// without a service plan are skipped, as are empty contract types.
pub fn contract_breakdown<'a, I>(records: I) -> Vec<ContractStats>
where
    I: IntoIterator<Item = &'a CustomerRecord>,
{
    let mut acc = [(0usize, 0.0f64); 3];
    for r in records {
        if let Some(contract) = r.contract_type() {
            let slot = &mut acc[contract as usize];
            slot.0 += 1;
            slot.1 += r.churn_probability;
        }
    }

    ContractType::ALL
        .iter()
        .zip(acc)
        .filter(|(_, (count, _))| *count > 0)
        .map(|(&contract, (count, prob))| ContractStats {
            contract,
            count,
            avg_churn_probability: mean(prob, count),
        })
        .collect()
}

// ── Sales ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub month:  String,
    /// `None` for the first month or when the prior month had zero sales.
    pub growth: Option<Percent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_sales:        f64,
    pub avg_monthly_sales:  f64,
    pub total_transactions: u64,
    pub growth:             Vec<GrowthPoint>,
}

impl SalesSummary {
    pub fn from_sales(sales: &SalesData) -> Self {
        let total_sales: f64 = sales.monthly.iter().map(|m| m.sales).sum();
        let total_transactions = sales.monthly.iter().map(|m| m.transactions).sum();

        let growth = sales
            .monthly
            .iter()
            .enumerate()
            .map(|(i, m)| GrowthPoint {
                month: m.month.clone(),
                growth: i
                    .checked_sub(1)
                    .map(|p| sales.monthly[p].sales)
                    .filter(|prev| *prev != 0.0)
                    .map(|prev| (m.sales - prev) / prev * 100.0),
            })
            .collect();

        Self {
            total_sales,
            avg_monthly_sales: mean(total_sales, sales.monthly.len()),
            total_transactions,
            growth,
        }
    }
}

// ── Models ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelMetric {
    Accuracy,
    Precision,
    Recall,
    #[default]
    F1Score,
}

impl ModelMetric {
    pub const ALL: [ModelMetric; 4] =
        [Self::Accuracy, Self::Precision, Self::Recall, Self::F1Score];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Accuracy  => "Accuracy",
            Self::Precision => "Precision",
            Self::Recall    => "Recall",
            Self::F1Score   => "F1-Score",
        }
    }

    pub fn value(&self, m: &ModelPerformance) -> Ratio {
        match self {
            Self::Accuracy  => m.accuracy,
            Self::Precision => m.precision,
            Self::Recall    => m.recall,
            Self::F1Score   => m.f1_score,
        }
    }
}

impl FromStr for ModelMetric {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "accuracy"                    => Ok(Self::Accuracy),
            "precision"                   => Ok(Self::Precision),
            "recall"                      => Ok(Self::Recall),
            "f1" | "f1_score" | "f1-score" => Ok(Self::F1Score),
            _ => Err(DashError::invalid("model metric", s)),
        }
    }
}

/// Highest-scoring model on `metric`. The earliest model wins a tie.
pub fn best_model(models: &[ModelPerformance], metric: ModelMetric) -> Option<&ModelPerformance> {
    models.iter().fold(None, |best: Option<&ModelPerformance>, m| match best {
        Some(b) if metric.value(b) >= metric.value(m) => Some(b),
        _ => Some(m),
    })
}

// ── Features ─────────────────────────────────────────────────────────────────

/// Features ordered by importance, highest first; ties keep input order.
pub fn ranked_features(features: &[FeatureImportance]) -> Vec<&FeatureImportance> {
    let mut out: Vec<&FeatureImportance> = features.iter().collect();
    out.sort_by(|a, b| cmp_values(b.importance, a.importance));
    out
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// `value / total * 100`, or 0 when the total is zero.
pub fn share_of_total(value: f64, total: f64) -> Percent {
    if total == 0.0 { 0.0 } else { value / total * 100.0 }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}
