//! Chart series composition. Labels plus one or more numeric datasets;
//! rendering and theming belong to whoever consumes the series.

use crate::{
    aggregate::{share_of_total, ModelMetric},
    provider::DashboardData,
    records::{ModelPerformance, SegmentRecord},
    risk::RiskDistribution,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label:  String,
    pub values: Vec<f64>,
    /// Per-point colour tokens, when the source carries them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

impl Dataset {
    fn new(label: &str, values: Vec<f64>) -> Self {
        Self { label: label.into(), values, colors: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title:    String,
    pub labels:   Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// `(label, share %)` for each point of the first dataset.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let Some(ds) = self.datasets.first() else {
            return Vec::new();
        };
        let total: f64 = ds.values.iter().sum();
        self.labels
            .iter()
            .zip(&ds.values)
            .map(|(l, v)| (l.clone(), share_of_total(*v, total)))
            .collect()
    }
}

pub fn monthly_sales_chart(data: &DashboardData) -> ChartSeries {
    let monthly = &data.sales.monthly;
    ChartSeries {
        title:    "Monthly Sales Performance".into(),
        labels:   monthly.iter().map(|m| m.month.clone()).collect(),
        datasets: vec![
            Dataset::new("Sales Revenue ($)", monthly.iter().map(|m| m.sales).collect()),
            Dataset::new(
                "Transactions",
                monthly.iter().map(|m| m.transactions as f64).collect(),
            ),
        ],
    }
}

/// Quarterly revenue in $M against the quarter's churn rate.
pub fn quarterly_revenue_vs_churn_chart(data: &DashboardData) -> ChartSeries {
    let quarterly = &data.sales.quarterly;
    ChartSeries {
        title:    "Revenue vs Churn Rate Trends".into(),
        labels:   quarterly.iter().map(|q| q.quarter.clone()).collect(),
        datasets: vec![
            Dataset::new(
                "Revenue ($M)",
                quarterly.iter().map(|q| q.sales / 1_000_000.0).collect(),
            ),
            Dataset::new("Churn Rate (%)", quarterly.iter().map(|q| q.churn_rate).collect()),
        ],
    }
}

pub fn segment_chart(segments: &[SegmentRecord]) -> ChartSeries {
    let mut counts = Dataset::new("Customers", segments.iter().map(|s| s.count as f64).collect());
    counts.colors = segments.iter().map(|s| s.color.clone()).collect();
    ChartSeries {
        title:    "Customer Segmentation".into(),
        labels:   segments.iter().map(|s| s.segment.clone()).collect(),
        datasets: vec![counts],
    }
}

pub fn risk_distribution_chart(dist: &RiskDistribution) -> ChartSeries {
    let mut counts = Dataset::new(
        "Customers",
        dist.tiers.iter().map(|t| t.count as f64).collect(),
    );
    counts.colors = dist.tiers.iter().map(|t| t.tier.color().to_string()).collect();
    ChartSeries {
        title:    "Customer Risk Distribution".into(),
        labels:   dist.tiers.iter().map(|t| t.tier.label().to_string()).collect(),
        datasets: vec![counts],
    }
}

/// One dataset per metric, one point per model.
pub fn model_comparison_chart(models: &[ModelPerformance]) -> ChartSeries {
    ChartSeries {
        title:    "ML Model Performance Comparison".into(),
        labels:   models.iter().map(|m| m.model.clone()).collect(),
        datasets: ModelMetric::ALL
            .iter()
            .map(|metric| {
                Dataset::new(metric.label(), models.iter().map(|m| metric.value(m)).collect())
            })
            .collect(),
    }
}
