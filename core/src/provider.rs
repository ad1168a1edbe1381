//! Data provider: the fixed collections the dashboard renders.
//!
//! `DashboardData::sample()` is the built-in dataset and cannot fail.
//! `DashboardData::load()` reads the same shape from JSON files under a
//! data directory and validates every record before handing it out.

use crate::{
    customer::CustomerRecord,
    error::{DashError, DashResult},
    records::{
        ChurnMetrics, FeatureImportance, ModelPerformance, MonthlySales, QuarterlySales,
        SalesData, SegmentRecord,
    },
    risk::ProbabilityPolicy,
};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub customers:          Vec<CustomerRecord>,
    pub sales:              SalesData,
    pub churn_metrics:      ChurnMetrics,
    pub model_performance:  Vec<ModelPerformance>,
    pub segments:           Vec<SegmentRecord>,
    pub feature_importance: Vec<FeatureImportance>,
}

impl DashboardData {
    /// Load and validate all collections from `data_dir`.
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let data = Self::read(data_dir)?;
        data.validate()?;
        Ok(data)
    }

    /// Parse all collections from `data_dir` without validating them.
    pub fn read(data_dir: &str) -> DashResult<Self> {
        let data = Self {
            customers:          read_json(data_dir, "customers.json")?,
            sales:              read_json(data_dir, "sales.json")?,
            churn_metrics:      read_json(data_dir, "churn_metrics.json")?,
            model_performance:  read_json(data_dir, "models.json")?,
            segments:           read_json(data_dir, "segments.json")?,
            feature_importance: read_json(data_dir, "features.json")?,
        };
        log::info!(
            "provider: loaded {} customers, {} models, {} segments from {data_dir}",
            data.customers.len(),
            data.model_performance.len(),
            data.segments.len(),
        );
        Ok(data)
    }

    pub fn validate(&self) -> DashResult<()> {
        let mut ids = HashSet::new();
        for c in &self.customers {
            c.validate()?;
            if !ids.insert(c.id) {
                return Err(DashError::invalid("customer id", c.id));
            }
        }

        self.churn_metrics.validate()?;

        let mut models = HashSet::new();
        for m in &self.model_performance {
            m.validate()?;
            if !models.insert(m.model.as_str()) {
                return Err(DashError::invalid("model name", &m.model));
            }
        }
        Ok(())
    }

    /// Under `Clamp`, pull out-of-range churn probabilities into [0, 1].
    /// NaN is left alone for `validate()` to reject.
    pub fn apply_probability_policy(&mut self, policy: ProbabilityPolicy) {
        if policy != ProbabilityPolicy::Clamp {
            return;
        }
        for c in &mut self.customers {
            let p = c.churn_probability;
            if !p.is_nan() && !(0.0..=1.0).contains(&p) {
                log::warn!("provider: customer {} churn probability {p} clamped", c.id);
                c.churn_probability = p.clamp(0.0, 1.0);
            }
        }
    }

    /// Latest `last_activity` across all customers.
    pub fn latest_activity(&self) -> Option<NaiveDate> {
        self.customers.iter().map(|c| c.last_activity).max()
    }

    pub fn customer(&self, id: u32) -> DashResult<&CustomerRecord> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or(DashError::CustomerNotFound { id })
    }

    /// The built-in sample dataset.
    pub fn sample() -> Self {
        Self {
            customers: vec![
                customer(1, "John Smith",    35, 24,  85.50, 2052.0, 0.15, "Low Risk",    (2024, 1, 10)),
                customer(2, "Sarah Johnson", 42,  8, 120.75,  966.0, 0.78, "High Risk",   (2023, 12, 15)),
                customer(3, "Mike Chen",     28, 36,  95.25, 3429.0, 0.25, "Medium Risk", (2024, 1, 8)),
                customer(4, "Emily Davis",   31, 12,  65.00,  780.0, 0.45, "Medium Risk", (2024, 1, 5)),
                customer(5, "Alex Wilson",   45, 48, 110.50, 5304.0, 0.12, "Low Risk",    (2024, 1, 12)),
            ],
            sales: SalesData {
                monthly: [
                    ("Jan 2024", 125_000.0, 1250),
                    ("Feb 2024", 135_000.0, 1350),
                    ("Mar 2024", 142_000.0, 1420),
                    ("Apr 2024", 138_000.0, 1380),
                    ("May 2024", 155_000.0, 1550),
                    ("Jun 2024", 168_000.0, 1680),
                    ("Jul 2024", 175_000.0, 1750),
                    ("Aug 2024", 162_000.0, 1620),
                    ("Sep 2024", 185_000.0, 1850),
                    ("Oct 2024", 195_000.0, 1950),
                    ("Nov 2024", 202_000.0, 2020),
                    ("Dec 2024", 220_000.0, 2200),
                ]
                .into_iter()
                .map(|(month, sales, transactions)| MonthlySales {
                    month: month.into(),
                    sales,
                    transactions,
                })
                .collect(),
                quarterly: [
                    ("Q1 2024", 402_000.0, 8.5),
                    ("Q2 2024", 461_000.0, 7.2),
                    ("Q3 2024", 522_000.0, 6.8),
                    ("Q4 2024", 617_000.0, 5.9),
                ]
                .into_iter()
                .map(|(quarter, sales, churn_rate)| QuarterlySales {
                    quarter: quarter.into(),
                    sales,
                    churn_rate,
                })
                .collect(),
            },
            churn_metrics: ChurnMetrics {
                total_customers:   12_500,
                churned_customers: 875,
                churn_rate:        7.0,
                retention_rate:    93.0,
                average_lifetime:  32.5,
                revenue_at_risk:   285_000.0,
            },
            model_performance: vec![
                model("Logistic Regression", 0.82, 0.78, 0.85, 0.81),
                model("Random Forest",       0.89, 0.87, 0.91, 0.89),
                model("Gradient Boosting",   0.91, 0.89, 0.93, 0.91),
                model("Neural Network",      0.87, 0.84, 0.89, 0.86),
            ],
            segments: vec![
                segment("High Value",   2100, 1850.0,  4.2, "#10B981"),
                segment("Medium Value", 5200,  950.0,  6.8, "#3B82F6"),
                segment("Low Value",    3800,  380.0, 12.5, "#F59E0B"),
                segment("At Risk",      1400,  720.0, 35.2, "#EF4444"),
            ],
            feature_importance: vec![
                feature("Tenure",          0.35, "Customer subscription length"),
                feature("Monthly Charges", 0.28, "Average monthly billing amount"),
                feature("Total Charges",   0.22, "Lifetime customer value"),
                feature("Support Tickets", 0.18, "Number of support interactions"),
                feature("Last Activity",   0.15, "Days since last engagement"),
                feature("Payment Method",  0.12, "Preferred payment type"),
                feature("Contract Type",   0.10, "Subscription plan type"),
            ],
        }
    }
}

fn read_json<T: DeserializeOwned>(data_dir: &str, file: &str) -> DashResult<T> {
    let path = format!("{data_dir}/{file}");
    let content = std::fs::read_to_string(&path)
        .map_err(|source| DashError::Io { path: path.clone(), source })?;
    Ok(serde_json::from_str(&content)?)
}

// ── Sample builders ──────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn customer(
    id: u32,
    name: &str,
    age: u32,
    tenure: u32,
    monthly_charges: f64,
    total_charges: f64,
    churn_probability: f64,
    segment: &str,
    (y, m, d): (i32, u32, u32),
) -> CustomerRecord {
    CustomerRecord {
        id,
        name: name.into(),
        age,
        tenure,
        monthly_charges,
        total_charges,
        churn_probability,
        segment: segment.into(),
        last_activity: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        plan: None,
    }
}

fn model(name: &str, accuracy: f64, precision: f64, recall: f64, f1_score: f64) -> ModelPerformance {
    ModelPerformance { model: name.into(), accuracy, precision, recall, f1_score }
}

fn segment(name: &str, count: u64, avg_revenue: f64, churn_rate: f64, color: &str) -> SegmentRecord {
    SegmentRecord {
        segment: name.into(),
        count,
        avg_revenue,
        churn_rate,
        color: color.into(),
    }
}

fn feature(name: &str, importance: f64, description: &str) -> FeatureImportance {
    FeatureImportance {
        feature: name.into(),
        importance,
        description: description.into(),
    }
}
