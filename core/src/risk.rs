//! Risk classification from churn probability to risk tier.
//!
//! RULE: Every surface that needs a tier, a tier label or a tier colour
//! goes through this module. Bands are inclusive on their lower bound:
//!   p < medium           → Low
//!   medium ≤ p < high    → Medium
//!   p ≥ high             → High

use crate::{
    customer::CustomerRecord,
    error::{DashError, DashResult},
    types::{Percent, Ratio},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MEDIUM_RISK_THRESHOLD: Ratio = 0.3;
pub const HIGH_RISK_THRESHOLD: Ratio = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low    => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High   => "High Risk",
        }
    }

    /// Display colour token for badges and chart slices.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low    => "#10B981",
            Self::Medium => "#F59E0B",
            Self::High   => "#EF4444",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskTier {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "low risk" | "low_risk" | "low-risk"             => Ok(Self::Low),
            "medium" | "medium risk" | "medium_risk" | "medium-risk" => Ok(Self::Medium),
            "high" | "high risk" | "high_risk" | "high-risk"         => Ok(Self::High),
            _ => Err(DashError::invalid("risk level", s)),
        }
    }
}

/// What to do with a probability outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    #[default]
    Reject,
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium: Ratio,
    pub high:   Ratio,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { medium: MEDIUM_RISK_THRESHOLD, high: HIGH_RISK_THRESHOLD }
    }
}

impl RiskThresholds {
    pub fn validate(&self) -> DashResult<()> {
        let ordered = 0.0 <= self.medium && self.medium <= self.high && self.high <= 1.0;
        if !ordered {
            return Err(DashError::invalid(
                "risk thresholds",
                format!("medium={} high={}", self.medium, self.high),
            ));
        }
        Ok(())
    }

    /// Band lookup for a probability already known to be in range.
    pub fn tier(&self, probability: Ratio) -> RiskTier {
        if probability < self.medium {
            RiskTier::Low
        } else if probability < self.high {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    /// Validate or clamp `probability` per `policy`, then classify.
    pub fn classify_with(&self, probability: Ratio, policy: ProbabilityPolicy) -> DashResult<RiskTier> {
        if probability.is_nan() {
            return Err(DashError::OutOfRange { value: probability });
        }
        let p = match policy {
            ProbabilityPolicy::Clamp => probability.clamp(0.0, 1.0),
            ProbabilityPolicy::Reject => check_probability(probability)?,
        };
        Ok(self.tier(p))
    }
}

/// Classify with the default bands, rejecting out-of-range input.
pub fn classify(probability: Ratio) -> DashResult<RiskTier> {
    RiskThresholds::default().classify_with(probability, ProbabilityPolicy::Reject)
}

pub fn check_probability(probability: Ratio) -> DashResult<Ratio> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(DashError::OutOfRange { value: probability })
    }
}

// ── Distribution ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier:  RiskTier,
    pub count: usize,
    pub share: Percent,
}

/// Customer counts per tier, always listed Low, Medium, High.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDistribution {
    pub total: usize,
    pub tiers: Vec<TierCount>,
}

impl RiskDistribution {
    pub fn from_records<'a, I>(records: I, thresholds: &RiskThresholds) -> Self
    where
        I: IntoIterator<Item = &'a CustomerRecord>,
    {
        let mut counts = [0usize; 3];
        for record in records {
            counts[thresholds.tier(record.churn_probability) as usize] += 1;
        }
        let total: usize = counts.iter().sum();

        let tiers = RiskTier::ALL
            .iter()
            .map(|&tier| {
                let count = counts[tier as usize];
                TierCount { tier, count, share: share_of(count as f64, total as f64) }
            })
            .collect();

        Self { total, tiers }
    }

    pub fn count(&self, tier: RiskTier) -> usize {
        self.tiers.iter().find(|t| t.tier == tier).map(|t| t.count).unwrap_or(0)
    }
}

fn share_of(part: f64, total: f64) -> Percent {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_thresholds_keep_lower_bound_inclusive() {
        let t = RiskThresholds { medium: 0.25, high: 0.5 };
        assert_eq!(t.tier(0.249), RiskTier::Low);
        assert_eq!(t.tier(0.25), RiskTier::Medium);
        assert_eq!(t.tier(0.5), RiskTier::High);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let t = RiskThresholds { medium: 0.7, high: 0.4 };
        assert!(t.validate().is_err());
        assert!(RiskThresholds::default().validate().is_ok());
    }

    #[test]
    fn tier_parses_from_filter_values() {
        assert_eq!("high".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert_eq!("Medium Risk".parse::<RiskTier>().unwrap(), RiskTier::Medium);
        assert!("extreme".parse::<RiskTier>().is_err());
    }
}
