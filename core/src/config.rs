use crate::{
    error::{DashError, DashResult},
    risk::{ProbabilityPolicy, RiskThresholds},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "dashboard.json";
pub const RECENT_CUSTOMERS_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub risk_thresholds:        RiskThresholds,
    pub probability_policy:     ProbabilityPolicy,
    /// Reference date for date-range filters. `None` = latest activity in the data.
    pub as_of:                  Option<NaiveDate>,
    pub recent_customers_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            risk_thresholds:        RiskThresholds::default(),
            probability_policy:     ProbabilityPolicy::Reject,
            as_of:                  None,
            recent_customers_limit: RECENT_CUSTOMERS_LIMIT,
        }
    }
}

impl DashboardConfig {
    /// Load `dashboard.json` from the data directory.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        if !Path::new(&path).exists() {
            log::debug!("config: {path} not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|source| DashError::Io { path: path.clone(), source })?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.risk_thresholds.validate()?;
        log::info!("config: loaded {path}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: DashboardConfig =
            serde_json::from_str(r#"{ "probability_policy": "clamp" }"#).unwrap();
        assert_eq!(cfg.probability_policy, ProbabilityPolicy::Clamp);
        assert_eq!(cfg.risk_thresholds, RiskThresholds::default());
        assert_eq!(cfg.recent_customers_limit, RECENT_CUSTOMERS_LIMIT);
        assert!(cfg.as_of.is_none());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let cfg = DashboardConfig::load("/nonexistent/churnboard-data").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }
}
