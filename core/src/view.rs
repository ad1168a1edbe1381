//! Filter/sort view over the customer table.
//!
//! Pure functions of (records, view state). All active filters are
//! AND-combined, then a stable sort on the chosen key is applied, so
//! records with equal keys keep their input order in both directions.

use crate::{
    customer::{ContractType, CustomerRecord},
    error::{DashError, DashResult},
    format::{format_currency, format_months, format_probability, format_probability_whole},
    risk::{RiskThresholds, RiskTier},
    types::{cmp_values, CustomerId},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

// ── Sort ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    #[serde(alias = "churnProbability")]
    ChurnProbability,
    Tenure,
    #[serde(alias = "monthlyCharges")]
    MonthlyCharges,
    #[serde(alias = "totalCharges")]
    TotalCharges,
}

impl SortKey {
    fn compare(&self, a: &CustomerRecord, b: &CustomerRecord) -> Ordering {
        match self {
            Self::ChurnProbability => cmp_values(a.churn_probability, b.churn_probability),
            Self::Tenure           => a.tenure.cmp(&b.tenure),
            Self::MonthlyCharges   => cmp_values(a.monthly_charges, b.monthly_charges),
            Self::TotalCharges     => cmp_values(a.total_charges, b.total_charges),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ChurnProbability => "Churn Risk",
            Self::Tenure           => "Tenure",
            Self::MonthlyCharges   => "Monthly Charges",
            Self::TotalCharges     => "Total Charges",
        }
    }
}

impl FromStr for SortKey {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s {
            "churnProbability" | "churn_probability" => Ok(Self::ChurnProbability),
            "tenure"                                 => Ok(Self::Tenure),
            "monthlyCharges" | "monthly_charges"     => Ok(Self::MonthlyCharges),
            "totalCharges" | "total_charges"         => Ok(Self::TotalCharges),
            _ => Err(DashError::invalid("sort key", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending  => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker for the sorted column.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending  => "▲",
            Self::Descending => "▼",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s {
            "asc" | "ascending"   => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(DashError::invalid("sort order", s)),
        }
    }
}

// ── Date range ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl DateRange {
    fn window_days(&self) -> Option<i64> {
        match self {
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::LastYear   => Some(365),
            Self::AllTime    => None,
        }
    }

    /// Inclusive window `[as_of - days, as_of]`.
    pub fn contains(&self, date: NaiveDate, as_of: NaiveDate) -> bool {
        match self.window_days() {
            None => true,
            Some(days) => date <= as_of && date >= as_of - Duration::days(days),
        }
    }
}

impl FromStr for DateRange {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s {
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            "1y"  => Ok(Self::LastYear),
            "all" => Ok(Self::AllTime),
            _ => Err(DashError::invalid("date range", s)),
        }
    }
}

// ── Projection ───────────────────────────────────────────────────────────────

/// Filter by case-insensitive substring on name or segment, then stable-sort.
pub fn project<'a>(
    records: &'a [CustomerRecord],
    query: &str,
    sort_key: SortKey,
    order: SortOrder,
) -> Vec<&'a CustomerRecord> {
    let needle = query.to_lowercase();
    let mut out: Vec<&CustomerRecord> =
        records.iter().filter(|r| r.matches_query(&needle)).collect();
    sort_records(&mut out, sort_key, order);
    out
}

fn sort_records(records: &mut [&CustomerRecord], key: SortKey, order: SortOrder) {
    // slice::sort_by is stable; reversing the comparator keeps ties in input order.
    match order {
        SortOrder::Ascending  => records.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Descending => records.sort_by(|a, b| key.compare(b, a)),
    }
}

/// Transient table state owned by the view layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub query:      String,
    pub sort_key:   SortKey,
    pub sort_order: SortOrder,
    /// `None` = all levels.
    pub risk_level: Option<RiskTier>,
    /// `None` = all contracts. Records without a service plan never match a contract.
    pub contract:   Option<ContractType>,
    /// `None` = all segments.
    pub segment:    Option<String>,
    pub date_range: DateRange,
    pub selected:   Option<CustomerId>,
}

impl ViewState {
    /// Column-header click: same key flips the order, a new key sorts descending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Descending;
        }
    }

    /// Column header for `column`, marked when it is the active sort key.
    pub fn header(&self, column: &str) -> String {
        if column == self.sort_key.label() {
            format!("{column} {}", self.sort_order.arrow())
        } else {
            column.to_string()
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.query.is_empty()
            || self.risk_level.is_some()
            || self.contract.is_some()
            || self.segment.is_some()
            || self.date_range != DateRange::AllTime
    }

    /// Apply every active filter and the sort. `as_of` anchors the date range.
    pub fn apply<'a>(
        &self,
        records: &'a [CustomerRecord],
        as_of: NaiveDate,
        thresholds: &RiskThresholds,
    ) -> Vec<&'a CustomerRecord> {
        let needle = self.query.to_lowercase();
        let mut out: Vec<&CustomerRecord> = records
            .iter()
            .filter(|r| r.matches_query(&needle))
            .filter(|r| self.risk_level.map_or(true, |t| r.risk_tier(thresholds) == t))
            .filter(|r| self.contract.map_or(true, |c| r.contract_type() == Some(c)))
            .filter(|r| {
                self.segment
                    .as_deref()
                    .map_or(true, |s| r.segment.eq_ignore_ascii_case(s))
            })
            .filter(|r| self.date_range.contains(r.last_activity, as_of))
            .collect();
        sort_records(&mut out, self.sort_key, self.sort_order);

        log::debug!(
            "view: {} of {} records after filters (sort={:?} {:?})",
            out.len(),
            records.len(),
            self.sort_key,
            self.sort_order,
        );
        out
    }
}

// ── Display rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id:              CustomerId,
    pub name:            String,
    pub age:             u32,
    pub churn_risk:      String,
    pub tier:            RiskTier,
    pub tier_color:      &'static str,
    pub tenure:          String,
    pub monthly_charges: String,
    pub total_charges:   String,
    pub segment:         String,
    pub last_activity:   String,
}

impl TableRow {
    pub fn new(record: &CustomerRecord, thresholds: &RiskThresholds) -> Self {
        let tier = record.risk_tier(thresholds);
        Self {
            id:              record.id,
            name:            record.name.clone(),
            age:             record.age,
            churn_risk:      format_probability(record.churn_probability),
            tier,
            tier_color:      tier.color(),
            tenure:          format_months(record.tenure),
            monthly_charges: format_currency(record.monthly_charges),
            total_charges:   format_currency(record.total_charges),
            segment:         record.segment.clone(),
            last_activity:   record.last_activity.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentCustomer {
    pub id:     CustomerId,
    pub name:   String,
    pub tenure: String,
    pub badge:  String,
    pub tier:   RiskTier,
}

/// Sidebar list: the first `limit` customers in provider order.
pub fn recent_customers(
    records: &[CustomerRecord],
    limit: usize,
    thresholds: &RiskThresholds,
) -> Vec<RecentCustomer> {
    records
        .iter()
        .take(limit)
        .map(|r| RecentCustomer {
            id:     r.id,
            name:   r.name.clone(),
            tenure: format!("{}m", r.tenure),
            badge:  format_probability_whole(r.churn_probability),
            tier:   r.risk_tier(thresholds),
        })
        .collect()
}
