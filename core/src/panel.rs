//! Panel trait and report types.
//!
//! RULE: Every dashboard tab implements Panel.
//! A panel reads the shared context and returns a report; it never
//! mutates data or view state.

use crate::{
    aggregate::MetricCard,
    chart::ChartSeries,
    config::DashboardConfig,
    customer::CustomerRecord,
    error::{DashError, DashResult},
    provider::DashboardData,
    view::ViewState,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Overview,
    Churn,
    Sales,
    Customers,
    Models,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Overview, Tab::Churn, Tab::Sales, Tab::Customers, Tab::Models];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview  => "Overview",
            Self::Churn     => "Churn Prediction",
            Self::Sales     => "Sales Analysis",
            Self::Customers => "Customer Insights",
            Self::Models    => "ML Models",
        }
    }
}

impl FromStr for Tab {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        match s {
            "overview"  => Ok(Self::Overview),
            "churn"     => Ok(Self::Churn),
            "sales"     => Ok(Self::Sales),
            "customers" => Ok(Self::Customers),
            "models"    => Ok(Self::Models),
            _ => Err(DashError::invalid("tab", s)),
        }
    }
}

/// Everything a panel may read while rendering.
pub struct PanelContext<'a> {
    pub data:    &'a DashboardData,
    pub config:  &'a DashboardConfig,
    pub view:    &'a ViewState,
    pub as_of:   NaiveDate,
    /// Customers after the view's filters and sort.
    pub visible: &'a [&'a CustomerRecord],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub columns: Vec<String>,
    pub rows:    Vec<Vec<String>>,
}

impl Section {
    pub fn new(heading: &str, columns: &[&str]) -> Self {
        Self {
            heading: heading.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows:    Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    pub tab:      Tab,
    pub title:    String,
    pub cards:    Vec<MetricCard>,
    pub charts:   Vec<ChartSeries>,
    pub sections: Vec<Section>,
}

impl PanelReport {
    pub fn new(tab: Tab, title: &str) -> Self {
        Self {
            tab,
            title: title.into(),
            cards: Vec::new(),
            charts: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn card(&self, title: &str) -> Option<&MetricCard> {
        self.cards.iter().find(|c| c.title == title)
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

/// The contract every dashboard tab fulfils.
pub trait Panel: Send {
    fn tab(&self) -> Tab;

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport>;
}
