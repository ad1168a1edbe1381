//! Dashboard session. Owns the data, config and transient view state.
//!
//! RULES:
//!   - Data is loaded once and never mutated.
//!   - Only `apply()` changes the view state, one command at a time.
//!   - `snapshot()` is a pure function of (data, config, view state, tab).

use crate::{
    command::ViewCommand,
    config::DashboardConfig,
    customer::CustomerRecord,
    error::{DashError, DashResult},
    panel::{Panel, PanelContext, PanelReport, Tab},
    panels::all_panels,
    provider::DashboardData,
    snapshot::ViewSnapshot,
    view::{recent_customers, TableRow, ViewState},
};
use chrono::NaiveDate;

pub struct DashboardSession {
    pub data:   DashboardData,
    pub config: DashboardConfig,
    pub view:   ViewState,
    pub tab:    Tab,
    panels:     Vec<Box<dyn Panel>>,
}

impl DashboardSession {
    /// Apply the probability policy, validate, then register every panel.
    pub fn new(mut data: DashboardData, config: DashboardConfig) -> DashResult<Self> {
        data.apply_probability_policy(config.probability_policy);
        data.validate()?;
        config.risk_thresholds.validate()?;
        Ok(Self {
            data,
            config,
            view: ViewState::default(),
            tab: Tab::default(),
            panels: all_panels(),
        })
    }

    /// Session over the built-in sample data with default config.
    pub fn sample() -> Self {
        Self {
            data:   DashboardData::sample(),
            config: DashboardConfig::default(),
            view:   ViewState::default(),
            tab:    Tab::default(),
            panels: all_panels(),
        }
    }

    /// Load data and config from `data_dir`.
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let data = DashboardData::read(data_dir)?;
        let config = DashboardConfig::load(data_dir)?;
        Self::new(data, config)
    }

    /// Reference date for date-range filters.
    pub fn as_of(&self) -> NaiveDate {
        self.config
            .as_of
            .or_else(|| self.data.latest_activity())
            .unwrap_or_default()
    }

    pub fn apply(&mut self, command: ViewCommand) -> DashResult<()> {
        log::debug!("session: apply {command:?}");
        match command {
            ViewCommand::SetQuery { query }      => self.view.query = query,
            ViewCommand::SortBy { key }          => self.view.toggle_sort(key),
            ViewCommand::SetOrder { order }      => self.view.sort_order = order,
            ViewCommand::SetRiskLevel { level }  => self.view.risk_level = level,
            ViewCommand::SetContractType { contract } => self.view.contract = contract,
            ViewCommand::SetSegment { segment }  => {
                self.view.segment =
                    segment.filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));
            }
            ViewCommand::SetDateRange { range }  => self.view.date_range = range,
            ViewCommand::ClearFilters => {
                let selected = self.view.selected;
                self.view = ViewState { selected, ..ViewState::default() };
            }
            ViewCommand::SelectCustomer { id } => {
                self.data.customer(id)?;
                self.view.selected = Some(id);
            }
            ViewCommand::ClearSelection  => self.view.selected = None,
            ViewCommand::SetTab { tab }  => self.tab = tab,
        }
        Ok(())
    }

    /// Render one panel against the current view.
    pub fn render(&self, tab: Tab) -> DashResult<PanelReport> {
        let as_of = self.as_of();
        let visible = self
            .view
            .apply(&self.data.customers, as_of, &self.config.risk_thresholds);
        self.render_with(tab, as_of, &visible)
    }

    fn render_with(
        &self,
        tab: Tab,
        as_of: NaiveDate,
        visible: &[&CustomerRecord],
    ) -> DashResult<PanelReport> {
        let panel = self
            .panels
            .iter()
            .find(|p| p.tab() == tab)
            .ok_or_else(|| DashError::invalid("tab", format!("{tab:?}")))?;

        let ctx = PanelContext {
            data:   &self.data,
            config: &self.config,
            view:   &self.view,
            as_of,
            visible,
        };
        let report = panel.render(&ctx)?;
        log::debug!(
            "session: rendered {:?} ({} cards, {} sections)",
            tab,
            report.cards.len(),
            report.sections.len(),
        );
        Ok(report)
    }

    pub fn snapshot(&self) -> DashResult<ViewSnapshot> {
        let thresholds = &self.config.risk_thresholds;
        let as_of = self.as_of();
        let visible = self.view.apply(&self.data.customers, as_of, thresholds);

        let selected = match self.view.selected {
            Some(id) => Some(TableRow::new(self.data.customer(id)?, thresholds)),
            None => None,
        };

        Ok(ViewSnapshot {
            tab:      self.tab,
            state:    self.view.clone(),
            rows:     visible.iter().map(|r| TableRow::new(r, thresholds)).collect(),
            matched:  visible.len(),
            total:    self.data.customers.len(),
            recent:   recent_customers(
                &self.data.customers,
                self.config.recent_customers_limit,
                thresholds,
            ),
            selected,
            panel:    self.render_with(self.tab, as_of, &visible)?,
        })
    }
}
