//! churnboard-core: customer churn dashboard model.
//!
//! Data provider, filter/sort table view, risk classification,
//! display formatting, aggregates, chart series and per-tab panels.
//! Everything here is synchronous and pure over in-memory collections.

pub mod aggregate;
pub mod chart;
pub mod command;
pub mod config;
pub mod customer;
pub mod error;
pub mod format;
pub mod name_generator;
pub mod panel;
pub mod panels;
pub mod population;
pub mod provider;
pub mod records;
pub mod risk;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod types;
pub mod view;

pub use customer::CustomerRecord;
pub use error::{DashError, DashResult};
pub use risk::{classify, RiskTier};
pub use view::{project, SortKey, SortOrder};
