//! View snapshot: everything the rendering layer needs for one frame.
//!
//! A snapshot is produced after every command. It echoes the view state,
//! carries the projected table rows with their risk tiers, the sidebar
//! list, the selected customer, and the active tab's panel report.

use crate::{
    panel::{PanelReport, Tab},
    view::{RecentCustomer, TableRow, ViewState},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub tab:      Tab,
    pub state:    ViewState,
    /// Rows matching the filters, in display order.
    pub rows:     Vec<TableRow>,
    pub matched:  usize,
    pub total:    usize,
    pub recent:   Vec<RecentCustomer>,
    pub selected: Option<TableRow>,
    pub panel:    PanelReport,
}
