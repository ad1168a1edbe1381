use crate::{
    customer::ContractType,
    panel::Tab,
    risk::RiskTier,
    types::CustomerId,
    view::{DateRange, SortKey, SortOrder},
};
use serde::{Deserialize, Serialize};

/// Every interaction the presentation layer can send.
/// Each one updates the view state atomically; the next snapshot reflects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ViewCommand {
    // ── Table ─────────────────────────────────────
    SetQuery { query: String },
    /// Header click: toggles order on the same key.
    SortBy { key: SortKey },
    SetOrder { order: SortOrder },

    // ── Sidebar filters ───────────────────────────
    /// `None` = all levels.
    SetRiskLevel { level: Option<RiskTier> },
    /// `None` = all contracts.
    SetContractType { contract: Option<ContractType> },
    /// `None` = all segments.
    SetSegment { segment: Option<String> },
    SetDateRange { range: DateRange },
    ClearFilters,

    // ── Selection and navigation ──────────────────
    SelectCustomer { id: CustomerId },
    ClearSelection,
    SetTab { tab: Tab },
}
