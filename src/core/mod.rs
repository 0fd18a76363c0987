//! Core business logic - framework-agnostic budget computations.
//!
//! Everything here is pure: functions take loaded tables and return computed
//! structures, with recoverable anomalies surfaced as warnings instead of
//! errors. Persistence and presentation live elsewhere.

/// Declared-category (APU) rollup axis.
pub mod apu;
/// Dotted item-code parsing, ordering and hierarchy derivation.
pub mod code;
/// Currency conversion with an explicit "unavailable" sentinel.
pub mod currency;
/// Per-item unit-price aggregation from detail lines.
pub mod pricing;
/// Hierarchy-axis rollup and project cost summary.
pub mod rollup;

pub use apu::{ApuBlock, ApuBreakdown, ApuRow, TypeMap, apu_breakdown, apu_breakdowns};
pub use code::{SortKey, children_of, collect_parents, sort_codes};
pub use currency::{Converted, RateTable, project_currency};
pub use pricing::{PricingTable, PricingWarning, unit_price, unit_prices};
pub use rollup::{BudgetRollup, CostSummary, LineTotal, RollupNode, Section, rollup};
