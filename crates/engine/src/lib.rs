//! Budget reporting engine.
//!
//! Pure transformations of a budget and its expense/income collections into
//! the values the summary and list views display. Nothing here performs I/O
//! or keeps state between calls: callers re-run the functions whenever the
//! underlying collections change.

pub use entry::{Entry, UNCATEGORIZED};
pub use error::{EngineError, ValidationErrors};
pub use recent::{EntryKind, RECENT_LIMIT, RecentTransaction, recent};
pub use report::BudgetReport;
pub use rollup::{
    CategoryTotal, MonthlyTotal, TOP_CATEGORIES, by_category, by_month, category_share, top, total,
};
pub use search::filter_budgets;
pub use utilization::{
    Alert, BudgetProgress, CRITICAL_THRESHOLD, ProgressBand, UtilizationStatus, WARNING_THRESHOLD,
    budget_progress, utilization,
};

mod entry;
mod error;
mod recent;
mod report;
mod rollup;
mod search;
mod utilization;
pub mod validation;
