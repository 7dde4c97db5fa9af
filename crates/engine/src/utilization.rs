//! Budget utilization and the status bands derived from it.

use api_types::{Money, budget::Budget};
use serde::Serialize;

/// Utilization above this percentage is critical.
pub const CRITICAL_THRESHOLD: f64 = 90.0;
/// Utilization above this percentage deserves a warning.
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Expenses over total budget as a percentage, 0 for a non-positive budget.
pub fn utilization(total_expense: Money, total_budget: Money) -> f64 {
    if !total_budget.is_positive() {
        return 0.0;
    }
    total_expense.cents() as f64 * 100.0 / total_budget.cents() as f64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    OnTrack,
    Warning,
    Critical,
}

impl UtilizationStatus {
    /// Strict thresholds: exactly 90% is still a warning.
    pub fn classify(utilization: f64) -> Self {
        if utilization > CRITICAL_THRESHOLD {
            Self::Critical
        } else if utilization > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Headline shown on the summary view.
///
/// Over budget wins over the utilization bands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    Exceeded { by: Money },
    AlmostDepleted { used: f64, remaining: Money },
    OnTrack { remaining: Money },
}

impl Alert {
    pub fn evaluate(total_expense: Money, total_budget: Money) -> Self {
        let used = utilization(total_expense, total_budget);
        if total_expense > total_budget {
            Self::Exceeded {
                by: total_expense - total_budget,
            }
        } else if UtilizationStatus::classify(used) == UtilizationStatus::Critical {
            Self::AlmostDepleted {
                used,
                remaining: total_budget - total_expense,
            }
        } else {
            Self::OnTrack {
                remaining: total_budget - total_expense,
            }
        }
    }
}

/// Colour band of the progress bars in the budget list. Unlike
/// [`UtilizationStatus`] the bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Normal,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// Clamped to 100.
    pub percentage: f64,
    pub band: ProgressBand,
}

/// Progress of a budget from the totals the backend keeps on the record,
/// used where expenses were not fetched.
pub fn budget_progress(budget: &Budget) -> BudgetProgress {
    let percentage = utilization(budget.current_expenses, budget.total_budget).min(100.0);
    let band = if percentage >= CRITICAL_THRESHOLD {
        ProgressBand::Error
    } else if percentage >= WARNING_THRESHOLD {
        ProgressBand::Warning
    } else {
        ProgressBand::Normal
    };
    BudgetProgress { percentage, band }
}
