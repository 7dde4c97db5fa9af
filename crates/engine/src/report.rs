use api_types::{
    Money,
    budget::Budget,
    transaction::{Expense, Income},
};
use serde::Serialize;

use crate::{
    recent::{RECENT_LIMIT, RecentTransaction, recent},
    rollup::{self, CategoryTotal, MonthlyTotal, TOP_CATEGORIES},
    utilization::{Alert, UtilizationStatus, utilization},
};

/// Everything the budget summary view shows, derived from one budget and its
/// transactions.
///
/// Building is a pure function of its inputs; nothing is cached between
/// calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub total_expense: Money,
    pub total_income: Money,
    pub net_balance: Money,
    /// `total_budget - total_expense`, negative when over budget.
    pub remaining: Money,
    pub expense_count: usize,
    pub income_count: usize,
    pub utilization: f64,
    pub status: UtilizationStatus,
    pub is_over_budget: bool,
    pub alert: Alert,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub incomes_by_category: Vec<CategoryTotal>,
    pub expenses_by_month: Vec<MonthlyTotal>,
    pub recent_transactions: Vec<RecentTransaction>,
}

impl BudgetReport {
    pub fn build(budget: &Budget, expenses: &[Expense], incomes: &[Income]) -> Self {
        let total_expense = rollup::total(expenses);
        let total_income = rollup::total(incomes);
        let utilization = utilization(total_expense, budget.total_budget);

        Self {
            total_expense,
            total_income,
            net_balance: total_income - total_expense,
            remaining: budget.total_budget - total_expense,
            expense_count: expenses.len(),
            income_count: incomes.len(),
            utilization,
            status: UtilizationStatus::classify(utilization),
            is_over_budget: total_expense > budget.total_budget,
            alert: Alert::evaluate(total_expense, budget.total_budget),
            expenses_by_category: rollup::by_category(expenses),
            incomes_by_category: rollup::by_category(incomes),
            expenses_by_month: rollup::by_month(expenses),
            recent_transactions: recent(expenses, incomes, RECENT_LIMIT),
        }
    }

    pub fn top_expense_categories(&self) -> &[CategoryTotal] {
        rollup::top(&self.expenses_by_category, TOP_CATEGORIES)
    }

    pub fn top_income_categories(&self) -> &[CategoryTotal] {
        rollup::top(&self.incomes_by_category, TOP_CATEGORIES)
    }

    /// Percentage of total expenses spent in `category`.
    pub fn expense_share(&self, category: &CategoryTotal) -> f64 {
        rollup::category_share(category.amount, self.total_expense)
    }

    /// Percentage of total income coming from `category`.
    pub fn income_share(&self, category: &CategoryTotal) -> f64 {
        rollup::category_share(category.amount, self.total_income)
    }
}
