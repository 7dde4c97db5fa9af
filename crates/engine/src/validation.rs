//! Client-side validation of the budget, expense and income forms.
//!
//! Drafts hold what the user typed. `validate` reports every failing field at
//! once; `into_*` validates and builds the record sent to the backend.

use api_types::{
    Extra, Money,
    budget::{Budget, BudgetStatus},
    dates,
    event::EventId,
    transaction::{Expense, ExpenseStatus, Income, IncomeStatus},
};

use crate::{EngineError, ValidationErrors};

const AMOUNT_REQUIRED: &str = "Amount is required";
const AMOUNT_POSITIVE: &str = "Please enter a valid positive amount";
const CATEGORY_REQUIRED: &str = "Category is required";
const DESCRIPTION_REQUIRED: &str = "Description is required";
const DATE_REQUIRED: &str = "Date is required";
const DATE_INVALID: &str = "Please enter a valid date";

#[derive(Clone, Debug, Default)]
pub struct BudgetDraft {
    pub name: String,
    pub event_id: Option<EventId>,
    pub total_budget: String,
    pub categories: Vec<String>,
    pub notes: Option<String>,
    pub status: BudgetStatus,
}

impl BudgetDraft {
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "Budget name is required");
        }
        if self.event_id.is_none() {
            errors.add("eventId", "Please select an event");
        }
        if self.total_budget.trim().is_empty() {
            errors.add("totalBudget", "Total budget amount is required");
        } else if !positive(&self.total_budget) {
            errors.add("totalBudget", "Please enter a valid positive number");
        }
        if self.categories.is_empty() {
            errors.add("categories", "Please select at least one category");
        }
        errors.into_result()
    }

    /// Validates the draft and turns it into a budget without an id.
    pub fn into_budget(self) -> Result<Budget, EngineError> {
        self.validate()?;
        Ok(Budget {
            id: None,
            name: self.name.trim().to_string(),
            event_id: self.event_id,
            total_budget: self.total_budget.parse()?,
            current_expenses: Money::ZERO,
            current_income: Money::ZERO,
            notes: self.notes,
            categories: self.categories,
            status: self.status,
            extra: Extra::new(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExpenseDraft {
    pub budget_id: i64,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub vendor: String,
    pub date: String,
    pub status: ExpenseStatus,
}

impl ExpenseDraft {
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut errors = ValidationErrors::default();
        common_fields(
            &mut errors,
            &self.category,
            &self.description,
            &self.amount,
            &self.date,
        );
        if self.vendor.trim().is_empty() {
            errors.add("vendor", "Vendor name is required");
        }
        errors.into_result()
    }

    pub fn into_expense(self) -> Result<Expense, EngineError> {
        self.validate()?;
        Ok(Expense {
            id: None,
            budget_id: Some(self.budget_id),
            category: Some(self.category),
            amount: self.amount.parse()?,
            description: Some(self.description.trim().to_string()),
            date: dates::parse(&self.date),
            vendor: Some(self.vendor.trim().to_string()),
            status: self.status,
            extra: Extra::new(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct IncomeDraft {
    pub budget_id: i64,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub source: String,
    pub date: String,
    pub status: IncomeStatus,
}

impl IncomeDraft {
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut errors = ValidationErrors::default();
        common_fields(
            &mut errors,
            &self.category,
            &self.description,
            &self.amount,
            &self.date,
        );
        if self.source.trim().is_empty() {
            errors.add("source", "Source is required");
        }
        errors.into_result()
    }

    pub fn into_income(self) -> Result<Income, EngineError> {
        self.validate()?;
        Ok(Income {
            id: None,
            budget_id: Some(self.budget_id),
            category: Some(self.category),
            amount: self.amount.parse()?,
            description: Some(self.description.trim().to_string()),
            date: dates::parse(&self.date),
            source: Some(self.source.trim().to_string()),
            status: self.status,
            extra: Extra::new(),
        })
    }
}

fn common_fields(
    errors: &mut ValidationErrors,
    category: &str,
    description: &str,
    amount: &str,
    date: &str,
) {
    if category.is_empty() {
        errors.add("category", CATEGORY_REQUIRED);
    }
    if description.trim().is_empty() {
        errors.add("description", DESCRIPTION_REQUIRED);
    }
    if amount.trim().is_empty() {
        errors.add("amount", AMOUNT_REQUIRED);
    } else if !positive(amount) {
        errors.add("amount", AMOUNT_POSITIVE);
    }
    if date.trim().is_empty() {
        errors.add("date", DATE_REQUIRED);
    } else if dates::parse(date).is_none() {
        errors.add("date", DATE_INVALID);
    }
}

fn positive(amount: &str) -> bool {
    amount
        .parse::<Money>()
        .is_ok_and(|amount| amount.is_positive())
}
