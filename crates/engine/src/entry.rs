//! Common view over expenses and incomes.

use api_types::{
    Money,
    transaction::{Expense, Income},
};
use chrono::NaiveDateTime;

/// Bucket used when a transaction carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// What the rollups need to know about a transaction.
pub trait Entry {
    fn category(&self) -> Option<&str>;
    fn amount(&self) -> Money;
    fn date(&self) -> Option<NaiveDateTime>;

    /// Category with empty values folded into [`UNCATEGORIZED`].
    fn category_or_default(&self) -> &str {
        self.category()
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

impl Entry for Expense {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn amount(&self) -> Money {
        self.amount
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }
}

impl Entry for Income {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn amount(&self) -> Money {
        self.amount
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }
}
