use api_types::{
    Money,
    transaction::{Expense, Income},
};
use chrono::NaiveDateTime;
use serde::Serialize;

/// How many transactions the "recent activity" list shows.
pub const RECENT_LIMIT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Income,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecentTransaction {
    pub kind: EntryKind,
    pub id: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Money,
    pub date: Option<NaiveDateTime>,
}

impl From<&Expense> for RecentTransaction {
    fn from(expense: &Expense) -> Self {
        Self {
            kind: EntryKind::Expense,
            id: expense.id,
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            date: expense.date,
        }
    }
}

impl From<&Income> for RecentTransaction {
    fn from(income: &Income) -> Self {
        Self {
            kind: EntryKind::Income,
            id: income.id,
            category: income.category.clone(),
            description: income.description.clone(),
            amount: income.amount,
            date: income.date,
        }
    }
}

/// Newest `limit` transactions across both collections.
///
/// The merged list is sorted from scratch; undated transactions go last.
pub fn recent(expenses: &[Expense], incomes: &[Income], limit: usize) -> Vec<RecentTransaction> {
    let mut all: Vec<RecentTransaction> = expenses
        .iter()
        .map(RecentTransaction::from)
        .chain(incomes.iter().map(RecentTransaction::from))
        .collect();

    // `None < Some(_)`, so a descending sort leaves undated entries at the end.
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(limit);
    all
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 5, day).and_then(|d| d.and_hms_opt(9, 0, 0))
    }

    fn expense(id: i64, date: Option<NaiveDateTime>) -> Expense {
        serde_json::from_value(serde_json::json!({ "id": id, "amount": 10 }))
            .map(|mut e: Expense| {
                e.date = date;
                e
            })
            .unwrap()
    }

    fn income(id: i64, date: Option<NaiveDateTime>) -> Income {
        serde_json::from_value(serde_json::json!({ "id": id, "amount": 20 }))
            .map(|mut i: Income| {
                i.date = date;
                i
            })
            .unwrap()
    }

    #[test]
    fn merges_and_takes_newest() {
        let expenses = vec![expense(1, at(1)), expense(2, at(10)), expense(3, at(3))];
        let incomes = vec![
            income(4, at(7)),
            income(5, at(2)),
            income(6, at(12)),
            income(7, None),
        ];
        let ids: Vec<_> = recent(&expenses, &incomes, RECENT_LIMIT)
            .into_iter()
            .map(|t| (t.kind, t.id.unwrap()))
            .collect();
        assert_eq!(
            ids,
            vec![
                (EntryKind::Income, 6),
                (EntryKind::Expense, 2),
                (EntryKind::Income, 4),
                (EntryKind::Expense, 3),
                (EntryKind::Income, 5),
            ]
        );
    }

    #[test]
    fn undated_entries_sort_last() {
        let expenses = vec![expense(1, None), expense(2, at(4))];
        let list = recent(&expenses, &[], RECENT_LIMIT);
        assert_eq!(list[0].id, Some(2));
        assert_eq!(list[1].id, Some(1));
    }
}
