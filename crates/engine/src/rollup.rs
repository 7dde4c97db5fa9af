//! Category and month rollups.

use std::collections::{BTreeMap, HashMap};

use api_types::Money;
use chrono::Datelike;
use serde::Serialize;

use crate::entry::Entry;

/// How many categories the "top categories" views show.
pub const TOP_CATEGORIES: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub amount: Money,
}

/// Sums amounts per category, largest first.
///
/// Ties keep the order in which categories were first seen.
pub fn by_category<E: Entry>(entries: &[E]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for entry in entries {
        let category = entry.category_or_default();
        if let Some(&idx) = index.get(category) {
            totals[idx].amount += entry.amount();
            continue;
        }
        index.insert(category, totals.len());
        totals.push(CategoryTotal {
            category: category.to_string(),
            amount: entry.amount(),
        });
    }

    // `sort_by` is stable.
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// First `n` entries of an already sorted rollup.
pub fn top(totals: &[CategoryTotal], n: usize) -> &[CategoryTotal] {
    &totals[..n.min(totals.len())]
}

pub fn total<E: Entry>(entries: &[E]) -> Money {
    entries.iter().map(Entry::amount).sum()
}

/// Share of `amount` over `total` as a percentage, 0 when `total` is not
/// positive.
pub fn category_share(amount: Money, total: Money) -> f64 {
    if !total.is_positive() {
        return 0.0;
    }
    amount.cents() as f64 * 100.0 / total.cents() as f64
}

/// Sums amounts per calendar month, oldest first. Undated entries are skipped
/// and missing months are not filled in.
pub fn by_month<E: Entry>(entries: &[E]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), Money> = BTreeMap::new();
    for entry in entries {
        let Some(date) = entry.date() else {
            continue;
        };
        *months.entry((date.year(), date.month())).or_default() += entry.amount();
    }

    months
        .into_iter()
        .map(|((year, month), amount)| MonthlyTotal {
            year,
            month,
            amount,
        })
        .collect()
}
