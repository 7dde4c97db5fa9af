//! Plain-text views of the command results.

use std::fmt::Write;

use api_types::{
    Money,
    budget::Budget,
    event::{Event, EventId},
    page::PaginatedCollection,
    transaction::{Expense, Income},
};
use engine::{Alert, BudgetReport, CategoryTotal, EntryKind, ProgressBand, budget_progress};

const NO_DATE: &str = "-";

fn page_header<T>(title: &str, page: &PaginatedCollection<T>) -> String {
    format!(
        "{title} (page {} of {}, {} total)\n",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    )
}

pub fn budgets(
    page: &PaginatedCollection<Budget>,
    shown: &[&Budget],
    event_name: impl Fn(&EventId) -> String,
) -> String {
    let mut out = page_header("Budgets", page);
    if shown.is_empty() {
        out.push_str("No budgets found.\n");
        return out;
    }
    for budget in shown {
        let progress = budget_progress(budget);
        let marker = match progress.band {
            ProgressBand::Normal => "",
            ProgressBand::Warning => " !",
            ProgressBand::Error => " !!",
        };
        let event = budget
            .event_id
            .as_ref()
            .map(&event_name)
            .unwrap_or_else(|| "Unknown Event".to_string());
        let _ = writeln!(
            out,
            "#{:<5} {:<28} {:<24} {} / {}  {:.1}%{marker}  {}",
            budget.id.unwrap_or_default(),
            budget.name,
            event,
            budget.current_expenses,
            budget.total_budget,
            progress.percentage,
            budget.status.as_str()
        );
    }
    out
}

fn categories(
    out: &mut String,
    title: &str,
    totals: &[CategoryTotal],
    share: impl Fn(&CategoryTotal) -> f64,
) {
    let _ = writeln!(out, "\n{title}");
    if totals.is_empty() {
        out.push_str("  (none)\n");
    }
    for total in totals {
        let _ = writeln!(
            out,
            "  {:<24} {:>14}  {:>5.1}%",
            total.category,
            total.amount.to_string(),
            share(total)
        );
    }
}

pub fn report(budget: &Budget, report: &BudgetReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", budget.name, budget.id.unwrap_or_default());
    let _ = writeln!(out, "Status:       {}", budget.status.as_str());
    let _ = writeln!(out, "Budget:       {}", budget.total_budget);
    let _ = writeln!(
        out,
        "Expenses:     {} ({} entries)",
        report.total_expense, report.expense_count
    );
    let _ = writeln!(
        out,
        "Income:       {} ({} entries)",
        report.total_income, report.income_count
    );
    let _ = writeln!(out, "Net balance:  {}", report.net_balance);
    let _ = writeln!(
        out,
        "Utilization:  {:.1}% ({})",
        report.utilization,
        report.status.label()
    );
    let headline = match report.alert {
        Alert::Exceeded { by } => format!("Budget exceeded by {by}"),
        Alert::AlmostDepleted { used, remaining } => {
            format!("Budget almost depleted: {used:.1}% used, {remaining} left")
        }
        Alert::OnTrack { remaining } => format!("On track: {remaining} left"),
    };
    let _ = writeln!(out, "{headline}");

    categories(
        &mut out,
        "Top expense categories",
        report.top_expense_categories(),
        |c| report.expense_share(c),
    );
    categories(
        &mut out,
        "Top income categories",
        report.top_income_categories(),
        |c| report.income_share(c),
    );

    out.push_str("\nMonthly expenses\n");
    if report.expenses_by_month.is_empty() {
        out.push_str("  (none)\n");
    }
    for month in &report.expenses_by_month {
        let _ = writeln!(
            out,
            "  {:04}-{:02} {:>14}",
            month.year,
            month.month,
            month.amount.to_string()
        );
    }

    out.push_str("\nRecent transactions\n");
    if report.recent_transactions.is_empty() {
        out.push_str("  (none)\n");
    }
    for tx in &report.recent_transactions {
        let sign = match tx.kind {
            EntryKind::Expense => "-",
            EntryKind::Income => "+",
        };
        let date = tx
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATE.to_string());
        let _ = writeln!(
            out,
            "  {date:<10} {sign}{:<14} {:<20} {}",
            tx.amount.to_string(),
            tx.category.as_deref().unwrap_or(engine::UNCATEGORIZED),
            tx.description.as_deref().unwrap_or_default()
        );
    }
    out
}

fn transaction_line(
    out: &mut String,
    id: Option<i64>,
    date: Option<String>,
    category: Option<&str>,
    amount: Money,
    party: Option<&str>,
    status: &str,
) {
    let _ = writeln!(
        out,
        "#{:<5} {:<10} {:<20} {:>14}  {:<20} {status}",
        id.unwrap_or_default(),
        date.unwrap_or_else(|| NO_DATE.to_string()),
        category.filter(|c| !c.is_empty()).unwrap_or(engine::UNCATEGORIZED),
        amount.to_string(),
        party.unwrap_or_default(),
    );
}

pub fn expenses(page: &PaginatedCollection<Expense>) -> String {
    let mut out = page_header("Expenses", page);
    for expense in &page.content {
        transaction_line(
            &mut out,
            expense.id,
            expense.date.map(|d| d.format("%Y-%m-%d").to_string()),
            expense.category.as_deref(),
            expense.amount,
            expense.vendor.as_deref(),
            expense.status.as_str(),
        );
    }
    out
}

pub fn incomes(page: &PaginatedCollection<Income>) -> String {
    let mut out = page_header("Incomes", page);
    for income in &page.content {
        transaction_line(
            &mut out,
            income.id,
            income.date.map(|d| d.format("%Y-%m-%d").to_string()),
            income.category.as_deref(),
            income.amount,
            income.source.as_deref(),
            income.status.as_str(),
        );
    }
    out
}

pub fn events(page: &PaginatedCollection<Event>) -> String {
    let mut out = page_header("Events", page);
    if page.content.is_empty() {
        out.push_str("No events found.\n");
    }
    for event in &page.content {
        let _ = writeln!(
            out,
            "#{:<24} {:<32} {:<16} {}",
            event.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            event.display_name(),
            event.category.as_deref().unwrap_or_default(),
            event.status.as_deref().unwrap_or_default()
        );
    }
    out
}
