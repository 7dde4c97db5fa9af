use api_types::{budget::Budget, event::EventId};

/// Budgets whose name, or the name of their event, contains `term`
/// (case-insensitive). An empty term keeps everything.
pub fn filter_budgets<'a, F>(budgets: &'a [Budget], term: &str, event_name: F) -> Vec<&'a Budget>
where
    F: Fn(&EventId) -> String,
{
    let needle = term.trim().to_lowercase();
    budgets
        .iter()
        .filter(|budget| {
            budget.name.to_lowercase().contains(&needle)
                || budget
                    .event_id
                    .as_ref()
                    .is_some_and(|id| event_name(id).to_lowercase().contains(&needle))
        })
        .collect()
}
