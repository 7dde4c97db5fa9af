use api_types::{
    budget::Budget,
    transaction::{Expense, Income},
};
use serde::Serialize;

use crate::{Client, ClientError, Credential, DEFAULT_TRANSACTION_PAGE_SIZE};

/// A budget with the first page of its expenses and incomes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetDetail {
    pub budget: Budget,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
}

impl Client {
    /// Loads everything the budget detail view needs.
    ///
    /// A failure to load the budget itself is returned. Failures loading its
    /// expenses or incomes are logged and leave that list empty.
    pub async fn load_budget_detail(
        &self,
        id: i64,
        credential: &Credential,
    ) -> Result<BudgetDetail, ClientError> {
        let budget = self.get_budget(id, credential).await?;

        let (expenses, incomes) = tokio::join!(
            self.fetch_expenses_by_budget(id, 0, DEFAULT_TRANSACTION_PAGE_SIZE, credential),
            self.fetch_incomes_by_budget(id, 0, DEFAULT_TRANSACTION_PAGE_SIZE, credential),
        );

        let expenses = match expenses {
            Ok(page) => page.content,
            Err(err) => {
                tracing::warn!("could not load expenses of budget {id}: {err}");
                Vec::new()
            }
        };
        let incomes = match incomes {
            Ok(page) => page.content,
            Err(err) => {
                tracing::warn!("could not load incomes of budget {id}: {err}");
                Vec::new()
            }
        };

        Ok(BudgetDetail {
            budget,
            expenses,
            incomes,
        })
    }
}
