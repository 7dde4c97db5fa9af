use api_types::{
    page::PaginatedCollection,
    transaction::{Expense, Income},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, Credential, error::Operation};

pub const DEFAULT_TRANSACTION_PAGE_SIZE: u32 = 20;

/// Collection endpoint shared by expenses and incomes.
struct Resource {
    path: &'static str,
    list: Operation,
    create: Operation,
    update: Operation,
    delete: Operation,
}

const EXPENSES: Resource = Resource {
    path: "expenses",
    list: Operation::new("fetch expenses", "Failed to fetch expenses"),
    create: Operation::new("create expense", "Failed to create expense").without_not_found(),
    update: Operation::new("update expense", "Failed to update expense"),
    delete: Operation::new("delete expense", "Failed to delete expense"),
};

const INCOMES: Resource = Resource {
    path: "incomes",
    list: Operation::new("fetch incomes", "Failed to fetch incomes"),
    create: Operation::new("create income", "Failed to create income").without_not_found(),
    update: Operation::new("update income", "Failed to update income"),
    delete: Operation::new("delete income", "Failed to delete income"),
};

impl Client {
    pub async fn fetch_expenses_by_budget(
        &self,
        budget_id: i64,
        page: u32,
        size: u32,
        credential: &Credential,
    ) -> Result<PaginatedCollection<Expense>, ClientError> {
        self.fetch_by_budget(&EXPENSES, budget_id, page, size, credential)
            .await
    }

    pub async fn create_expense(
        &self,
        expense: &Expense,
        credential: &Credential,
    ) -> Result<Expense, ClientError> {
        self.create_record(&EXPENSES, expense, credential).await
    }

    pub async fn update_expense(
        &self,
        id: i64,
        expense: &Expense,
        credential: &Credential,
    ) -> Result<Expense, ClientError> {
        self.update_record(&EXPENSES, id, expense, credential).await
    }

    pub async fn delete_expense(&self, id: i64, credential: &Credential) -> Result<(), ClientError> {
        self.delete_record(&EXPENSES, id, credential).await
    }

    pub async fn fetch_incomes_by_budget(
        &self,
        budget_id: i64,
        page: u32,
        size: u32,
        credential: &Credential,
    ) -> Result<PaginatedCollection<Income>, ClientError> {
        self.fetch_by_budget(&INCOMES, budget_id, page, size, credential)
            .await
    }

    pub async fn create_income(
        &self,
        income: &Income,
        credential: &Credential,
    ) -> Result<Income, ClientError> {
        self.create_record(&INCOMES, income, credential).await
    }

    pub async fn update_income(
        &self,
        id: i64,
        income: &Income,
        credential: &Credential,
    ) -> Result<Income, ClientError> {
        self.update_record(&INCOMES, id, income, credential).await
    }

    pub async fn delete_income(&self, id: i64, credential: &Credential) -> Result<(), ClientError> {
        self.delete_record(&INCOMES, id, credential).await
    }

    async fn fetch_by_budget<T: DeserializeOwned>(
        &self,
        resource: &Resource,
        budget_id: i64,
        page: u32,
        size: u32,
        credential: &Credential,
    ) -> Result<PaginatedCollection<T>, ClientError> {
        let mut url = self.budget_url(&[resource.path, "budget", &budget_id.to_string()]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        self.send(self.http.get(url), credential, &resource.list)
            .await
    }

    async fn create_record<T: Serialize + DeserializeOwned>(
        &self,
        resource: &Resource,
        record: &T,
        credential: &Credential,
    ) -> Result<T, ClientError> {
        let req = self.http.post(self.budget_url(&[resource.path])).json(record);
        let created = self.send(req, credential, &resource.create).await?;
        tracing::info!("{} succeeded", resource.create.name);
        Ok(created)
    }

    async fn update_record<T: Serialize + DeserializeOwned>(
        &self,
        resource: &Resource,
        id: i64,
        record: &T,
        credential: &Credential,
    ) -> Result<T, ClientError> {
        let req = self
            .http
            .put(self.budget_url(&[resource.path, &id.to_string()]))
            .json(record);
        let updated = self.send(req, credential, &resource.update).await?;
        tracing::info!("{} {id} succeeded", resource.update.name);
        Ok(updated)
    }

    async fn delete_record(
        &self,
        resource: &Resource,
        id: i64,
        credential: &Credential,
    ) -> Result<(), ClientError> {
        let req = self
            .http
            .delete(self.budget_url(&[resource.path, &id.to_string()]));
        self.send_optional(req, credential, &resource.delete)
            .await?;
        tracing::info!("{} {id} succeeded", resource.delete.name);
        Ok(())
    }
}
