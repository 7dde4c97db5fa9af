use api_types::{
    budget::{Budget, DeleteConfirmation},
    event::EventId,
    page::{PaginatedCollection, RawListResponse},
};
use serde_json::Value;

use crate::{
    Client, ClientError, Credential,
    error::Operation,
    retry::{DELETE_ATTEMPTS, RetryPolicy},
};

const FETCH_BUDGETS: Operation = Operation::new("fetch budgets", "Failed to fetch budgets");
const GET_BUDGET: Operation = Operation::new("fetch budget", "Failed to fetch budget");
const GET_BUDGET_BY_EVENT: Operation =
    Operation::new("fetch budget by event", "Failed to fetch budget for event");
const CREATE_BUDGET: Operation =
    Operation::new("create budget", "Failed to create budget").without_not_found();
const UPDATE_BUDGET: Operation = Operation::new("update budget", "Failed to update budget");
const DELETE_BUDGET: Operation = Operation::new("delete budget", "Failed to delete budget");

/// Result of a budget deletion that got a 2xx answer.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteOutcome {
    pub success: bool,
    pub data: Option<Value>,
}

impl DeleteOutcome {
    /// A body explicitly saying `"success": false` is not a success.
    fn from_body(data: Option<Value>) -> Self {
        let success = data
            .as_ref()
            .and_then(|body| body.get("success"))
            .and_then(Value::as_bool)
            .unwrap_or(true);
        Self { success, data }
    }
}

impl Client {
    /// One page of budgets, served from the cache when the same page and size
    /// were fetched less than a TTL ago.
    pub async fn fetch_budgets(
        &self,
        page: u32,
        size: u32,
        force_refresh: bool,
        credential: &Credential,
    ) -> Result<PaginatedCollection<Budget>, ClientError> {
        if !force_refresh
            && let Some(cached) = self.cache.lookup(page, size).await
        {
            tracing::debug!("budgets page {page} (size {size}) served from cache");
            return Ok(cached);
        }

        let mut url = self.budget_url(&["budgets"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string())
            .append_pair("_cb", &chrono::Utc::now().timestamp_millis().to_string());
        let req = self.http.get(url).timeout(self.config.listing_timeout);

        let raw: RawListResponse<Budget> = self.send(req, credential, &FETCH_BUDGETS).await?;
        let data = raw.into_page(page, size);
        self.cache.store(page, size, data.clone()).await;
        tracing::debug!(
            "cached budgets page {page} (size {size}, {} items)",
            data.content.len()
        );
        Ok(data)
    }

    pub async fn get_budget(&self, id: i64, credential: &Credential) -> Result<Budget, ClientError> {
        let req = self
            .http
            .get(self.budget_url(&["budgets", &id.to_string()]))
            .timeout(self.config.item_timeout);
        self.send(req, credential, &GET_BUDGET).await
    }

    pub async fn get_budget_by_event(
        &self,
        event_id: &EventId,
        credential: &Credential,
    ) -> Result<Budget, ClientError> {
        let req = self
            .http
            .get(self.budget_url(&["budgets", "event", &event_id.to_string()]))
            .timeout(self.config.item_timeout);
        self.send(req, credential, &GET_BUDGET_BY_EVENT).await
    }

    pub async fn create_budget(
        &self,
        budget: &Budget,
        credential: &Credential,
    ) -> Result<Budget, ClientError> {
        let req = self
            .http
            .post(self.budget_url(&["budgets"]))
            .json(budget)
            .timeout(self.config.item_timeout);
        let created: Budget = self.send(req, credential, &CREATE_BUDGET).await?;
        self.cache.clear().await;
        tracing::info!("created budget {:?} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_budget(
        &self,
        id: i64,
        budget: &Budget,
        credential: &Credential,
    ) -> Result<Budget, ClientError> {
        let req = self
            .http
            .put(self.budget_url(&["budgets", &id.to_string()]))
            .json(budget)
            .timeout(self.config.item_timeout);
        let updated: Budget = self.send(req, credential, &UPDATE_BUDGET).await?;
        self.cache.clear().await;
        tracing::info!("updated budget {id}");
        Ok(updated)
    }

    /// [`Client::create_budget`], retried at once on timeouts and network
    /// failures.
    pub async fn create_budget_with_retry(
        &self,
        budget: &Budget,
        max_retries: u32,
        credential: &Credential,
    ) -> Result<Budget, ClientError> {
        RetryPolicy::ImmediateOnTransport { max_retries }
            .run("create budget", |_| self.create_budget(budget, credential))
            .await
    }

    /// [`Client::update_budget`], retried at once on timeouts and network
    /// failures.
    pub async fn update_budget_with_retry(
        &self,
        id: i64,
        budget: &Budget,
        max_retries: u32,
        credential: &Credential,
    ) -> Result<Budget, ClientError> {
        RetryPolicy::ImmediateOnTransport { max_retries }
            .run("update budget", |_| self.update_budget(id, budget, credential))
            .await
    }

    /// Deletes a budget, retrying 5xx answers with a linear backoff of
    /// `delete_backoff * attempt`. Clears the budget cache on success.
    pub async fn delete_budget_with_retry(
        &self,
        id: i64,
        max_attempts: u32,
        credential: &Credential,
    ) -> Result<DeleteOutcome, ClientError> {
        let policy = RetryPolicy::ServerErrorBackoff {
            max_attempts,
            step: self.config.delete_backoff,
        };
        let data = policy
            .run("delete budget", |attempt| async move {
                tracing::debug!("deleting budget {id}, attempt {attempt}/{max_attempts}");
                let req = self
                    .http
                    .delete(self.budget_url(&["budgets", &id.to_string()]))
                    .timeout(self.config.item_timeout);
                self.send_optional(req, credential, &DELETE_BUDGET).await
            })
            .await?;

        let outcome = DeleteOutcome::from_body(data);
        if outcome.success {
            self.cache.clear().await;
        }
        Ok(outcome)
    }

    /// Deletes the budget whose id the user supplied as text.
    pub async fn delete_budget(
        &self,
        id: &str,
        credential: &Credential,
    ) -> Result<DeleteConfirmation, ClientError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::InvalidArgument(
                "Budget ID is required for deletion".to_string(),
            ));
        }
        let id: i64 = id.parse().map_err(|_| {
            ClientError::InvalidArgument(format!("Invalid budget ID format: {id}"))
        })?;

        let outcome = self
            .delete_budget_with_retry(id, DELETE_ATTEMPTS, credential)
            .await?;
        if !outcome.success {
            return Err(ClientError::Unknown(
                "Unknown error occurred during budget deletion".to_string(),
            ));
        }

        tracing::info!("deleted budget {id}");
        Ok(DeleteConfirmation {
            success: true,
            message: "Budget deleted successfully".to_string(),
            data: outcome.data,
        })
    }
}
