//! Data access layer for the EventZen budget and event services.
//!
//! Every operation takes the caller's [`Credential`] explicitly, classifies
//! failures into [`ClientError`], and resolves list bodies into a
//! [`PaginatedCollection`](api_types::page::PaginatedCollection).

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use budgets::DeleteOutcome;
pub use cache::CacheEntry;
pub use credential::Credential;
pub use detail::BudgetDetail;
pub use error::ClientError;
pub use events::EventQuery;
pub use retry::{DEFAULT_BACKOFF_STEP, DELETE_ATTEMPTS, MUTATION_RETRIES, RetryPolicy};
pub use transactions::DEFAULT_TRANSACTION_PAGE_SIZE;

use cache::BudgetCache;
use error::{ErrorBody, Operation};

mod budgets;
mod cache;
mod credential;
mod detail;
mod error;
mod events;
mod retry;
mod transactions;

pub const DEFAULT_BUDGET_API_URL: &str = "http://localhost:8083/api";
pub const DEFAULT_EVENT_API_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(30_000);

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub budget_api_url: String,
    pub event_api_url: String,
    /// How long a fetched budget page is served from the cache.
    pub cache_ttl: Duration,
    /// Base delay of the budget delete backoff.
    pub delete_backoff: Duration,
    /// Timeout of single-record reads and writes.
    pub item_timeout: Duration,
    pub listing_timeout: Duration,
    pub request_timeout: Duration,
    /// Honour `HTTP_PROXY` and friends.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            budget_api_url: DEFAULT_BUDGET_API_URL.to_string(),
            event_api_url: DEFAULT_EVENT_API_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            delete_backoff: DEFAULT_BACKOFF_STEP,
            item_timeout: Duration::from_secs(5),
            listing_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            system_proxy: true,
        }
    }
}

/// Handle to both backend services. Cheap to clone; clones share the budget
/// cache.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    budget_api: Url,
    event_api: Url,
    config: ClientConfig,
    cache: BudgetCache,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let budget_api = parse_base(&config.budget_api_url)?;
        let event_api = parse_base(&config.event_api_url)?;
        let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|err| ClientError::Unknown(format!("cannot build http client: {err}")))?;

        Ok(Self {
            http,
            budget_api,
            event_api,
            cache: BudgetCache::new(config.cache_ttl),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current content of the budget list cache, if any.
    pub async fn cached_budgets(&self) -> Option<CacheEntry> {
        self.cache.snapshot().await
    }

    pub async fn clear_budgets_cache(&self) {
        self.cache.clear().await;
        tracing::debug!("budget list cache cleared");
    }

    fn budget_url(&self, segments: &[&str]) -> Url {
        endpoint(&self.budget_api, segments)
    }

    fn event_url(&self, segments: &[&str]) -> Url {
        endpoint(&self.event_api, segments)
    }

    /// Sends `req` and decodes a successful JSON body as `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        credential: &Credential,
        op: &Operation,
    ) -> Result<T, ClientError> {
        let res = self.dispatch(req, credential, op).await?;
        res.json::<T>().await.map_err(|err| {
            let err = ClientError::from_body(err);
            tracing::error!("{} failed: {err}", op.name);
            err
        })
    }

    /// Sends `req` and returns the body as JSON when there is one.
    async fn send_optional(
        &self,
        req: RequestBuilder,
        credential: &Credential,
        op: &Operation,
    ) -> Result<Option<Value>, ClientError> {
        let res = self.dispatch(req, credential, op).await?;
        let text = res.text().await.map_err(ClientError::from_body)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(
            serde_json::from_str(&text).unwrap_or(Value::String(text)),
        ))
    }

    async fn dispatch(
        &self,
        req: RequestBuilder,
        credential: &Credential,
        op: &Operation,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!("{}: sending request", op.name);
        let res = credential.apply(req).send().await.map_err(|err| {
            let err = ClientError::from_send(err);
            tracing::error!("{} failed: {err}", op.name);
            err
        })?;

        let status = res.status();
        tracing::debug!("{}: response status {status}", op.name);
        if status.is_success() {
            return Ok(res);
        }

        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);
        let err = ClientError::from_status(status, message, op);
        tracing::error!("{} failed: {err}", op.name);
        Err(err)
    }
}

fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw)
        .map_err(|err| ClientError::InvalidArgument(format!("invalid base url {raw}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidArgument(format!(
            "invalid base url {raw}"
        )));
    }
    Ok(url)
}

/// Appends path segments to a base url, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
