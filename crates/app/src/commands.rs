use std::collections::HashMap;

use api_types::event::EventId;
use client::{BudgetDetail, Client, Credential, EventQuery};
use engine::{BudgetReport, filter_budgets};
use serde::Serialize;

use crate::{
    cli::{BudgetsArgs, Command, EventsArgs, TransactionArgs},
    error::Result,
    render,
    settings::Settings,
};

/// Events fetched to resolve the event names shown next to budgets.
const EVENT_LOOKUP_SIZE: u32 = 100;

pub struct Context {
    pub client: Client,
    pub credential: Credential,
    pub page_size: u32,
    pub json: bool,
}

impl Context {
    pub fn new(settings: &Settings, json: bool) -> Result<Self> {
        Ok(Self {
            client: Client::new(settings.client_config())?,
            credential: settings.credential()?,
            page_size: settings.page_size,
            json,
        })
    }

    /// Runs `command` and returns what should be printed.
    pub async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::Budgets(args) => self.budgets(args).await,
            Command::Budget { id } => self.budget(id).await,
            Command::BudgetDelete { id } => self.budget_delete(&id).await,
            Command::Expenses(args) => self.expenses(args).await,
            Command::Incomes(args) => self.incomes(args).await,
            Command::Events(args) => self.events(args).await,
        }
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    async fn budgets(&self, args: BudgetsArgs) -> Result<String> {
        let size = args.size.unwrap_or(self.page_size);
        let page = self
            .client
            .fetch_budgets(args.page, size, args.refresh, &self.credential)
            .await?;

        let names = self.event_names().await;
        let event_name = |id: &EventId| event_label(&names, id);
        let shown = match args.search.as_deref() {
            Some(term) => filter_budgets(&page.content, term, &event_name),
            None => page.content.iter().collect(),
        };

        if self.json {
            return Self::to_json(&shown);
        }
        Ok(render::budgets(&page, &shown, event_name))
    }

    /// Display names of the first events, keyed by the id's text. A failing
    /// event service only costs the names.
    async fn event_names(&self) -> HashMap<String, String> {
        let query = EventQuery {
            size: EVENT_LOOKUP_SIZE,
            ..EventQuery::default()
        };
        match self.client.list_events(&query, &self.credential).await {
            Ok(page) => page
                .content
                .iter()
                .filter_map(|event| {
                    let id = event.id.as_ref()?;
                    Some((id.to_string(), event.display_name()))
                })
                .collect(),
            Err(err) => {
                tracing::warn!("could not load event names: {err}");
                HashMap::new()
            }
        }
    }

    async fn budget(&self, id: i64) -> Result<String> {
        let detail = self.client.load_budget_detail(id, &self.credential).await?;
        let report = BudgetReport::build(&detail.budget, &detail.expenses, &detail.incomes);

        if self.json {
            #[derive(Serialize)]
            struct View<'a> {
                #[serde(flatten)]
                detail: &'a BudgetDetail,
                report: &'a BudgetReport,
            }
            return Self::to_json(&View {
                detail: &detail,
                report: &report,
            });
        }
        Ok(render::report(&detail.budget, &report))
    }

    async fn budget_delete(&self, id: &str) -> Result<String> {
        let confirmation = self.client.delete_budget(id, &self.credential).await?;
        if self.json {
            return Self::to_json(&confirmation);
        }
        Ok(format!("{}\n", confirmation.message))
    }

    async fn expenses(&self, args: TransactionArgs) -> Result<String> {
        let page = self
            .client
            .fetch_expenses_by_budget(args.budget_id, args.page, args.size, &self.credential)
            .await?;
        if self.json {
            return Self::to_json(&page);
        }
        Ok(render::expenses(&page))
    }

    async fn incomes(&self, args: TransactionArgs) -> Result<String> {
        let page = self
            .client
            .fetch_incomes_by_budget(args.budget_id, args.page, args.size, &self.credential)
            .await?;
        if self.json {
            return Self::to_json(&page);
        }
        Ok(render::incomes(&page))
    }

    async fn events(&self, args: EventsArgs) -> Result<String> {
        let query = EventQuery {
            page: args.page,
            size: args.size.unwrap_or(self.page_size),
            search: args.search,
            ..EventQuery::default()
        };
        let page = self.client.list_events(&query, &self.credential).await?;
        if self.json {
            return Self::to_json(&page);
        }
        Ok(render::events(&page))
    }
}

/// Budgets reference events by number or by document id; both are looked up
/// by their text.
fn event_label(names: &HashMap<String, String>, id: &EventId) -> String {
    let key = id.to_string();
    names
        .get(&key)
        .cloned()
        .unwrap_or_else(|| format!("Event {key}"))
}
