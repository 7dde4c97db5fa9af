use api_types::{
    event::{Event, EventStatusUpdate},
    page::{PaginatedCollection, RawListResponse},
};
use reqwest::Url;

use crate::{Client, ClientError, Credential, error::Operation};

const LIST_EVENTS: Operation = Operation::new("fetch events", "Failed to fetch events");
const GET_EVENT: Operation = Operation::new("fetch event", "Failed to fetch event");
const CREATE_EVENT: Operation =
    Operation::new("create event", "Failed to create event").without_not_found();
const UPDATE_EVENT: Operation = Operation::new("update event", "Failed to update event");
const DELETE_EVENT: Operation = Operation::new("delete event", "Failed to delete event");
const UPCOMING_EVENTS: Operation =
    Operation::new("fetch upcoming events", "Failed to fetch upcoming events");
const EVENTS_BY_CATEGORY: Operation =
    Operation::new("fetch events by category", "Failed to fetch events");
const EVENTS_BY_ORGANIZER: Operation =
    Operation::new("fetch events by organizer", "Failed to fetch events");
const UPDATE_EVENT_STATUS: Operation =
    Operation::new("update event status", "Failed to update event status");

/// Filters of the event listing. Empty filters are left out of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: None,
            search: None,
            category: None,
            status: None,
        }
    }
}

impl EventQuery {
    fn apply(&self, url: &mut Url) {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("page", &self.page.to_string())
            .append_pair("size", &self.size.to_string());
        let filters = [
            ("sort", &self.sort),
            ("search", &self.search),
            ("category", &self.category),
            ("status", &self.status),
        ];
        for (key, value) in filters {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.append_pair(key, value);
            }
        }
    }
}

impl Client {
    pub async fn list_events(
        &self,
        query: &EventQuery,
        credential: &Credential,
    ) -> Result<PaginatedCollection<Event>, ClientError> {
        let mut url = self.event_url(&["events"]);
        query.apply(&mut url);
        let req = self.http.get(url).timeout(self.config.listing_timeout);
        let raw: RawListResponse<Event> = self.send(req, credential, &LIST_EVENTS).await?;
        Ok(raw.into_page(query.page, query.size))
    }

    pub async fn get_event(&self, id: &str, credential: &Credential) -> Result<Event, ClientError> {
        let req = self
            .http
            .get(self.event_url(&["events", id]))
            .timeout(self.config.item_timeout);
        self.send(req, credential, &GET_EVENT).await
    }

    pub async fn create_event(
        &self,
        event: &Event,
        credential: &Credential,
    ) -> Result<Event, ClientError> {
        let req = self.http.post(self.event_url(&["events"])).json(event);
        let created: Event = self.send(req, credential, &CREATE_EVENT).await?;
        tracing::info!("created event {:?}", created.id);
        Ok(created)
    }

    pub async fn update_event(
        &self,
        id: &str,
        event: &Event,
        credential: &Credential,
    ) -> Result<Event, ClientError> {
        let req = self.http.put(self.event_url(&["events", id]))
            .json(event);
        let updated = self.send(req, credential, &UPDATE_EVENT).await?;
        tracing::info!("updated event {id}");
        Ok(updated)
    }

    pub async fn delete_event(&self, id: &str, credential: &Credential) -> Result<(), ClientError> {
        let req = self.http.delete(self.event_url(&["events", id]));
        self.send_optional(req, credential, &DELETE_EVENT).await?;
        tracing::info!("deleted event {id}");
        Ok(())
    }

    pub async fn upcoming_events(&self, credential: &Credential) -> Result<Vec<Event>, ClientError> {
        let req = self.http.get(self.event_url(&["events", "upcoming"]));
        self.send(req, credential, &UPCOMING_EVENTS).await
    }

    pub async fn events_by_category(
        &self,
        category: &str,
        credential: &Credential,
    ) -> Result<Vec<Event>, ClientError> {
        if category.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "event category must not be empty".to_string(),
            ));
        }
        let req = self
            .http
            .get(self.event_url(&["events", "category", category]));
        self.send(req, credential, &EVENTS_BY_CATEGORY).await
    }

    pub async fn events_by_organizer(
        &self,
        organizer_id: &str,
        credential: &Credential,
    ) -> Result<Vec<Event>, ClientError> {
        let req = self
            .http
            .get(self.event_url(&["events", "organizer", organizer_id]));
        self.send(req, credential, &EVENTS_BY_ORGANIZER).await
    }

    pub async fn update_event_status(
        &self,
        id: &str,
        status: &str,
        credential: &Credential,
    ) -> Result<Event, ClientError> {
        let body = EventStatusUpdate {
            status: status.to_string(),
        };
        let req = self
            .http
            .patch(self.event_url(&["events", id, "status"]))
            .json(&body);
        let updated = self.send(req, credential, &UPDATE_EVENT_STATUS).await?;
        tracing::info!("event {id} moved to status {status}");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(query: &EventQuery) -> String {
        let mut url = Url::parse("http://localhost:8081/api/events").unwrap();
        query.apply(&mut url);
        url.query().unwrap_or_default().to_string()
    }

    #[test]
    fn default_query_has_paging_only() {
        assert_eq!(render(&EventQuery::default()), "page=0&size=10");
    }

    #[test]
    fn filters_are_appended_in_order_and_encoded() {
        let query = EventQuery {
            page: 2,
            size: 25,
            sort: Some("date,asc".to_string()),
            search: Some("rust meetup".to_string()),
            category: None,
            status: Some("PUBLISHED".to_string()),
        };
        assert_eq!(
            render(&query),
            "page=2&size=25&sort=date%2Casc&search=rust+meetup&status=PUBLISHED"
        );
    }

    #[test]
    fn empty_filters_are_skipped() {
        let query = EventQuery {
            search: Some(String::new()),
            ..EventQuery::default()
        };
        assert_eq!(render(&query), "page=0&size=10");
    }
}
