#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, patch},
};
use client::{Client, ClientConfig, Credential};
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";

/// Document id the mock event service uses for its first event.
pub const EVENT_ID: &str = "64f1a2b3c4d5e6f708091011";

/// What the mock answers to the next budget create/update.
#[derive(Clone, Copy, Debug)]
pub enum Plan {
    Status(u16),
    Hang(Duration),
}

#[derive(Debug)]
pub struct MockState {
    hits: Mutex<HashMap<&'static str, usize>>,
    pub budgets_body: Mutex<Value>,
    pub delete_statuses: Mutex<VecDeque<u16>>,
    pub mutation_plan: Mutex<VecDeque<Plan>>,
    pub fail_expenses: AtomicBool,
    pub last_query: Mutex<Option<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            hits: Mutex::default(),
            budgets_body: Mutex::new(json!([budget_json(1), budget_json(2)])),
            delete_statuses: Mutex::default(),
            mutation_plan: Mutex::default(),
            fail_expenses: AtomicBool::new(false),
            last_query: Mutex::default(),
        }
    }
}

impl MockState {
    pub fn hits(&self, route: &str) -> usize {
        self.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    fn hit(&self, route: &'static str) {
        *self.hits.lock().unwrap().entry(route).or_default() += 1;
    }

    pub fn script_deletes(&self, statuses: &[u16]) {
        self.delete_statuses.lock().unwrap().extend(statuses);
    }

    pub fn plan_mutations(&self, plan: &[Plan]) {
        self.mutation_plan.lock().unwrap().extend(plan);
    }

    pub fn fail_expenses(&self) {
        self.fail_expenses.store(true, Ordering::SeqCst);
    }
}

pub fn budget_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Budget {id}"),
        "eventId": id * 10,
        "totalBudget": 5000,
        "currentExpenses": 1200.5,
        "currentIncome": 0,
        "categories": ["Venue", "Catering"],
        "status": "ACTIVE",
        "createdAt": "2024-01-01T00:00:00"
    })
}

fn envelope(content: Vec<Value>) -> Value {
    let len = content.len();
    json!({
        "content": content,
        "totalPages": 1,
        "totalElements": len,
        "size": 20,
        "number": 0,
        "first": true,
        "last": true
    })
}

fn rejection(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap(),
        Json(json!({ "message": message, "status": status })),
    )
}

async fn list_budgets(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    state.hit("list_budgets");
    *state.last_query.lock().unwrap() = query;
    Json(state.budgets_body.lock().unwrap().clone())
}

async fn get_budget(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    state.hit("get_budget");
    let expected = format!("Bearer {TOKEN}");
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return rejection(401, "Unauthorized");
    }
    if id == 404 {
        return rejection(404, "Budget not found");
    }
    (StatusCode::OK, Json(budget_json(id)))
}

async fn mutate(state: &MockState, id: i64, mut body: Value) -> (StatusCode, Json<Value>) {
    let plan = state
        .mutation_plan
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(Plan::Status(200));
    match plan {
        Plan::Hang(delay) => tokio::time::sleep(delay).await,
        Plan::Status(status) if status >= 300 => {
            return rejection(status, "Budget name already exists");
        }
        Plan::Status(_) => {}
    }
    body["id"] = json!(id);
    (StatusCode::OK, Json(body))
}

async fn create_budget(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hit("create_budget");
    mutate(&state, 99, body).await
}

async fn update_budget(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hit("update_budget");
    if id == 404 {
        return rejection(404, "Budget not found");
    }
    mutate(&state, id, body).await
}

async fn delete_budget(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
) -> (StatusCode, String) {
    state.hit("delete_budget");
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            json!({"message": "Budget not found"}).to_string(),
        );
    }
    let status = state
        .delete_statuses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(204);
    let status = StatusCode::from_u16(status).unwrap();
    if status.is_success() {
        (status, String::new())
    } else {
        (status, json!({"error": "Service Unavailable"}).to_string())
    }
}

async fn list_expenses(
    State(state): State<Arc<MockState>>,
    Path(budget_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    state.hit("list_expenses");
    if state.fail_expenses.load(Ordering::SeqCst) {
        return rejection(500, "Database unavailable");
    }
    let expenses = vec![
        json!({"id": 1, "budgetId": budget_id, "category": "Venue", "amount": 800, "date": "2024-05-01", "status": "PAID"}),
        json!({"id": 2, "budgetId": budget_id, "category": "", "amount": 50.25, "date": "2024-05-03T10:00:00", "status": "PENDING"}),
    ];
    (StatusCode::OK, Json(envelope(expenses)))
}

async fn list_incomes(
    State(state): State<Arc<MockState>>,
    Path(budget_id): Path<i64>,
) -> Json<Value> {
    state.hit("list_incomes");
    Json(envelope(vec![
        json!({"id": 7, "budgetId": budget_id, "category": "Tickets", "amount": 300, "date": "2024-05-02", "source": "Box office", "status": "RECEIVED"}),
        json!({"id": 8, "budgetId": budget_id, "category": "Sponsorship", "amount": 1000, "date": "2024-05-04", "source": "Acme", "status": "EXPECTED"}),
    ]))
}

async fn list_events(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    state.hit("list_events");
    *state.last_query.lock().unwrap() = query;
    Json(envelope(vec![
        json!({
            "id": EVENT_ID,
            "name": "RustConf",
            "category": "Tech",
            "status": "PUBLISHED",
            "organizerId": "u-7"
        }),
        json!({"id": 20, "title": "Spring Gala"}),
    ]))
}

async fn get_event(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.hit("get_event");
    if id != EVENT_ID {
        return rejection(404, "Event not found");
    }
    (
        StatusCode::OK,
        Json(json!({"id": id, "title": "RustConf", "organizerId": "u-7"})),
    )
}

async fn budget_by_event(
    State(state): State<Arc<MockState>>,
    Path(event_id): Path<String>,
) -> Json<Value> {
    state.hit("budget_by_event");
    if event_id == "slow" {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    let mut body = budget_json(5);
    body["eventId"] = json!(event_id);
    Json(body)
}

async fn events_by_category(
    State(state): State<Arc<MockState>>,
    Path(category): Path<String>,
) -> Json<Value> {
    state.hit("events_by_category");
    Json(json!([{ "id": 30, "name": "Meetup", "category": category }]))
}

async fn update_event_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.hit("update_event_status");
    Json(json!({ "id": id, "name": "RustConf", "status": body["status"] }))
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/budgets", get(list_budgets).post(create_budget))
        .route(
            "/api/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route("/api/budgets/event/{event_id}", get(budget_by_event))
        .route("/api/expenses/budget/{id}", get(list_expenses))
        .route("/api/incomes/budget/{id}", get(list_incomes))
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/events/category/{category}", get(events_by_category))
        .route("/api/events/{id}/status", patch(update_event_status))
        .with_state(state)
}

/// Starts the mock backend and returns its state and `/api` base url.
pub async fn spawn() -> (Arc<MockState>, String) {
    let state = Arc::new(MockState::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (state, format!("http://{addr}/api"))
}

/// Base url of a port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        budget_api_url: base_url.to_string(),
        event_api_url: base_url.to_string(),
        delete_backoff: Duration::from_millis(50),
        item_timeout: Duration::from_millis(300),
        system_proxy: false,
        ..ClientConfig::default()
    }
}

pub fn client(base_url: &str) -> Client {
    Client::new(test_config(base_url)).unwrap()
}

pub fn credential() -> Credential {
    Credential::bearer(TOKEN).unwrap()
}
