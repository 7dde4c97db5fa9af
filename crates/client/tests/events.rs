mod common;

use api_types::{Money, event::EventId, transaction::IncomeStatus};
use client::{ClientError, EventQuery};
use common::{EVENT_ID, client, credential, spawn};

#[tokio::test]
async fn detail_loads_budget_and_transactions() {
    let (state, base) = spawn().await;
    let client = client(&base);

    let detail = client.load_budget_detail(3, &credential()).await.unwrap();

    assert_eq!(detail.budget.id, Some(3));
    assert_eq!(detail.expenses.len(), 2);
    assert_eq!(detail.expenses[1].amount, Money::new(5_025));
    assert_eq!(detail.incomes.len(), 2);
    assert_eq!(detail.incomes[0].source.as_deref(), Some("Box office"));
    assert_eq!(detail.incomes[1].status, IncomeStatus::Expected);
    assert_eq!(state.hits("list_expenses"), 1);
    assert_eq!(state.hits("list_incomes"), 1);
}

#[tokio::test]
async fn detail_absorbs_failing_expenses() {
    let (state, base) = spawn().await;
    state.fail_expenses();
    let client = client(&base);

    let detail = client.load_budget_detail(3, &credential()).await.unwrap();

    assert!(detail.expenses.is_empty());
    assert_eq!(detail.incomes.len(), 2);
}

#[tokio::test]
async fn detail_of_missing_budget_fails() {
    let (state, base) = spawn().await;
    let client = client(&base);

    let err = client
        .load_budget_detail(404, &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotFound));
    assert_eq!(state.hits("list_expenses"), 0);
}

#[tokio::test]
async fn expense_listing_failure_is_classified() {
    let (state, base) = spawn().await;
    state.fail_expenses();
    let client = client(&base);

    let err = client
        .fetch_expenses_by_budget(3, 0, 20, &credential())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::RemoteRejected { status: 500, ref message } if message == "Database unavailable"
    ));
}

#[tokio::test]
async fn event_listing_forwards_filters() {
    let (state, base) = spawn().await;
    let client = client(&base);
    let query = EventQuery {
        page: 1,
        size: 5,
        search: Some("gala".to_string()),
        status: Some("PUBLISHED".to_string()),
        ..EventQuery::default()
    };

    let page = client.list_events(&query, &credential()).await.unwrap();

    assert_eq!(
        state.last_query.lock().unwrap().as_deref(),
        Some("page=1&size=5&search=gala&status=PUBLISHED")
    );
    let names: Vec<_> = page.content.iter().map(|e| e.display_name()).collect();
    assert_eq!(names, ["RustConf", "Spring Gala"]);
    assert_eq!(page.content[0].id, Some(EventId::from(EVENT_ID)));
    assert_eq!(page.content[0].organizer_id, Some(EventId::from("u-7")));
    assert_eq!(page.content[1].id, Some(EventId::Number(20)));
}

#[tokio::test]
async fn event_is_addressed_by_document_id() {
    let (state, base) = spawn().await;
    let client = client(&base);

    let event = client.get_event(EVENT_ID, &credential()).await.unwrap();
    assert_eq!(event.id, Some(EventId::from(EVENT_ID)));
    assert_eq!(event.display_name(), "RustConf");

    let err = client.get_event("missing", &credential()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
    assert_eq!(state.hits("get_event"), 2);
}

#[tokio::test]
async fn events_by_category_encodes_path() {
    let (state, base) = spawn().await;
    let client = client(&base);

    let events = client
        .events_by_category("Tech Talks", &credential())
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category.as_deref(), Some("Tech Talks"));
    assert_eq!(state.hits("events_by_category"), 1);
}

#[tokio::test]
async fn event_status_is_patched() {
    let (_state, base) = spawn().await;
    let client = client(&base);

    let event = client
        .update_event_status(EVENT_ID, "CANCELLED", &credential())
        .await
        .unwrap();

    assert_eq!(event.id, Some(EventId::from(EVENT_ID)));
    assert_eq!(event.status.as_deref(), Some("CANCELLED"));
}
