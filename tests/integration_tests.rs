use std::sync::Arc;

use orderdesk::state::{OrderEvent, OrderState};
use orderdesk_core::{NewOrder, OrderStore, StorageError};
use orderdesk_memory::MemoryStore;
use orderdesk_sqlite::SqliteStore;

fn new_order(name: &str, description: Option<&str>, amount: f64) -> NewOrder {
    NewOrder {
        name: name.to_string(),
        description: description.map(str::to_string),
        amount,
    }
}

fn setup() -> (Arc<MemoryStore>, OrderState) {
    let store = Arc::new(MemoryStore::new());
    (store.clone(), OrderState::new(store))
}

#[tokio::test]
async fn save_appends_to_list_and_storage() {
    let (store, state) = setup();

    let saved = state
        .save(new_order("Widget", Some("a widget"), 12.5))
        .await
        .unwrap();

    let orders = state.orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].name, "Widget");
    assert_eq!(orders[0].description.as_deref(), Some("a widget"));
    assert_eq!(orders[0].amount, 12.5);
    assert_eq!(orders[0].id, saved.id);

    // storage holds a matching row
    let row = store.get_order(saved.id).await.unwrap();
    assert_eq!(row, saved);
}

#[tokio::test]
async fn load_mirrors_storage_ids() {
    let (store, state) = setup();

    // rows written outside the state container are picked up wholesale
    store.insert_order(new_order("A", None, 1.0)).await.unwrap();
    store.insert_order(new_order("B", None, 2.0)).await.unwrap();
    let c = store.insert_order(new_order("C", None, 3.0)).await.unwrap();
    store.delete_order(c.id).await.unwrap();

    state.load().await.unwrap();

    let mut listed: Vec<_> = state.orders().await.iter().map(|o| o.id).collect();
    let mut stored: Vec<_> = store.list_orders().await.unwrap().iter().map(|o| o.id).collect();
    listed.sort_unstable();
    stored.sort_unstable();
    assert_eq!(listed, stored);
}

#[tokio::test]
async fn delete_removes_from_list_and_storage() {
    let (store, state) = setup();
    let saved = state.save(new_order("Widget", None, 5.0)).await.unwrap();

    state.delete(saved.id).await.unwrap();

    assert!(state.orders().await.is_empty());
    assert!(matches!(
        store.get_order(saved.id).await,
        Err(StorageError::OrderNotFound(_))
    ));
}

#[tokio::test]
async fn delete_of_missing_id_is_an_error() {
    let (_, state) = setup();
    let err = state.delete(99).await.unwrap_err();
    assert!(matches!(err, StorageError::OrderNotFound(99)));
}

#[tokio::test]
async fn save_then_load_round_trips_field_values() {
    let (_, state) = setup();
    let saved = state
        .save(new_order("Gadget", Some("blue"), 0.25))
        .await
        .unwrap();

    state.load().await.unwrap();

    let orders = state.orders().await;
    assert_eq!(orders, vec![saved]);
}

#[tokio::test]
async fn widget_scenario() {
    // save {name: "Widget", description: absent, amount: 12.5},
    // then delete the assigned id; the list ends up empty.
    let (_, state) = setup();

    let saved = state.save(new_order("Widget", None, 12.5)).await.unwrap();
    assert_eq!(saved.name, "Widget");
    assert_eq!(saved.description, None);
    assert_eq!(saved.amount, 12.5);
    assert_eq!(state.orders().await.len(), 1);

    state.delete(saved.id).await.unwrap();
    assert!(state.orders().await.is_empty());
}

#[tokio::test]
async fn views_observe_state_changes() {
    let (_, state) = setup();
    let mut events = state.subscribe();

    let saved = state.save(new_order("Widget", None, 1.0)).await.unwrap();
    state.load().await.unwrap();
    state.delete(saved.id).await.unwrap();

    assert!(matches!(events.recv().await, Ok(OrderEvent::Saved(o)) if o.id == saved.id));
    assert!(matches!(events.recv().await, Ok(OrderEvent::Loaded(1))));
    assert!(matches!(events.recv().await, Ok(OrderEvent::Deleted(id)) if id == saved.id));
}

#[tokio::test]
async fn sqlite_backed_state_synchronizes() {
    let store = Arc::new(SqliteStore::open(":memory:").unwrap());
    let state = OrderState::new(store.clone());

    let saved = state
        .save(new_order("Widget", Some("durable"), 7.5))
        .await
        .unwrap();
    assert!(saved.id > 0);

    state.load().await.unwrap();
    assert_eq!(state.orders().await, vec![saved.clone()]);

    state.delete(saved.id).await.unwrap();
    assert!(state.orders().await.is_empty());
    assert!(store.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.db");
    let path = path.to_str().unwrap();

    let saved = {
        let state = OrderState::new(Arc::new(SqliteStore::open(path).unwrap()));
        state.save(new_order("Widget", None, 12.5)).await.unwrap()
    };

    // a fresh process sees the durable copy
    let state = OrderState::new(Arc::new(SqliteStore::open(path).unwrap()));
    state.load().await.unwrap();
    assert_eq!(state.orders().await, vec![saved]);
}
