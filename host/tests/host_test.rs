//! Integration tests for the table host.
//!
//! These run on tokio's paused clock, so debounce windows elapse instantly
//! and deterministically.

use std::time::Duration;

use tableview_engine::{Error as EngineError, Record, RecordId};
use tableview_host::{Config, HostError, TableHandle, TableHost};
use tokio::time::{sleep, Instant};

fn sample() -> Vec<Record> {
    vec![
        Record::new(1, "Ana", "Ruiz", "Spain"),
        Record::new(2, "Bo", "Lee", "peru"),
        Record::new(3, "Cy", "Diaz", "Peru"),
    ]
}

fn ids(records: &[Record]) -> Vec<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
}

fn nums(values: &[i64]) -> Vec<RecordId> {
    values.iter().map(|&n| RecordId::Number(n)).collect()
}

async fn loaded() -> TableHandle {
    let (table, _task) = TableHost::spawn(&Config::default()).unwrap();
    assert_eq!(table.load(sample()).await.unwrap(), 3);
    table
}

#[tokio::test(start_paused = true)]
async fn example_scenario() {
    let table = loaded().await;

    table.set_filter("peru").await.unwrap();
    sleep(Duration::from_millis(600)).await;
    assert_eq!(ids(&table.displayed().await.unwrap()), nums(&[2, 3]));

    assert_eq!(table.delete(RecordId::Number(2)).await.unwrap(), 1);
    table.restore().await.unwrap();

    let snapshot = table.snapshot().await.unwrap();
    assert_eq!(snapshot.rendered_len, 3);
    assert_eq!(ids(&snapshot.displayed), nums(&[2, 3]));
}

#[tokio::test(start_paused = true)]
async fn newer_filter_cancels_pending_commit() {
    let table = loaded().await;

    table.set_filter("p").await.unwrap();
    sleep(Duration::from_millis(300)).await;
    table.set_filter("spain").await.unwrap();

    // Past the first deadline, short of the second.
    sleep(Duration::from_millis(300)).await;
    assert_eq!(table.displayed().await.unwrap().len(), 3);
    let snapshot = table.snapshot().await.unwrap();
    assert!(snapshot.filter_pending);
    assert_eq!(snapshot.applied_filter, "");

    sleep(Duration::from_millis(300)).await;
    assert_eq!(ids(&table.displayed().await.unwrap()), nums(&[1]));
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_commit_after_window() {
    let table = loaded().await;
    let mut view = table.subscribe();
    view.borrow_and_update();

    let started = Instant::now();
    table.set_filter("peru").await.unwrap();
    view.changed().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(ids(&view.borrow_and_update()), nums(&[2, 3]));
}

#[tokio::test(start_paused = true)]
async fn clearing_filter_publishes_without_waiting() {
    let table = loaded().await;
    table.set_filter("peru").await.unwrap();
    sleep(Duration::from_millis(600)).await;

    let mut view = table.subscribe();
    assert_eq!(view.borrow_and_update().len(), 2);

    let started = Instant::now();
    table.set_filter("").await.unwrap();

    assert!(view.has_changed().unwrap());
    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(ids(&view.borrow_and_update()), nums(&[1, 2, 3]));
    assert_eq!(table.displayed().await.unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_immediate_changes() {
    let table = loaded().await;
    let mut view = table.subscribe();
    view.borrow_and_update();

    table.delete(RecordId::Number(1)).await.unwrap();
    assert!(view.has_changed().unwrap());
    assert_eq!(ids(&view.borrow_and_update()), nums(&[2, 3]));

    // Unknown ids change nothing and notify nobody.
    table.delete(RecordId::Number(42)).await.unwrap();
    assert!(!view.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn commit_uses_latest_rendered() {
    let table = loaded().await;

    table.set_filter("peru").await.unwrap();
    table.delete(RecordId::Number(3)).await.unwrap();
    sleep(Duration::from_millis(600)).await;

    assert_eq!(ids(&table.displayed().await.unwrap()), nums(&[2]));
}

#[tokio::test(start_paused = true)]
async fn load_drops_pending_filter() {
    let table = loaded().await;

    table.set_filter("spain").await.unwrap();
    table.load(sample()).await.unwrap();
    sleep(Duration::from_millis(600)).await;

    let snapshot = table.snapshot().await.unwrap();
    assert_eq!(snapshot.filter_text, "");
    assert!(!snapshot.filter_pending);
    assert_eq!(snapshot.displayed.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn sort_toggles_per_column() {
    let table = loaded().await;

    let asc = ids(&table.sort_by_country().await.unwrap());
    let mut desc = ids(&table.sort_by_country().await.unwrap());
    desc.reverse();
    assert_eq!(asc, desc);

    let by_last = table.sort_by_key("last").await.unwrap();
    assert_eq!(ids(&by_last), nums(&[3, 2, 1]));
}

#[tokio::test(start_paused = true)]
async fn invalid_column_surfaces() {
    let table = loaded().await;

    let err = table.sort_by_key("thumbnail").await.unwrap_err();
    assert!(matches!(
        err,
        HostError::Engine(EngineError::InvalidColumn(ref key)) if key == "thumbnail"
    ));

    // The host keeps serving after a rejected call.
    assert_eq!(table.displayed().await.unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn load_envelope_json() {
    let (table, _task) = TableHost::spawn(&Config::default()).unwrap();

    let json = r#"{"results": [
        {"id": {"name": "DNI", "value": "1"}, "name": {"title": "Mr", "first": "Ike", "last": "Ono"},
         "location": {"country": "Japan"}, "picture": {"thumbnail": "t.jpg"}}
    ], "info": {"page": 1}}"#;
    assert_eq!(table.load_envelope_json(json).await.unwrap(), 1);

    let err = table.load_envelope_json("{}").await.unwrap_err();
    assert!(matches!(err, HostError::Engine(EngineError::InvalidPayload(_))));
}

#[tokio::test(start_paused = true)]
async fn never_loaded_stays_empty() {
    let (table, _task) = TableHost::spawn(&Config::default()).unwrap();

    assert!(table.displayed().await.unwrap().is_empty());
    assert!(table.sort_by_country().await.unwrap().is_empty());
    assert_eq!(table.delete(RecordId::Number(1)).await.unwrap(), 0);
    table.restore().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_every_handle() {
    let (table, task) = TableHost::spawn(&Config::default()).unwrap();
    let other = table.clone();

    table.shutdown().await.unwrap();
    task.await.unwrap();

    assert!(matches!(other.load(sample()).await, Err(HostError::Closed)));
    assert!(matches!(table.shutdown().await, Err(HostError::Closed)));
}

#[tokio::test]
async fn invalid_locale_fails_spawn() {
    let config = Config {
        locale: "not a locale!".to_string(),
        ..Config::default()
    };

    let err = TableHost::spawn(&config).unwrap_err();
    assert!(matches!(err, HostError::Engine(EngineError::InvalidLocale(_))));
}
