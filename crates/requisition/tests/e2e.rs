//! End-to-end tests: the form and list view models driven against a live
//! request store over HTTP.

mod common;

use requisition::client::{ClientError, RequestStoreClient};
use requisition::config::FormConfig;
use requisition::form::{LookupState, RequestForm, SubmitOutcome};
use requisition::model::{LookupKind, RequestAction};
use requisition::table::{records_from_requests, ColumnId, TableState};

use common::{PayloadBuilder, TestHarness};

#[tokio::test]
async fn test_lookups_over_http() {
    let harness = TestHarness::start().await;
    let client = harness.client();

    let branches = client.list_lookup(LookupKind::Branch).await.unwrap();
    let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Gensan", "Manila", "Cebu"]);

    let departments = client.list_lookup(LookupKind::Department).await.unwrap();
    assert_eq!(departments.len(), 4);

    let mis = client.list_lookup(LookupKind::MisName).await.unwrap();
    assert_eq!(mis[0].name, "MIS-001");

    harness.stop().await;
}

#[tokio::test]
async fn test_form_save_round_trip() {
    let harness = TestHarness::start().await;
    let client = harness.client();

    let mut form = RequestForm::new(&FormConfig::default());
    form.mount(&client).await;
    assert!(matches!(form.lookups(), LookupState::Ready(_)));

    form.set_details("Buy paper");
    form.select_lookup(LookupKind::Branch, Some(2)).unwrap();
    form.select_lookup(LookupKind::Department, Some(1)).unwrap();

    assert_eq!(form.submit(&client, RequestAction::Save).await, SubmitOutcome::Saved);

    let rows = client.list_requests().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].request_details, "Buy paper");
    assert_eq!(rows[0].branch_id, Some(2));
    assert_eq!(rows[0].dept_id, Some(1));
    assert_eq!(rows[0].mis_id, None);

    harness.stop().await;
}

#[tokio::test]
async fn test_form_update_overwrites_row() {
    let harness = TestHarness::start().await;
    let client = harness.client();
    client
        .submit_request(&PayloadBuilder::save("Buy paper").branch(1).mis(2).build())
        .await
        .unwrap();

    let mut form = RequestForm::new(&FormConfig::default());
    form.mount(&client).await;
    form.set_details("Buy toner");
    form.set_request_id(Some(1));

    assert_eq!(form.submit(&client, RequestAction::Update).await, SubmitOutcome::Updated);

    let rows = client.list_requests().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].request_details, "Buy toner");
    assert_eq!(rows[0].branch_id, None);
    assert_eq!(rows[0].mis_id, None);

    harness.stop().await;
}

#[tokio::test]
async fn test_update_without_id_over_http() {
    let harness = TestHarness::start().await;
    let client = harness.client();

    let mut payload = PayloadBuilder::update(1, "Buy paper").build();
    payload.id = None;
    let err = client.submit_request(&payload).await.unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "ID is required for update");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    harness.stop().await;
}

#[tokio::test]
async fn test_broken_store_surfaces_messages() {
    let harness = TestHarness::start_broken().await;
    let client = harness.client();

    let err = client.list_lookup(LookupKind::Branch).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch branches");

    let mut form = RequestForm::new(&FormConfig::default());
    form.mount(&client).await;
    assert!(matches!(form.lookups(), LookupState::Unavailable { .. }));

    harness.stop().await;
}

#[tokio::test]
async fn test_write_failure_banner_shows_cause() {
    let harness = TestHarness::start_broken().await;
    let client = harness.client();

    let err = client
        .submit_request(&PayloadBuilder::save("Buy paper").build())
        .await
        .unwrap_err();
    match err {
        ClientError::Server { status, .. } => assert_eq!(status, 500),
        other => panic!("expected server error, got {other:?}"),
    }

    harness.stop().await;
}

#[tokio::test]
async fn test_unreachable_store_uses_generic_message() {
    let harness = TestHarness::start().await;
    let client = harness.client();
    harness.stop().await;

    let err = client.list_requests().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message(), requisition::client::GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_list_view_from_stored_requests() {
    let harness = TestHarness::start().await;
    let client = harness.client();

    for (details, branch) in [("Buy paper", 1), ("Buy ink", 2), ("Fix printer", 1)] {
        client
            .submit_request(&PayloadBuilder::save(details).branch(branch).department(3).build())
            .await
            .unwrap();
    }

    let rows = client.list_requests().await.unwrap();
    let branches = client.list_lookup(LookupKind::Branch).await.unwrap();
    let departments = client.list_lookup(LookupKind::Department).await.unwrap();
    let mis = client.list_lookup(LookupKind::MisName).await.unwrap();
    let records = records_from_requests(&rows, &branches, &departments, &mis);

    let mut table = TableState::new(records, 2);
    assert_eq!(table.summary().to_string(), "Showing 2 of 3 entries");

    let mut popup = table.open_filter(ColumnId::Branch).unwrap();
    assert_eq!(popup.candidates(), &["Gensan", "Manila"]);
    popup.toggle("Gensan", true);
    table.apply_filter(popup);

    let details: Vec<_> = table
        .filtered_rows()
        .iter()
        .map(|r| r.record.request_details.clone())
        .collect();
    assert_eq!(details, vec!["Buy paper", "Fix printer"]);
    assert!(table
        .filtered_rows()
        .iter()
        .all(|r| r.record.department == "Finance"));

    harness.stop().await;
}

#[tokio::test]
async fn test_database_opens_on_first_request() {
    let harness = TestHarness::start().await;
    assert!(!harness.state.db.is_initialized());
    assert!(!harness.db_path.exists());

    harness.client().list_requests().await.unwrap();

    assert!(harness.state.db.is_initialized());
    assert!(harness.db_path.exists());
    harness.stop().await;
}
