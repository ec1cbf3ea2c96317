use std::sync::Arc;

use dioxus::prelude::*;
use fahm_core::model::{ExamId, LearnerId, Tier};
use storage::repository::{AccountRecord, AccountRepository, Storage, StorageError};

use super::dashboard::{SaveNotice, remember_exam};
use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::DashboardState;

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_free_learner() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    for expected in [
        "Qudurat",
        "Free Practice",
        "Access to worlds 1-2",
        "World 1",
        "World 10",
        "Start Practice",
        "Upgrade to unlock",
        "Unlock all 10 worlds",
        "View Pricing Plans",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_premium_with_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    let learner = harness.learner_id;
    let tahsili = ExamId::new("tahsili").unwrap();
    harness
        .services
        .accounts()
        .upgrade(learner, Tier::Premium)
        .await
        .unwrap();
    harness
        .services
        .accounts()
        .select_exam(learner, &tahsili)
        .await
        .unwrap();
    harness
        .services
        .progress()
        .record(learner, &tahsili, 9, 100)
        .await
        .unwrap();

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Tahsili"), "missing exam name in {html}");
    assert!(html.contains("Access to worlds 1-10"), "missing access line in {html}");
    assert!(html.contains("✓ Completed"), "missing completed CTA in {html}");
    assert!(!html.contains("Upgrade to unlock"), "unexpected lock in {html}");
    assert!(!html.contains("Unlock all"), "unexpected prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn pricing_smoke_marks_current_plan() {
    let mut harness = setup_view_harness(ViewKind::Pricing);
    harness
        .services
        .accounts()
        .change_tier(harness.learner_id, Tier::Basic)
        .await
        .unwrap();

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Current plan"), "missing current marker in {html}");
    assert!(html.contains("SAR 199 / 3 months"), "missing basic price in {html}");
    assert!(html.contains("SAR 299 / 6 months"), "missing premium price in {html}");
    assert!(html.contains("Upgrade to Premium"), "missing upgrade CTA in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn demo_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Demo);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains(r#"lang="en""#), "missing lang attribute in {html}");
    assert!(html.contains("If x + 5 = 12"), "missing prompt in {html}");
    assert!(!html.contains("Next Question"), "feedback shown too early in {html}");
}

struct FailingAccounts;

#[async_trait::async_trait]
impl AccountRepository for FailingAccounts {
    async fn get_account(&self, _learner: LearnerId) -> Result<Option<AccountRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn upsert_account(&self, _account: &AccountRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_error_state() {
    let storage = Storage {
        accounts: Arc::new(FailingAccounts),
        ..Storage::in_memory()
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Dashboard, &storage);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

struct ReadOnlyAccounts;

#[async_trait::async_trait]
impl AccountRepository for ReadOnlyAccounts {
    async fn get_account(&self, _learner: LearnerId) -> Result<Option<AccountRecord>, StorageError> {
        Ok(None)
    }

    async fn upsert_account(&self, _account: &AccountRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".to_string()))
    }
}

#[component]
fn UnsavedExamNotice() -> Element {
    let mut state = DashboardState::default();
    state.exam_not_saved();
    let message = state.save_notice().unwrap_or_default().to_owned();
    rsx! { SaveNotice { message } }
}

#[tokio::test(flavor = "current_thread")]
async fn failed_exam_save_is_reported() {
    let storage = Storage {
        accounts: Arc::new(ReadOnlyAccounts),
        ..Storage::in_memory()
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Dashboard, &storage);
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("Qudurat"));

    let tahsili = ExamId::new("tahsili").unwrap();
    let accounts = harness.services.accounts();
    assert!(!remember_exam(&accounts, harness.learner_id, &tahsili).await);

    let mut dom = VirtualDom::new(UnsavedExamNotice);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("could not be saved"), "missing save notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn successful_exam_save_persists_choice() {
    let harness = setup_view_harness(ViewKind::Dashboard);
    let tahsili = ExamId::new("tahsili").unwrap();
    let accounts = harness.services.accounts();
    assert!(remember_exam(&accounts, harness.learner_id, &tahsili).await);

    let dashboard = harness
        .services
        .dashboard()
        .load(harness.learner_id, None)
        .await
        .unwrap();
    assert_eq!(dashboard.exam_id, tahsili);
}
