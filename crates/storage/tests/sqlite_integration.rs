use chrono::Duration;
use fahm_core::model::{ExamId, LearnerId, ProgressMap, Tier, UnitProgress};
use fahm_core::time::fixed_now;
use storage::repository::{AccountRecord, AccountRepository, ProgressRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_account_round_trip_and_update() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_accounts?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let learner = LearnerId::new(7);
    assert!(repo.get_account(learner).await.unwrap().is_none());

    let mut account = AccountRecord::new(learner, Tier::Premium, fixed_now());
    account.display_name = Some("Sara".into());
    account.selected_exam = Some("tahsili".into());
    repo.upsert_account(&account).await.unwrap();

    let fetched = repo.get_account(learner).await.unwrap().expect("account");
    assert_eq!(fetched, account);

    account.tier = Some(Tier::Free.as_str().into());
    account.updated_at = fixed_now() + Duration::days(1);
    repo.upsert_account(&account).await.unwrap();
    let downgraded = repo.get_account(learner).await.unwrap().expect("account");
    assert_eq!(downgraded.tier(), Tier::Free);
    assert_eq!(downgraded.display_name.as_deref(), Some("Sara"));
}

#[tokio::test]
async fn sqlite_keeps_raw_unknown_tier() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_raw_tier?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let learner = LearnerId::new(8);
    let mut account = AccountRecord::new(learner, Tier::Basic, fixed_now());
    account.tier = Some("gold".into());
    repo.upsert_account(&account).await.unwrap();

    let fetched = repo.get_account(learner).await.unwrap().expect("account");
    assert_eq!(fetched.tier.as_deref(), Some("gold"));
    assert_eq!(fetched.tier(), Tier::Free);
}

#[tokio::test]
async fn sqlite_progress_upserts_per_unit() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running migrations twice is a no-op.
    repo.migrate().await.expect("migrate again");

    let learner = LearnerId::new(1);
    let qudurat = ExamId::new("qudurat").unwrap();
    let tahsili = ExamId::new("tahsili").unwrap();

    repo.upsert_progress(learner, &qudurat, 0, UnitProgress::COMPLETE, fixed_now())
        .await
        .unwrap();
    repo.upsert_progress(learner, &qudurat, 1, UnitProgress::new(20).unwrap(), fixed_now())
        .await
        .unwrap();
    repo.upsert_progress(learner, &qudurat, 1, UnitProgress::new(45).unwrap(), fixed_now())
        .await
        .unwrap();
    repo.upsert_progress(learner, &tahsili, 0, UnitProgress::new(10).unwrap(), fixed_now())
        .await
        .unwrap();

    let map = repo.get_progress(learner, &qudurat).await.unwrap();
    let expected: ProgressMap = [(0, UnitProgress::COMPLETE), (1, UnitProgress::new(45).unwrap())]
        .into_iter()
        .collect();
    assert_eq!(map, expected);
    assert_eq!(map.get(2), UnitProgress::NONE);

    let other = repo.get_progress(learner, &tahsili).await.unwrap();
    assert_eq!(other.get(0).percent(), 10);
}

#[tokio::test]
async fn storage_sqlite_constructor_migrates() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    let learner = LearnerId::new(3);
    storage
        .accounts
        .upsert_account(&AccountRecord::new(learner, Tier::Basic, fixed_now()))
        .await
        .unwrap();
    let account = storage.accounts.get_account(learner).await.unwrap();
    assert_eq!(account.map(|a| a.tier()), Some(Tier::Basic));
}
