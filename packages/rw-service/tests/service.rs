use std::sync::Arc;

use rw_service::{Error, RECENT_LIMIT, RankService};
use rw_testkit::{FakeFetch, FakeRankSource, MemoryStore};

const USERNAME: &str = "Rawan-Khalifa";

fn service(source: &Arc<FakeRankSource>, store: &Arc<MemoryStore>) -> RankService {
	RankService::with_backends(USERNAME, source.clone(), store.clone())
}

#[tokio::test]
async fn fetch_now_appends_once_with_fetched_rank() {
	let source = Arc::new(FakeRankSource::always(FakeFetch::Rank(1_500)));
	let store = Arc::new(MemoryStore::new());
	let response = service(&source, &store).fetch_now().await.expect("fetch_now failed");

	assert!(response.success);
	assert_eq!(response.current_rank, 1_500);
	assert_eq!(source.calls(), 1);
	assert_eq!(source.usernames(), vec![USERNAME.to_string()]);
	assert_eq!(store.appends(), 1);

	let stored = store.observations();

	assert_eq!(stored.len(), 1);
	assert_eq!(stored[0].rank, 1_500);
	assert!(stored[0].fetch_time.is_some(), "Manual fetches record the client fetch time.");
	assert_eq!(stored[0].total_solved, None);
}

#[tokio::test]
async fn scheduled_record_omits_fetch_time() {
	let source = Arc::new(FakeRankSource::always(FakeFetch::Rank(2_048)));
	let store = Arc::new(MemoryStore::new());
	let stored = service(&source, &store).record_scheduled().await.expect("record failed");

	assert_eq!(stored.rank, 2_048);
	assert_eq!(stored.fetch_time, None);
	assert_eq!(store.observations(), vec![stored]);
}

#[tokio::test]
async fn unmatched_user_is_not_stored() {
	let source = Arc::new(FakeRankSource::always(FakeFetch::NotFound));
	let store = Arc::new(MemoryStore::new());
	let err = service(&source, &store).fetch_now().await.expect_err("Expected not found.");

	match err {
		Error::UserNotFound { username, response } => {
			assert_eq!(username, USERNAME);
			assert!(response["data"]["matchedUser"].is_null());
		},
		other => panic!("Unexpected error: {other:?}"),
	}

	assert_eq!(store.appends(), 0);
}

#[tokio::test]
async fn upstream_failure_is_not_stored() {
	let source = Arc::new(FakeRankSource::always(FakeFetch::Fail("bad gateway".to_string())));
	let store = Arc::new(MemoryStore::new());
	let err = service(&source, &store).record_scheduled().await.expect_err("Expected failure.");

	assert!(matches!(err, Error::Fetch { .. }), "Unexpected error: {err:?}");
	assert_eq!(store.appends(), 0);
}

#[tokio::test]
async fn store_failure_surfaces_as_storage_error() {
	let source = Arc::new(FakeRankSource::always(FakeFetch::Rank(900)));
	let store = Arc::new(MemoryStore::new());

	store.set_failing(true);

	let svc = service(&source, &store);

	assert!(matches!(svc.fetch_now().await, Err(Error::Storage { .. })));
	assert!(matches!(svc.latest().await, Err(Error::Storage { .. })));
	assert!(matches!(svc.history().await, Err(Error::Storage { .. })));
}

#[tokio::test]
async fn latest_is_capped_and_newest_first() {
	let ranks: Vec<i64> = (0..15).map(|idx| 3_000 - idx * 10).collect();
	let source = Arc::new(FakeRankSource::new([]));
	let store = Arc::new(MemoryStore::with_ranks(&ranks));
	let response = service(&source, &store).latest().await.expect("latest failed");

	assert_eq!(response.message, "Rank data retrieved successfully");
	assert_eq!(response.data.len(), RECENT_LIMIT as usize);
	assert_eq!(response.data[0].rank, 2_860);

	for pair in response.data.windows(2) {
		assert!(pair[0].timestamp > pair[1].timestamp, "Timestamps must strictly descend.");
	}

	assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn latest_on_empty_store_is_empty() {
	let source = Arc::new(FakeRankSource::new([]));
	let store = Arc::new(MemoryStore::new());
	let response = service(&source, &store).latest().await.expect("latest failed");

	assert_eq!(response.message, "No rank data available yet");
	assert!(response.data.is_empty());
}

#[tokio::test]
async fn history_reports_ascending_data_and_analytics() {
	let source = Arc::new(FakeRankSource::new([]));
	let store = Arc::new(MemoryStore::with_ranks(&[1_800, 1_700, 1_600]));
	let response = service(&source, &store).history().await.expect("history failed");

	assert!(response.success);
	assert_eq!(response.data.iter().map(|item| item.rank).collect::<Vec<_>>(), vec![
		1_800, 1_700, 1_600
	]);

	for pair in response.data.windows(2) {
		assert!(pair[0].timestamp < pair[1].timestamp, "Timestamps must strictly ascend.");
	}

	assert_eq!(response.analytics.total_records, 3);
	assert_eq!(response.analytics.best_rank, Some(1_600));
	assert_eq!(response.analytics.current_rank, Some(1_600));
	assert_eq!(response.analytics.rank_change, -200);
	assert_eq!(response.analytics.first_recorded, Some(response.data[0].timestamp));
	assert_eq!(response.analytics.last_recorded, Some(response.data[2].timestamp));
}

#[tokio::test]
async fn repeated_reads_are_identical() {
	let source = Arc::new(FakeRankSource::new([]));
	let store = Arc::new(MemoryStore::with_ranks(&[1_200, 1_150]));
	let svc = service(&source, &store);

	assert_eq!(svc.latest().await.expect("latest failed"), svc.latest().await.expect("latest failed"));
	assert_eq!(
		svc.history().await.expect("history failed"),
		svc.history().await.expect("history failed")
	);
}

#[tokio::test]
async fn back_to_back_manual_fetches_both_append() {
	let source = Arc::new(FakeRankSource::new([FakeFetch::Rank(1_000), FakeFetch::Rank(1_000)]));
	let store = Arc::new(MemoryStore::new());
	let svc = service(&source, &store);

	svc.fetch_now().await.expect("first fetch failed");
	svc.fetch_now().await.expect("second fetch failed");

	assert_eq!(store.appends(), 2);
}
