//! In-memory stand-ins for the rank source and observation store.

use std::sync::{
	Mutex,
	atomic::{AtomicBool, AtomicUsize, Ordering},
};

use time::{Duration, OffsetDateTime, macros::datetime};
use uuid::Uuid;

use rw_service::{BoxFuture, ObservationStore, RankSource};
use rw_storage::models::{NewObservation, RankObservation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeFetch {
	Rank(i64),
	NotFound,
	Fail(String),
}

/// Replays scripted outcomes in order, repeating the last one once the script runs out.
pub struct FakeRankSource {
	script: Vec<FakeFetch>,
	calls: AtomicUsize,
	usernames: Mutex<Vec<String>>,
}
impl FakeRankSource {
	pub fn new(script: impl IntoIterator<Item = FakeFetch>) -> Self {
		Self {
			script: script.into_iter().collect(),
			calls: AtomicUsize::new(0),
			usernames: Mutex::new(Vec::new()),
		}
	}

	pub fn always(outcome: FakeFetch) -> Self {
		Self::new([outcome])
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn usernames(&self) -> Vec<String> {
		self.usernames.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn next_outcome(&self) -> FakeFetch {
		let idx = self.calls.fetch_add(1, Ordering::SeqCst);

		match self.script.get(idx).or_else(|| self.script.last()) {
			Some(outcome) => outcome.clone(),
			None => FakeFetch::Fail("No scripted outcome.".to_string()),
		}
	}
}
impl RankSource for FakeRankSource {
	fn fetch_rank<'a>(&'a self, username: &'a str) -> BoxFuture<'a, rw_providers::Result<i64>> {
		self.usernames.lock().unwrap_or_else(|err| err.into_inner()).push(username.to_string());

		let result = match self.next_outcome() {
			FakeFetch::Rank(rank) => Ok(rank),
			FakeFetch::NotFound => Err(rw_providers::Error::UserNotFound {
				username: username.to_string(),
				response: serde_json::json!({ "data": { "matchedUser": null } }),
			}),
			FakeFetch::Fail(message) => Err(rw_providers::Error::InvalidResponse { message }),
		};

		Box::pin(async move { result })
	}
}

/// Assigns strictly increasing timestamps on append, like a server clock.
pub struct MemoryStore {
	rows: Mutex<Vec<RankObservation>>,
	appends: AtomicUsize,
	failing: AtomicBool,
}
impl MemoryStore {
	const EPOCH: OffsetDateTime = datetime!(2025-01-01 00:00 UTC);

	pub fn new() -> Self {
		Self {
			rows: Mutex::new(Vec::new()),
			appends: AtomicUsize::new(0),
			failing: AtomicBool::new(false),
		}
	}

	/// Stores `ranks` in order as if each came from a scheduled fetch.
	pub fn with_ranks(ranks: &[i64]) -> Self {
		let store = Self::new();

		for rank in ranks {
			store.insert(&NewObservation::scheduled(*rank));
		}

		store
	}

	/// While set, every call fails the way an unreachable database would.
	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	/// Appends made through [`ObservationStore::append`]; seeded rows are not counted.
	pub fn appends(&self) -> usize {
		self.appends.load(Ordering::SeqCst)
	}

	/// Oldest first.
	pub fn observations(&self) -> Vec<RankObservation> {
		self.rows.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn insert(&self, obs: &NewObservation) -> RankObservation {
		let mut rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());
		let row = RankObservation {
			observation_id: Uuid::new_v4(),
			rank: obs.rank,
			recorded_at: Self::EPOCH + Duration::minutes(rows.len() as i64),
			fetch_time: obs.fetch_time,
			total_solved: None,
		};

		rows.push(row.clone());

		row
	}

	fn check_available(&self) -> rw_storage::Result<()> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(rw_storage::Error::Sqlx(sqlx::Error::PoolTimedOut));
		}

		Ok(())
	}
}
impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}
impl ObservationStore for MemoryStore {
	fn append<'a>(
		&'a self,
		obs: &'a NewObservation,
	) -> BoxFuture<'a, rw_storage::Result<RankObservation>> {
		let result = self.check_available().map(|()| {
			self.appends.fetch_add(1, Ordering::SeqCst);

			self.insert(obs)
		});

		Box::pin(async move { result })
	}

	fn recent(&self, limit: u32) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>> {
		let result = self.check_available().and_then(|()| {
			if limit == 0 {
				return Err(rw_storage::Error::InvalidArgument(
					"limit must be greater than zero.".to_string(),
				));
			}

			let mut rows = self.observations();

			rows.reverse();
			rows.truncate(limit as usize);

			Ok(rows)
		});

		Box::pin(async move { result })
	}

	fn all_ordered(&self) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>> {
		let result = self.check_available().map(|()| self.observations());

		Box::pin(async move { result })
	}
}
