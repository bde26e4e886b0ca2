pub mod analytics;
pub mod history;
pub mod rank;
pub mod record;
pub mod time_serde;

mod error;

pub use analytics::RankAnalytics;
pub use error::{Error, Result};
pub use history::{HistoryItem, HistoryResponse};
pub use rank::{RankPoint, RankResponse};
pub use record::FetchNowResponse;

use std::{future::Future, pin::Pin, sync::Arc};

use rw_providers::RankClient;
use rw_storage::{
	db::Db,
	models::{NewObservation, RankObservation},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Upper bound on observations returned by [`RankService::latest`].
pub const RECENT_LIMIT: u32 = 10;

pub trait RankSource
where
	Self: Send + Sync,
{
	fn fetch_rank<'a>(&'a self, username: &'a str) -> BoxFuture<'a, rw_providers::Result<i64>>;
}

/// Append-only observation log.
pub trait ObservationStore
where
	Self: Send + Sync,
{
	fn append<'a>(
		&'a self,
		obs: &'a NewObservation,
	) -> BoxFuture<'a, rw_storage::Result<RankObservation>>;

	/// Newest first, at most `limit` rows.
	fn recent(&self, limit: u32) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>>;

	/// Oldest first.
	fn all_ordered(&self) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>>;
}

pub struct RankService {
	pub username: String,
	pub source: Arc<dyn RankSource>,
	pub store: Arc<dyn ObservationStore>,
}
impl RankService {
	pub fn new(cfg: &rw_config::Config, db: Db) -> rw_providers::Result<Self> {
		let client = RankClient::new(&cfg.source)?;

		Ok(Self::with_backends(cfg.tracker.username.clone(), Arc::new(client), Arc::new(db)))
	}

	pub fn with_backends(
		username: impl Into<String>,
		source: Arc<dyn RankSource>,
		store: Arc<dyn ObservationStore>,
	) -> Self {
		Self { username: username.into(), source, store }
	}
}

impl RankSource for RankClient {
	fn fetch_rank<'a>(&'a self, username: &'a str) -> BoxFuture<'a, rw_providers::Result<i64>> {
		Box::pin(RankClient::fetch_rank(self, username))
	}
}

impl ObservationStore for Db {
	fn append<'a>(
		&'a self,
		obs: &'a NewObservation,
	) -> BoxFuture<'a, rw_storage::Result<RankObservation>> {
		Box::pin(queries::insert_observation(self, obs))
	}

	fn recent(&self, limit: u32) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>> {
		Box::pin(queries::list_recent(self, limit))
	}

	fn all_ordered(&self) -> BoxFuture<'_, rw_storage::Result<Vec<RankObservation>>> {
		Box::pin(queries::list_all_ordered(self))
	}
}
