use rw_storage::models::{NewObservation, RankObservation};
use time::OffsetDateTime;

use crate::{RankService, Result};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FetchNowResponse {
	pub success: bool,
	pub message: String,
	pub current_rank: i64,
}

impl RankService {
	/// Fetches the current rank outside the schedule and stores it with the local fetch time.
	pub async fn fetch_now(&self) -> Result<FetchNowResponse> {
		let rank = self.source.fetch_rank(&self.username).await?;
		let obs = NewObservation::manual(rank, OffsetDateTime::now_utc());

		self.store.append(&obs).await?;

		tracing::info!(username = %self.username, rank, "Manual rank fetch stored.");

		Ok(FetchNowResponse {
			success: true,
			message: "Rank fetched and stored successfully".to_string(),
			current_rank: rank,
		})
	}

	/// One scheduler tick: fetch, then append the bare rank.
	pub async fn record_scheduled(&self) -> Result<RankObservation> {
		let rank = self.source.fetch_rank(&self.username).await?;
		let stored = self.store.append(&NewObservation::scheduled(rank)).await?;

		tracing::info!(
			username = %self.username,
			rank,
			observation_id = %stored.observation_id,
			"Scheduled rank fetch stored."
		);

		Ok(stored)
	}
}
