use time::OffsetDateTime;

use crate::{RankAnalytics, RankService, Result};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HistoryItem {
	pub rank: i64,
	pub total_solved: Option<i64>,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	#[serde(with = "crate::time_serde::option")]
	pub fetch_time: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HistoryResponse {
	pub success: bool,
	pub data: Vec<HistoryItem>,
	pub analytics: RankAnalytics,
}

impl RankService {
	/// Every observation, oldest first, with analytics computed at read time.
	pub async fn history(&self) -> Result<HistoryResponse> {
		let rows = self.store.all_ordered().await?;
		let analytics = RankAnalytics::from_history(&rows);
		let data = rows
			.into_iter()
			.map(|obs| HistoryItem {
				rank: obs.rank,
				total_solved: obs.total_solved,
				timestamp: obs.recorded_at,
				fetch_time: obs.fetch_time,
			})
			.collect();

		tracing::debug!(total_records = analytics.total_records, "Computed rank history analytics.");

		Ok(HistoryResponse { success: true, data, analytics })
	}
}
