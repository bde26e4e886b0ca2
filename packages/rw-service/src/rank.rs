use time::OffsetDateTime;

use crate::{RECENT_LIMIT, RankService, Result};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RankPoint {
	pub rank: i64,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RankResponse {
	pub message: String,
	pub data: Vec<RankPoint>,
}

impl RankService {
	/// The most recent observations, newest first.
	pub async fn latest(&self) -> Result<RankResponse> {
		tracing::debug!(limit = RECENT_LIMIT, "Reading recent rank observations.");

		let rows = self.store.recent(RECENT_LIMIT).await?;
		let data: Vec<RankPoint> = rows
			.into_iter()
			.take(RECENT_LIMIT as usize)
			.map(|obs| RankPoint { rank: obs.rank, timestamp: obs.recorded_at })
			.collect();

		if data.is_empty() {
			tracing::warn!("No rank data found in the store.");

			return Ok(RankResponse {
				message: "No rank data available yet".to_string(),
				data,
			});
		}

		tracing::info!(count = data.len(), "Retrieved rank records.");

		Ok(RankResponse { message: "Rank data retrieved successfully".to_string(), data })
	}
}
