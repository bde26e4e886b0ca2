use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RankObservation {
	pub observation_id: Uuid,
	pub rank: i64,
	/// Assigned by the database on insert.
	pub recorded_at: OffsetDateTime,
	/// Client clock at fetch time; only the manual trigger sets it.
	pub fetch_time: Option<OffsetDateTime>,
	/// Never written by this system.
	pub total_solved: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObservation {
	pub rank: i64,
	pub fetch_time: Option<OffsetDateTime>,
}
impl NewObservation {
	pub fn scheduled(rank: i64) -> Self {
		Self { rank, fetch_time: None }
	}

	pub fn manual(rank: i64, fetch_time: OffsetDateTime) -> Self {
		Self { rank, fetch_time: Some(fetch_time) }
	}
}
