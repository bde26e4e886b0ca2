use rw_storage::models::RankObservation;
use time::OffsetDateTime;

/// Summary statistics over the full observation history. Lower ranks are better.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RankAnalytics {
	pub total_records: usize,
	pub best_rank: Option<i64>,
	pub current_rank: Option<i64>,
	pub rank_change: i64,
	#[serde(with = "crate::time_serde::option")]
	pub first_recorded: Option<OffsetDateTime>,
	#[serde(with = "crate::time_serde::option")]
	pub last_recorded: Option<OffsetDateTime>,
}
impl RankAnalytics {
	/// `history` must be ordered oldest first.
	pub fn from_history(history: &[RankObservation]) -> Self {
		let first = history.first();
		let last = history.last();
		let rank_change = match (first, last) {
			(Some(first), Some(last)) if history.len() > 1 =>
				last.rank.saturating_sub(first.rank),
			_ => 0,
		};

		Self {
			total_records: history.len(),
			best_rank: history.iter().map(|obs| obs.rank).min(),
			current_rank: last.map(|obs| obs.rank),
			rank_change,
			first_recorded: first.map(|obs| obs.recorded_at),
			last_recorded: last.map(|obs| obs.recorded_at),
		}
	}
}
