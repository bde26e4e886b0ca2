use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{NewObservation, RankObservation},
};

const OBSERVATION_COLUMNS: &str = "observation_id, rank, recorded_at, fetch_time, total_solved";

pub async fn insert_observation(db: &Db, obs: &NewObservation) -> Result<RankObservation> {
	let sql = format!(
		"\
INSERT INTO rank_observations (observation_id, rank, fetch_time)
VALUES ($1, $2, $3)
RETURNING {OBSERVATION_COLUMNS}"
	);
	let row = sqlx::query_as::<_, RankObservation>(&sql)
		.bind(Uuid::new_v4())
		.bind(obs.rank)
		.bind(obs.fetch_time)
		.fetch_one(&db.pool)
		.await?;

	Ok(row)
}

pub async fn list_recent(db: &Db, limit: u32) -> Result<Vec<RankObservation>> {
	if limit == 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let sql = format!(
		"\
SELECT {OBSERVATION_COLUMNS}
FROM rank_observations
ORDER BY recorded_at DESC, seq DESC
LIMIT $1"
	);
	let rows = sqlx::query_as::<_, RankObservation>(&sql)
		.bind(i64::from(limit))
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

pub async fn list_all_ordered(db: &Db) -> Result<Vec<RankObservation>> {
	let sql = format!(
		"\
SELECT {OBSERVATION_COLUMNS}
FROM rank_observations
ORDER BY recorded_at ASC, seq ASC"
	);
	let rows = sqlx::query_as::<_, RankObservation>(&sql).fetch_all(&db.pool).await?;

	Ok(rows)
}
