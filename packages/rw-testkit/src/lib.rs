pub mod fakes;

mod error;

pub use error::{Error, Result};
pub use fakes::{FakeFetch, FakeRankSource, MemoryStore};

use std::{env, future::Future, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

use rw_storage::db::Db;

const POOL_MAX_CONNS: u32 = 2;

pub fn env_dsn() -> Option<String> {
	env::var("RW_PG_DSN").ok()
}

/// A scratch database on the server behind `RW_PG_DSN`, dropped when the value goes away.
pub struct TestDatabase {
	name: String,
	server: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	/// `base_dsn` must point at a database the role can connect to; the scratch database is
	/// created next to it.
	pub async fn create(base_dsn: &str) -> Result<Self> {
		let server = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("RW_PG_DSN is not a valid DSN: {err}.")))?;
		let name = format!("rw_test_{}", Uuid::new_v4().simple());
		let mut conn = PgConnection::connect_with(&server).await?;

		sqlx::query(&format!(r#"CREATE DATABASE "{name}""#)).execute(&mut conn).await?;
		conn.close().await?;

		Ok(Self { name, server, dropped: false })
	}

	/// Pool settings for the scratch database, as `rw_config` would load them.
	pub fn postgres(&self) -> rw_config::Postgres {
		let dsn = self.server.clone().database(&self.name).to_url_lossy().to_string();

		rw_config::Postgres { dsn, pool_max_conns: POOL_MAX_CONNS }
	}

	/// A pool on the scratch database with `rank_observations` in place.
	pub async fn db(&self) -> Result<Db> {
		let db = Db::connect(&self.postgres()).await?;

		db.ensure_schema().await?;

		Ok(db)
	}

	pub async fn drop_database(mut self) -> Result<()> {
		self.dropped = true;

		drop_database(&self.server, &self.name).await
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let server = self.server.clone();
		let name = std::mem::take(&mut self.name);
		// The owning test may still be inside a runtime, so the drop runs on a fresh one.
		let outcome = thread::spawn(move || {
			tokio::runtime::Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Message(err.to_string()))
				.and_then(|runtime| runtime.block_on(drop_database(&server, &name)))
		})
		.join();

		if let Ok(Err(err)) = outcome {
			eprintln!("Failed to drop test database: {err}.");
		}
	}
}

/// Runs `f` against a bootstrapped scratch database, then closes the pool and drops the database.
pub async fn with_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(Db) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let test_db = TestDatabase::create(base_dsn).await?;
	let db = test_db.db().await?;
	let result = f(db.clone()).await;

	db.pool.close().await;

	let dropped = test_db.drop_database().await;

	match (result, dropped) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(err),
		(Err(err), dropped) => {
			if let Err(drop_err) = dropped {
				eprintln!("Failed to drop test database: {drop_err}.");
			}

			Err(err)
		},
	}
}

async fn drop_database(server: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(server).await?;

	sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#))
		.execute(&mut conn)
		.await?;
	conn.close().await?;

	Ok(())
}
