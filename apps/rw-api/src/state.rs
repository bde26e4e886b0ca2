use std::sync::Arc;

use rw_service::RankService;
use rw_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RankService>,
}
impl AppState {
	pub async fn new(config: &rw_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = RankService::new(config, db)?;

		Ok(Self::from_service(Arc::new(service)))
	}

	pub fn from_service(service: Arc<RankService>) -> Self {
		Self { service }
	}
}
