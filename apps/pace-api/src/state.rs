use std::sync::Arc;

use pace_service::PaceService;
use pace_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PaceService>,
}
impl AppState {
	pub async fn new(config: pace_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = PaceService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
