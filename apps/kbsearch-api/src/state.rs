use std::sync::Arc;

use kbsearch_config::Config;
use kbsearch_service::KbSearchService;
use kbsearch_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KbSearchService>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(KbSearchService::new(config, db)))
	}

	pub fn from_service(service: KbSearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
