pub mod auth;
pub mod average;
pub mod create;
pub mod delete;
pub mod fetch;
pub mod list;
pub mod time_serde;
pub mod users;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use average::{AverageDistance, AverageQuery};
pub use create::NewRecordRequest;
pub use error::{Error, Result};
pub use list::{RecordItem, RecordPage, RecordQuery};
pub use users::{UserItem, UserRoleUpdate};

use pace_config::{Config, WeatherProviderConfig};
use pace_providers::weather;
use pace_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outbound weather lookup, behind a trait so tests can stub the upstream.
pub trait WeatherProvider
where
	Self: Send + Sync,
{
	fn lookup<'a>(
		&'a self,
		cfg: &'a WeatherProviderConfig,
		latitude: f64,
		longitude: f64,
	) -> BoxFuture<'a, pace_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub weather: Arc<dyn WeatherProvider>,
}
impl Providers {
	pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
		Self { weather }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { weather: Arc::new(DefaultProviders) }
	}
}

struct DefaultProviders;

impl WeatherProvider for DefaultProviders {
	fn lookup<'a>(
		&'a self,
		cfg: &'a WeatherProviderConfig,
		latitude: f64,
		longitude: f64,
	) -> BoxFuture<'a, pace_providers::Result<String>> {
		Box::pin(weather::lookup(cfg, latitude, longitude))
	}
}

pub struct PaceService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}
impl PaceService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}
}
