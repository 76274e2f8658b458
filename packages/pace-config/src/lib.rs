mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Providers, Security, Service, Storage, WeatherProviderConfig};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.weather.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.weather.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.weather.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.weather.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.weather.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.weather.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let path = cfg.providers.weather.path.trim();

	if path.is_empty() {
		cfg.providers.weather.path = "/".to_string();
	}
}
