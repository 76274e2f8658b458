use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Resolves the current weather description for a coordinate pair. The API
/// key comes from injected configuration; a non-success upstream status or a
/// body without a description is an error, never a fallback value.
pub async fn lookup(
	cfg: &pace_config::WeatherProviderConfig,
	latitude: f64,
	longitude: f64,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.get(url)
		.query(&[
			("lat", latitude.to_string()),
			("lon", longitude.to_string()),
			("appid", cfg.api_key.clone()),
		])
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_weather_response(json)
}

fn parse_weather_response(json: Value) -> Result<String> {
	let description = json
		.get("weather")
		.and_then(|v| v.as_array())
		.and_then(|entries| entries.first())
		.and_then(|entry| entry.get("description"))
		.and_then(|v| v.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Weather response is missing a description.".to_string(),
		})?;

	Ok(description.to_string())
}
