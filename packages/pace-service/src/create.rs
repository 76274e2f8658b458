use pace_domain::{Caller, policy};
use pace_storage::{records, records::NewRecord, users};

use crate::{Error, PaceService, Result, list::RecordItem};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NewRecordRequest {
	pub owner: Option<i64>,
	pub distance: i64,
	pub latitude: f64,
	pub longitude: f64,
}

impl PaceService {
	/// Creates a record for the effective owner. Input invariants are
	/// checked before the weather lookup so an invalid request never costs
	/// an upstream call; a lookup failure aborts creation entirely.
	pub async fn create_record(
		&self,
		caller: &Caller,
		req: NewRecordRequest,
	) -> Result<RecordItem> {
		if req.distance < 0 {
			return Err(Error::Validation {
				message: "distance must be zero or greater.".to_string(),
			});
		}
		if !(-90.0..=90.0).contains(&req.latitude) {
			return Err(Error::Validation {
				message: "latitude must be between -90.0 and 90.0.".to_string(),
			});
		}
		if !(-180.0..=180.0).contains(&req.longitude) {
			return Err(Error::Validation {
				message: "longitude must be between -180.0 and 180.0.".to_string(),
			});
		}

		let owner_id = policy::effective_owner(caller, req.owner);

		if owner_id != caller.id && users::fetch(&self.db, owner_id).await?.is_none() {
			return Err(Error::Validation { message: "owner does not exist.".to_string() });
		}

		let weather_conditions = self
			.providers
			.weather
			.lookup(&self.cfg.providers.weather, req.latitude, req.longitude)
			.await
			.map_err(|err| {
				tracing::warn!(%err, "Weather lookup failed; aborting record creation.");

				Error::from(err)
			})?;
		let row = records::insert(
			&self.db,
			&NewRecord {
				owner_id,
				distance: req.distance,
				latitude: req.latitude,
				longitude: req.longitude,
				weather_conditions,
			},
		)
		.await?;

		Ok(RecordItem::from(row))
	}
}
