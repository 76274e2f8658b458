use pace_domain::{Caller, fields, policy, search};
use pace_storage::{models::RecordRow, records};

use crate::{PaceService, Result};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RecordQuery {
	pub search: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RecordItem {
	pub id: i64,
	pub owner: i64,
	#[serde(with = "crate::time_serde")]
	pub created: time::OffsetDateTime,
	pub distance: i64,
	pub latitude: f64,
	pub longitude: f64,
	pub weather_conditions: String,
}
impl From<RecordRow> for RecordItem {
	fn from(row: RecordRow) -> Self {
		Self {
			id: row.id,
			owner: row.owner_id,
			created: row.created,
			distance: row.distance,
			latitude: row.latitude,
			longitude: row.longitude,
			weather_conditions: row.weather_conditions,
		}
	}
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RecordPage {
	pub count: usize,
	pub items: Vec<RecordItem>,
}

impl PaceService {
	/// Lists the caller's visible records newest-first, optionally narrowed
	/// by a search expression. Grammar and schema failures surface as client
	/// errors at the boundary, never as storage faults.
	pub async fn list_records(&self, caller: &Caller, query: RecordQuery) -> Result<RecordPage> {
		let scope = policy::record_scope(caller);
		let raw = query.search.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
		let predicate = match raw {
			Some(raw) => Some(fields::compile(&search::parse(raw)?)?),
			None => None,
		};
		let rows = records::filter(&self.db, scope, predicate.as_ref()).await?;
		let items: Vec<RecordItem> = rows.into_iter().map(RecordItem::from).collect();

		Ok(RecordPage { count: items.len(), items })
	}
}
