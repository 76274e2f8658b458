use pace_domain::{Caller, policy};
use pace_storage::records;

use crate::{Error, PaceService, Result, list::RecordItem};

impl PaceService {
	/// An id outside the caller's scope answers exactly like a missing one.
	pub async fn fetch_record(&self, caller: &Caller, id: i64) -> Result<RecordItem> {
		let scope = policy::record_scope(caller);
		let row = records::fetch(&self.db, id, scope).await?.ok_or(Error::NotFound)?;

		Ok(RecordItem::from(row))
	}
}
