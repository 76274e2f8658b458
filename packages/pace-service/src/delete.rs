use pace_domain::{Caller, policy};
use pace_storage::records;

use crate::{Error, PaceService, Result};

impl PaceService {
	pub async fn delete_record(&self, caller: &Caller, id: i64) -> Result<()> {
		let scope = policy::record_scope(caller);

		if !records::delete(&self.db, id, scope).await? {
			return Err(Error::NotFound);
		}

		Ok(())
	}
}
