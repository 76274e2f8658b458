use pace_domain::Caller;
use pace_storage::users;

use crate::{Error, PaceService, Result};

impl PaceService {
	/// Resolves a bearer token into a caller. Anonymous and unknown tokens
	/// are rejected before any policy decision is made.
	pub async fn authenticate(&self, token: Option<&str>) -> Result<Caller> {
		let token = token.map(str::trim).filter(|token| !token.is_empty());
		let Some(token) = token else {
			return Err(Error::Unauthenticated);
		};
		let user =
			users::fetch_by_token(&self.db, token).await?.ok_or(Error::Unauthenticated)?;
		let role = crate::users::role_of(&user)?;

		Ok(Caller { id: user.id, role })
	}
}
