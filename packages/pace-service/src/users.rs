//! User administration, scoped by role: members reach only themselves,
//! managers reach non-admin users, admins reach everyone. Credential
//! issuance happens out of band, so there is no create operation here.

use pace_domain::{Caller, Role, policy};
use pace_storage::{models::UserRow, users};

use crate::{Error, PaceService, Result};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserItem {
	pub id: i64,
	pub username: String,
	pub role: Role,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserRoleUpdate {
	pub role: Role,
}

pub(crate) fn role_of(user: &UserRow) -> Result<Role> {
	Role::parse(&user.role).ok_or_else(|| Error::Storage {
		message: format!("User {} carries unrecognized role {}.", user.id, user.role),
	})
}

fn item(user: UserRow) -> Result<UserItem> {
	let role = role_of(&user)?;

	Ok(UserItem { id: user.id, username: user.username, role })
}

impl PaceService {
	pub async fn list_users(&self, caller: &Caller) -> Result<Vec<UserItem>> {
		let scope = policy::user_scope(caller);
		let rows = users::list(&self.db, scope).await?;

		rows.into_iter().map(item).collect()
	}

	pub async fn fetch_user(&self, caller: &Caller, id: i64) -> Result<UserItem> {
		let user = self.visible_user(caller, id).await?;

		item(user)
	}

	pub async fn update_user_role(
		&self,
		caller: &Caller,
		id: i64,
		update: UserRoleUpdate,
	) -> Result<UserItem> {
		self.visible_user(caller, id).await?;

		if !policy::can_assign_role(caller, update.role) {
			return Err(Error::Validation {
				message: format!("role {} is not assignable by the caller.", update.role.as_str()),
			});
		}

		let updated =
			users::update_role(&self.db, id, update.role.as_str()).await?.ok_or(Error::NotFound)?;

		item(updated)
	}

	pub async fn delete_user(&self, caller: &Caller, id: i64) -> Result<()> {
		self.visible_user(caller, id).await?;

		if !users::delete(&self.db, id).await? {
			return Err(Error::NotFound);
		}

		Ok(())
	}

	/// Fetch with the obscurity rule applied: a user outside the caller's
	/// administration scope answers "not found".
	async fn visible_user(&self, caller: &Caller, id: i64) -> Result<UserRow> {
		let user = users::fetch(&self.db, id).await?.ok_or(Error::NotFound)?;
		let role = role_of(&user)?;

		if !policy::can_view_user(caller, user.id, role) {
			return Err(Error::NotFound);
		}

		Ok(user)
	}
}
