//! Role-scoped access decisions.
//!
//! Pure functions; no I/O. A denied decision is surfaced by the service
//! layer as "not found" so resource existence is never leaked.

use crate::role::Role;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Caller {
	pub id: i64,
	pub role: Role,
}

/// The set of records a caller may act upon. Always conjoined with any
/// search predicate, never replaced by it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordScope {
	Owner(i64),
	All,
}

pub fn record_scope(caller: &Caller) -> RecordScope {
	match caller.role {
		Role::Member | Role::Manager => RecordScope::Owner(caller.id),
		Role::Admin => RecordScope::All,
	}
}

/// Non-admin callers always create records for themselves; a requested owner
/// is overridden silently, not rejected.
pub fn effective_owner(caller: &Caller, requested: Option<i64>) -> i64 {
	match caller.role {
		Role::Admin => requested.unwrap_or(caller.id),
		Role::Member | Role::Manager => caller.id,
	}
}

pub fn can_access_record(caller: &Caller, owner_id: i64) -> bool {
	caller.role == Role::Admin || caller.id == owner_id
}

pub fn can_access_aggregate(caller: &Caller, target_user_id: i64) -> bool {
	caller.role == Role::Admin || caller.id == target_user_id
}

/// The set of users a caller may administer. Members see only themselves,
/// managers see non-admin users, admins see everyone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserScope {
	Own(i64),
	NonAdmin,
	All,
}

pub fn user_scope(caller: &Caller) -> UserScope {
	match caller.role {
		Role::Member => UserScope::Own(caller.id),
		Role::Manager => UserScope::NonAdmin,
		Role::Admin => UserScope::All,
	}
}

/// User administration is ordered ADMIN > MANAGER > MEMBER: members see only
/// themselves, managers see non-admin users, admins see everyone.
pub fn can_view_user(caller: &Caller, target_id: i64, target_role: Role) -> bool {
	match caller.role {
		Role::Admin => true,
		Role::Manager => target_role != Role::Admin,
		Role::Member => caller.id == target_id,
	}
}

pub fn can_assign_role(caller: &Caller, role: Role) -> bool {
	match caller.role {
		Role::Admin => true,
		Role::Manager => matches!(role, Role::Member | Role::Manager),
		Role::Member => role == Role::Member,
	}
}
