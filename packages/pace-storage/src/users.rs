use sqlx::QueryBuilder;

use pace_domain::UserScope;

use crate::{Result, db::Db, models::UserRow};

const USER_COLUMNS: &str = "id, username, role, api_token";

pub async fn fetch(db: &Db, id: i64) -> Result<Option<UserRow>> {
	let row = sqlx::query_as("SELECT id, username, role, api_token FROM users WHERE id = $1")
		.bind(id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}

pub async fn fetch_by_token(db: &Db, api_token: &str) -> Result<Option<UserRow>> {
	let row =
		sqlx::query_as("SELECT id, username, role, api_token FROM users WHERE api_token = $1")
			.bind(api_token)
			.fetch_optional(&db.pool)
			.await?;

	Ok(row)
}

pub async fn list(db: &Db, scope: UserScope) -> Result<Vec<UserRow>> {
	let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));

	match scope {
		UserScope::Own(id) => {
			builder.push(" WHERE id = ");
			builder.push_bind(id);
		},
		UserScope::NonAdmin => {
			builder.push(" WHERE role != ");
			builder.push_bind("ADMIN");
		},
		UserScope::All => {},
	}

	builder.push(" ORDER BY id");

	let rows = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn insert(db: &Db, username: &str, role: &str, api_token: &str) -> Result<UserRow> {
	let row = sqlx::query_as(
		"\
INSERT INTO users (username, role, api_token)
VALUES ($1, $2, $3)
RETURNING id, username, role, api_token",
	)
	.bind(username)
	.bind(role)
	.bind(api_token)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

pub async fn update_role(db: &Db, id: i64, role: &str) -> Result<Option<UserRow>> {
	let row = sqlx::query_as(
		"UPDATE users SET role = $1 WHERE id = $2 RETURNING id, username, role, api_token",
	)
	.bind(role)
	.bind(id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn delete(db: &Db, id: i64) -> Result<bool> {
	let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&db.pool).await?;

	Ok(result.rows_affected() > 0)
}
