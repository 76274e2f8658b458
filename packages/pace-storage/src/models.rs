use time::OffsetDateTime;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct UserRow {
	pub id: i64,
	pub username: String,
	pub role: String,
	pub api_token: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct RecordRow {
	pub id: i64,
	pub owner_id: i64,
	pub created: OffsetDateTime,
	pub distance: i64,
	pub latitude: f64,
	pub longitude: f64,
	pub weather_conditions: String,
}
