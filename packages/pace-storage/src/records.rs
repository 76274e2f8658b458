//! Record queries. Every read and delete composes the caller's scope into
//! the WHERE clause, so an out-of-scope row is indistinguishable from an
//! absent one.

use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;

use pace_domain::{
	RecordScope, TypedPredicate,
	fields::{Field, FieldValue, TypedCompare},
	search::CompareOp,
};

use crate::{Result, db::Db, models::RecordRow};

const RECORD_COLUMNS: &str =
	"id, owner_id, created, distance, latitude, longitude, weather_conditions";

pub struct NewRecord {
	pub owner_id: i64,
	pub distance: i64,
	pub latitude: f64,
	pub longitude: f64,
	pub weather_conditions: String,
}

pub async fn insert(db: &Db, new: &NewRecord) -> Result<RecordRow> {
	let row = sqlx::query_as(
		"\
INSERT INTO records (owner_id, distance, latitude, longitude, weather_conditions)
VALUES ($1, $2, $3, $4, $5)
RETURNING id, owner_id, created, distance, latitude, longitude, weather_conditions",
	)
	.bind(new.owner_id)
	.bind(new.distance)
	.bind(new.latitude)
	.bind(new.longitude)
	.bind(new.weather_conditions.as_str())
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

pub async fn fetch(db: &Db, id: i64, scope: RecordScope) -> Result<Option<RecordRow>> {
	let mut builder = scoped_query(&format!("SELECT {RECORD_COLUMNS} FROM records"), id, scope);
	let row = builder.build_query_as().fetch_optional(&db.pool).await?;

	Ok(row)
}

pub async fn delete(db: &Db, id: i64, scope: RecordScope) -> Result<bool> {
	let mut builder = scoped_query("DELETE FROM records", id, scope);
	let result = builder.build().execute(&db.pool).await?;

	Ok(result.rows_affected() > 0)
}

pub async fn filter(
	db: &Db,
	scope: RecordScope,
	predicate: Option<&TypedPredicate>,
) -> Result<Vec<RecordRow>> {
	let mut builder = QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM records"));

	push_filters(&mut builder, scope, predicate);
	builder.push(" ORDER BY created DESC, id DESC");

	let rows = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn average_distance(
	db: &Db,
	owner_id: i64,
	start: OffsetDateTime,
	end: OffsetDateTime,
) -> Result<Option<f64>> {
	let average = sqlx::query_scalar(
		"SELECT AVG(distance)::float8 FROM records WHERE owner_id = $1 AND created >= $2 AND created < $3",
	)
	.bind(owner_id)
	.bind(start)
	.bind(end)
	.fetch_one(&db.pool)
	.await?;

	Ok(average)
}

fn scoped_query(head: &str, id: i64, scope: RecordScope) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new(head.to_string());

	builder.push(" WHERE id = ");
	builder.push_bind(id);

	if let RecordScope::Owner(owner_id) = scope {
		builder.push(" AND owner_id = ");
		builder.push_bind(owner_id);
	}

	builder
}

fn push_filters(
	builder: &mut QueryBuilder<'static, Postgres>,
	scope: RecordScope,
	predicate: Option<&TypedPredicate>,
) {
	let mut has_where = false;

	// Scope first, predicate AND-ed after it; a search expression can only
	// narrow what the caller is already allowed to see.
	if let RecordScope::Owner(owner_id) = scope {
		builder.push(" WHERE owner_id = ");
		builder.push_bind(owner_id);

		has_where = true;
	}
	if let Some(predicate) = predicate {
		builder.push(if has_where { " AND " } else { " WHERE " });
		push_predicate(builder, predicate);
	}
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &TypedPredicate) {
	match predicate {
		TypedPredicate::Compare(compare) => push_compare(builder, compare),
		TypedPredicate::And(left, right) => {
			builder.push("(");
			push_predicate(builder, left);
			builder.push(" AND ");
			push_predicate(builder, right);
			builder.push(")");
		},
		TypedPredicate::Or(left, right) => {
			builder.push("(");
			push_predicate(builder, left);
			builder.push(" OR ");
			push_predicate(builder, right);
			builder.push(")");
		},
	}
}

fn push_compare(builder: &mut QueryBuilder<'static, Postgres>, compare: &TypedCompare) {
	builder.push("(");
	builder.push(column_expr(compare.field));
	builder.push(op_sql(compare.op));

	match &compare.value {
		FieldValue::Integer(value) => builder.push_bind(*value),
		FieldValue::Float(value) => builder.push_bind(*value),
		FieldValue::Date(value) => builder.push_bind(*value),
		FieldValue::Text(value) => builder.push_bind(value.clone()),
	};

	builder.push(")");
}

const fn column_expr(field: Field) -> &'static str {
	match field {
		Field::Id => "id",
		Field::Owner => "owner_id",
		// Date-typed searches compare the calendar date of the timestamp.
		Field::Created => "created::date",
		Field::Distance => "distance",
		Field::Latitude => "latitude",
		Field::Longitude => "longitude",
		Field::WeatherConditions => "weather_conditions",
	}
}

const fn op_sql(op: CompareOp) -> &'static str {
	match op {
		CompareOp::Eq => " = ",
		// NULL is never equal to a searched value, so `ne` must hold there.
		CompareOp::Ne => " IS DISTINCT FROM ",
		CompareOp::Lt => " < ",
		CompareOp::Gt => " > ",
	}
}
