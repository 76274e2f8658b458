//! Searchable record fields and value coercion.

use time::{Date, macros::format_description};

use crate::search::{CompareOp, Predicate};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
	Id,
	Owner,
	Created,
	Distance,
	Latitude,
	Longitude,
	WeatherConditions,
}
impl Field {
	pub fn parse(name: &str) -> Option<Self> {
		match name {
			"id" => Some(Self::Id),
			"owner" => Some(Self::Owner),
			"created" => Some(Self::Created),
			"distance" => Some(Self::Distance),
			"latitude" => Some(Self::Latitude),
			"longitude" => Some(Self::Longitude),
			"weather_conditions" => Some(Self::WeatherConditions),
			_ => None,
		}
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::Owner => "owner",
			Self::Created => "created",
			Self::Distance => "distance",
			Self::Latitude => "latitude",
			Self::Longitude => "longitude",
			Self::WeatherConditions => "weather_conditions",
		}
	}

	pub const fn field_type(&self) -> FieldType {
		match self {
			Self::Id | Self::Owner | Self::Distance => FieldType::Integer,
			Self::Latitude | Self::Longitude => FieldType::Float,
			Self::Created => FieldType::Date,
			Self::WeatherConditions => FieldType::Text,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldType {
	Integer,
	Float,
	Date,
	Text,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
	Integer(i64),
	Float(f64),
	Date(Date),
	Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypedCompare {
	pub field: Field,
	pub op: CompareOp,
	pub value: FieldValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypedPredicate {
	Compare(TypedCompare),
	And(Box<TypedPredicate>, Box<TypedPredicate>),
	Or(Box<TypedPredicate>, Box<TypedPredicate>),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CompileError {
	#[error("Unknown search field: {field}.")]
	UnknownField { field: String },
	#[error("Invalid value for search field {field}: {value}.")]
	InvalidValue { field: &'static str, value: String },
}

/// Checks every leaf against the allow-list and coerces its value to the
/// field's declared type. The returned tree is ready for SQL rendering.
pub fn compile(predicate: &Predicate) -> Result<TypedPredicate, CompileError> {
	match predicate {
		Predicate::Compare { field, op, value } => {
			let field = Field::parse(field)
				.ok_or_else(|| CompileError::UnknownField { field: field.clone() })?;
			let value = coerce(field, value)?;

			Ok(TypedPredicate::Compare(TypedCompare { field, op: *op, value }))
		},
		Predicate::And(left, right) =>
			Ok(TypedPredicate::And(Box::new(compile(left)?), Box::new(compile(right)?))),
		Predicate::Or(left, right) =>
			Ok(TypedPredicate::Or(Box::new(compile(left)?), Box::new(compile(right)?))),
	}
}

fn coerce(field: Field, value: &str) -> Result<FieldValue, CompileError> {
	let invalid = || CompileError::InvalidValue { field: field.name(), value: value.to_string() };

	match field.field_type() {
		FieldType::Integer => value.parse().map(FieldValue::Integer).map_err(|_| invalid()),
		FieldType::Float => {
			let parsed: f64 = value.parse().map_err(|_| invalid())?;

			if !parsed.is_finite() {
				return Err(invalid());
			}

			Ok(FieldValue::Float(parsed))
		},
		FieldType::Date => {
			let format = format_description!("[year]-[month]-[day]");

			Date::parse(value, format).map(FieldValue::Date).map_err(|_| invalid())
		},
		FieldType::Text => Ok(FieldValue::Text(value.to_string())),
	}
}
