use pace_domain::{CompileError, ParseError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Authentication required.")]
	Unauthenticated,
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("Malformed search expression.")]
	MalformedExpression,
	#[error("Unknown search field: {field}.")]
	UnknownField { field: String },
	#[error("Invalid value for search field {field}: {value}.")]
	InvalidFieldValue { field: String, value: String },
	#[error("Weather lookup failed: {message}")]
	WeatherLookupFailed { message: String },
	#[error("Not found.")]
	NotFound,
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<pace_storage::Error> for Error {
	fn from(err: pace_storage::Error) -> Self {
		match err {
			pace_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}

impl From<ParseError> for Error {
	fn from(err: ParseError) -> Self {
		match err {
			ParseError::Malformed => Self::MalformedExpression,
		}
	}
}

impl From<CompileError> for Error {
	fn from(err: CompileError) -> Self {
		match err {
			CompileError::UnknownField { field } => Self::UnknownField { field },
			CompileError::InvalidValue { field, value } =>
				Self::InvalidFieldValue { field: field.to_string(), value },
		}
	}
}

impl From<pace_providers::Error> for Error {
	fn from(err: pace_providers::Error) -> Self {
		Self::WeatherLookupFailed { message: err.to_string() }
	}
}
