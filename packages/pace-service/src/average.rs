use time::{Date, Month, OffsetDateTime};

use pace_domain::{Caller, policy};
use pace_storage::{records, users};

use crate::{Error, PaceService, Result};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct AverageQuery {
	pub year: Option<String>,
	pub month: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AverageDistance {
	pub owner: i64,
	pub year: i32,
	pub month: u8,
	/// `null` when the month holds no records.
	pub average_distance: Option<f64>,
}

impl PaceService {
	/// Mean distance for one user within a calendar month. A target the
	/// caller may not aggregate over answers "not found", the same as a
	/// target that does not exist.
	pub async fn average_distance(
		&self,
		caller: &Caller,
		target_user_id: i64,
		query: AverageQuery,
	) -> Result<AverageDistance> {
		let target = users::fetch(&self.db, target_user_id).await?.ok_or(Error::NotFound)?;

		if !policy::can_access_aggregate(caller, target.id) {
			return Err(Error::NotFound);
		}

		let (year, month) = resolve_month(
			query.year.as_deref(),
			query.month.as_deref(),
			OffsetDateTime::now_utc(),
		)?;
		let (start, end) = month_window(year, month)?;
		let average = records::average_distance(&self.db, target.id, start, end).await?;

		Ok(AverageDistance {
			owner: target.id,
			year,
			month: u8::from(month),
			average_distance: average,
		})
	}
}

fn resolve_month(
	year: Option<&str>,
	month: Option<&str>,
	now: OffsetDateTime,
) -> Result<(i32, Month)> {
	match (year, month) {
		(None, None) => Ok((now.year(), now.month())),
		(Some(_), None) | (None, Some(_)) => Err(Error::Validation {
			message: "year and month must be provided together.".to_string(),
		}),
		(Some(year), Some(month)) => {
			let year: i32 = year.trim().parse().map_err(|_| Error::Validation {
				message: "year must be an integer.".to_string(),
			})?;
			let month: u8 = month.trim().parse().map_err(|_| Error::Validation {
				message: "month must be an integer.".to_string(),
			})?;
			let month = Month::try_from(month).map_err(|_| Error::Validation {
				message: "month must be between 1 and 12.".to_string(),
			})?;

			Ok((year, month))
		},
	}
}

fn month_window(year: i32, month: Month) -> Result<(OffsetDateTime, OffsetDateTime)> {
	let out_of_range =
		|| Error::Validation { message: "year is out of range.".to_string() };
	let start = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;
	let end = match month {
		Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
		_ => Date::from_calendar_date(year, month.next(), 1),
	}
	.map_err(|_| out_of_range())?;

	Ok((start.midnight().assume_utc(), end.midnight().assume_utc()))
}
