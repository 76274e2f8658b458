use std::sync::Arc;

use time::macros::datetime;

use pace_domain::Role;
use pace_service::{AverageQuery, Error};
use pace_storage::{records, records::NewRecord};

use super::{StubWeather, backdate, build_service, seed_user, test_db};

fn query(year: &str, month: &str) -> AverageQuery {
	AverageQuery { year: Some(year.to_string()), month: Some(month.to_string()) }
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn monthly_average_is_scoped_and_windowed() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping monthly_average_is_scoped_and_windowed; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("clear"))).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let manager = seed_user(&service, "manager", Role::Manager).await;
	let admin = seed_user(&service, "admin", Role::Admin).await;

	for (distance, created) in [
		(250, datetime!(2020-05-02 10:00 UTC)),
		(350, datetime!(2020-05-20 10:00 UTC)),
		// Outside the May window on both sides.
		(9_000, datetime!(2020-04-30 23:59 UTC)),
		(9_000, datetime!(2020-06-01 0:00 UTC)),
	] {
		let row = records::insert(
			&service.db,
			&NewRecord {
				owner_id: member.id,
				distance,
				latitude: 10.0,
				longitude: 20.0,
				weather_conditions: "clear".to_string(),
			},
		)
		.await
		.expect("Failed to seed record.");

		backdate(&service, row.id, created).await;
	}

	let result = service
		.average_distance(&member, member.id, query("2020", "5"))
		.await
		.expect("Average must succeed.");

	assert_eq!(result.owner, member.id);
	assert_eq!((result.year, result.month), (2020, 5));
	assert_eq!(result.average_distance, Some(300.0));

	// An admin may aggregate over anyone; a month with no rows is null.
	let empty = service
		.average_distance(&admin, member.id, query("2019", "5"))
		.await
		.expect("Average must succeed.");

	assert_eq!(empty.average_distance, None);

	// A foreign non-admin caller learns nothing, not even existence.
	assert!(matches!(
		service.average_distance(&manager, member.id, query("2020", "5")).await,
		Err(Error::NotFound),
	));
	assert!(matches!(
		service.average_distance(&member, 9_999, query("2020", "5")).await,
		Err(Error::NotFound),
	));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn window_arguments_must_be_paired_integers() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping window_arguments_must_be_paired_integers; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("clear"))).await;
	let member = seed_user(&service, "member", Role::Member).await;

	let lone_year =
		AverageQuery { year: Some("2020".to_string()), month: None };
	let lone_month =
		AverageQuery { month: Some("5".to_string()), year: None };

	assert!(matches!(
		service.average_distance(&member, member.id, lone_year).await,
		Err(Error::Validation { .. }),
	));
	assert!(matches!(
		service.average_distance(&member, member.id, lone_month).await,
		Err(Error::Validation { .. }),
	));
	assert!(matches!(
		service.average_distance(&member, member.id, query("twenty", "5")).await,
		Err(Error::Validation { .. }),
	));
	assert!(matches!(
		service.average_distance(&member, member.id, query("2020", "13")).await,
		Err(Error::Validation { .. }),
	));

	// Omitting both falls back to the current month; a record created now is
	// inside that window.
	records::insert(
		&service.db,
		&NewRecord {
			owner_id: member.id,
			distance: 120,
			latitude: 10.0,
			longitude: 20.0,
			weather_conditions: "clear".to_string(),
		},
	)
	.await
	.expect("Failed to seed record.");

	let current = service
		.average_distance(&member, member.id, AverageQuery::default())
		.await
		.expect("Average must succeed.");

	assert_eq!(current.average_distance, Some(120.0));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
