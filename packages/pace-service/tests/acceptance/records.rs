use std::sync::{Arc, atomic::Ordering};

use pace_domain::Role;
use pace_service::{Error, NewRecordRequest, RecordQuery};

use super::{FailingWeather, StubWeather, build_service, seed_user, test_db};

fn new_record(owner: Option<i64>) -> NewRecordRequest {
	NewRecordRequest { owner, distance: 56, latitude: 46.0, longitude: -120.0 }
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn member_create_uses_stubbed_weather_and_own_identity() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping member_create_uses_stubbed_weather_and_own_identity; set PACE_PG_DSN to run this test.");

		return;
	};
	let weather = Arc::new(StubWeather::new("clear"));
	let calls = weather.calls.clone();
	let service = build_service(test_db.dsn().to_string(), weather).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let manager = seed_user(&service, "manager", Role::Manager).await;

	// A requested foreign owner is overridden silently, not rejected.
	let record = service
		.create_record(&member, new_record(Some(manager.id)))
		.await
		.expect("Create must succeed.");

	assert_eq!(record.owner, member.id);
	assert_eq!(record.distance, 56);
	assert_eq!(record.weather_conditions, "clear");
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn admin_assigned_owner_is_honored() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping admin_assigned_owner_is_honored; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("sunny"))).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let admin = seed_user(&service, "admin", Role::Admin).await;

	let record = service
		.create_record(&admin, new_record(Some(member.id)))
		.await
		.expect("Create must succeed.");

	assert_eq!(record.owner, member.id);

	let missing_owner = service.create_record(&admin, new_record(Some(9_999))).await;

	assert!(matches!(missing_owner, Err(Error::Validation { .. })));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn out_of_range_coordinates_fail_before_the_lookup() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping out_of_range_coordinates_fail_before_the_lookup; set PACE_PG_DSN to run this test.");

		return;
	};
	let weather = Arc::new(StubWeather::new("clear"));
	let calls = weather.calls.clone();
	let service = build_service(test_db.dsn().to_string(), weather).await;
	let member = seed_user(&service, "member", Role::Member).await;

	for (latitude, longitude) in [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.5), (0.0, -200.0)] {
		let result = service
			.create_record(
				&member,
				NewRecordRequest { owner: None, distance: 10, latitude, longitude },
			)
			.await;

		assert!(matches!(result, Err(Error::Validation { .. })));
	}

	let negative = service
		.create_record(
			&member,
			NewRecordRequest { owner: None, distance: -1, latitude: 0.0, longitude: 0.0 },
		)
		.await;

	assert!(matches!(negative, Err(Error::Validation { .. })));
	assert_eq!(calls.load(Ordering::SeqCst), 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn weather_failure_aborts_creation_without_a_partial_record() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping weather_failure_aborts_creation_without_a_partial_record; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(FailingWeather)).await;
	let member = seed_user(&service, "member", Role::Member).await;

	let result = service.create_record(&member, new_record(None)).await;

	assert!(matches!(result, Err(Error::WeatherLookupFailed { .. })));

	let page = service
		.list_records(&member, RecordQuery::default())
		.await
		.expect("List must succeed.");

	assert_eq!(page.count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn visibility_matrix_for_list_fetch_and_delete() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping visibility_matrix_for_list_fetch_and_delete; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("clear"))).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let manager = seed_user(&service, "manager", Role::Manager).await;
	let admin = seed_user(&service, "admin", Role::Admin).await;

	let member_record =
		service.create_record(&member, new_record(None)).await.expect("Create must succeed.");
	let manager_record =
		service.create_record(&manager, new_record(None)).await.expect("Create must succeed.");
	let admin_record =
		service.create_record(&admin, new_record(None)).await.expect("Create must succeed.");

	// Members and managers see exactly their own record.
	for (caller, own, foreign) in [
		(&member, member_record.id, manager_record.id),
		(&manager, manager_record.id, admin_record.id),
	] {
		let page =
			service.list_records(caller, RecordQuery::default()).await.expect("List must succeed.");

		assert_eq!(page.count, 1);
		assert_eq!(page.items[0].owner, caller.id);

		assert!(service.fetch_record(caller, own).await.is_ok());
		assert!(matches!(service.fetch_record(caller, foreign).await, Err(Error::NotFound)));
		assert!(matches!(service.delete_record(caller, foreign).await, Err(Error::NotFound)));
	}

	// An admin sees all three, newest first.
	let page =
		service.list_records(&admin, RecordQuery::default()).await.expect("List must succeed.");

	assert_eq!(page.count, 3);
	assert_eq!(
		page.items.iter().map(|item| item.id).collect::<Vec<_>>(),
		vec![admin_record.id, manager_record.id, member_record.id],
	);

	service.delete_record(&admin, member_record.id).await.expect("Admin delete must succeed.");
	service.delete_record(&member, member_record.id).await.expect_err("Record is already gone.");

	// Owners can still delete their own.
	service.delete_record(&manager, manager_record.id).await.expect("Owner delete must succeed.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
