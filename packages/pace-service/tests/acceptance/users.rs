use std::sync::Arc;

use pace_domain::Role;
use pace_service::{Error, UserRoleUpdate};

use super::{StubWeather, build_service, seed_user, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn user_visibility_follows_the_administration_order() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping user_visibility_follows_the_administration_order; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("clear"))).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let manager = seed_user(&service, "manager", Role::Manager).await;
	let admin = seed_user(&service, "admin", Role::Admin).await;

	let member_view = service.list_users(&member).await.expect("List must succeed.");

	assert_eq!(member_view.iter().map(|user| user.id).collect::<Vec<_>>(), vec![member.id]);

	let manager_view = service.list_users(&manager).await.expect("List must succeed.");

	assert_eq!(
		manager_view.iter().map(|user| user.id).collect::<Vec<_>>(),
		vec![member.id, manager.id],
	);

	let admin_view = service.list_users(&admin).await.expect("List must succeed.");

	assert_eq!(admin_view.len(), 3);

	// Out-of-scope users answer "not found", not "forbidden".
	assert!(matches!(service.fetch_user(&member, manager.id).await, Err(Error::NotFound)));
	assert!(matches!(service.fetch_user(&manager, admin.id).await, Err(Error::NotFound)));
	assert!(service.fetch_user(&manager, member.id).await.is_ok());
	assert!(service.fetch_user(&admin, member.id).await.is_ok());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PACE_PG_DSN to run."]
async fn role_changes_and_deletion_respect_the_order() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping role_changes_and_deletion_respect_the_order; set PACE_PG_DSN to run this test.");

		return;
	};
	let service = build_service(test_db.dsn().to_string(), Arc::new(StubWeather::new("clear"))).await;
	let member = seed_user(&service, "member", Role::Member).await;
	let manager = seed_user(&service, "manager", Role::Manager).await;
	let admin = seed_user(&service, "admin", Role::Admin).await;

	// A manager may promote a member to manager, never to admin.
	let promoted = service
		.update_user_role(&manager, member.id, UserRoleUpdate { role: Role::Manager })
		.await
		.expect("Promotion must succeed.");

	assert_eq!(promoted.role, Role::Manager);
	assert!(matches!(
		service.update_user_role(&manager, member.id, UserRoleUpdate { role: Role::Admin }).await,
		Err(Error::Validation { .. }),
	));

	// A member cannot reach anyone else, and cannot escalate themselves.
	assert!(matches!(
		service.update_user_role(&member, manager.id, UserRoleUpdate { role: Role::Member }).await,
		Err(Error::NotFound),
	));

	let demoted = service
		.update_user_role(&admin, member.id, UserRoleUpdate { role: Role::Member })
		.await
		.expect("Demotion must succeed.");

	assert_eq!(demoted.role, Role::Member);

	assert!(matches!(
		service.update_user_role(&member, member.id, UserRoleUpdate { role: Role::Admin }).await,
		Err(Error::Validation { .. }),
	));

	// Deletion follows visibility: a manager cannot delete an admin.
	assert!(matches!(service.delete_user(&manager, admin.id).await, Err(Error::NotFound)));
	service.delete_user(&admin, member.id).await.expect("Admin delete must succeed.");
	assert!(matches!(service.fetch_user(&admin, member.id).await, Err(Error::NotFound)));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
