//! Tests for the user lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockNotifier, MockUserStore};

fn stored_user(id: i64, name: &str, email: &str, age: i32, status: UserStatus) -> User {
    User {
        id: UserId::try_new(id).expect("positive id"),
        name: name.to_owned(),
        email: email.to_owned(),
        age,
        status,
        created_at: Utc::now(),
    }
}

fn service(
    store: MockUserStore,
    notifier: MockNotifier,
) -> UserService<MockUserStore, MockNotifier> {
    UserService::new(Arc::new(store), Arc::new(notifier))
}

fn create_request(name: Option<&str>, email: Option<&str>, age: Option<i32>) -> CreateUserRequest {
    CreateUserRequest {
        name: name.map(str::to_owned),
        email: email.map(str::to_owned),
        age,
    }
}

#[tokio::test]
async fn create_user_persists_active_user_and_sends_one_welcome() {
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(|_| Ok(false));
    store
        .expect_create()
        .withf(|draft: &NewUser| {
            draft.name == "Ada"
                && draft.email == "ada@example.com"
                && draft.age == 36
                && draft.status == UserStatus::Active
        })
        .times(1)
        .return_once(|draft| {
            Ok(User {
                id: UserId::try_new(1).expect("positive id"),
                name: draft.name,
                email: draft.email,
                age: draft.age,
                status: draft.status,
                created_at: Utc::now(),
            })
        });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_welcome()
        .withf(|email, name| email == "ada@example.com" && name == "Ada")
        .times(1)
        .return_once(|_, _| Ok(()));

    let created = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some("ada@example.com"), Some(36)))
        .await
        .expect("create succeeds");

    assert_eq!(created.id.get(), 1);
    assert_eq!(created.status, UserStatus::Active);
}

#[tokio::test]
async fn create_user_trims_name_and_email_before_storage() {
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(|_| Ok(false));
    store
        .expect_create()
        .withf(|draft: &NewUser| draft.name == "Ada" && draft.email == "ada@example.com")
        .times(1)
        .return_once(|draft| {
            Ok(User {
                id: UserId::try_new(7).expect("positive id"),
                name: draft.name,
                email: draft.email,
                age: draft.age,
                status: draft.status,
                created_at: Utc::now(),
            })
        });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_welcome()
        .times(1)
        .return_once(|_, _| Ok(()));

    service(store, notifier)
        .create_user(create_request(
            Some("  Ada  "),
            Some("  ada@example.com  "),
            Some(30),
        ))
        .await
        .expect("create succeeds");
}

#[rstest]
#[case::missing_name(None, Some("ada@example.com"), Some(30))]
#[case::empty_name(Some(""), Some("ada@example.com"), Some(30))]
#[case::blank_name(Some("   "), Some("ada@example.com"), Some(30))]
#[case::missing_email(Some("Ada"), None, Some(30))]
#[case::blank_email(Some("Ada"), Some("   "), Some(30))]
#[case::missing_age(Some("Ada"), Some("ada@example.com"), None)]
#[case::negative_age(Some("Ada"), Some("ada@example.com"), Some(-1))]
#[tokio::test]
async fn create_user_rejects_invalid_input_before_touching_the_store(
    #[case] name: Option<&str>,
    #[case] email: Option<&str>,
    #[case] age: Option<i32>,
) {
    let mut store = MockUserStore::new();
    store.expect_exists_by_email().times(0);
    store.expect_create().times(0);
    let mut notifier = MockNotifier::new();
    notifier.expect_send_welcome().times(0);

    let error = service(store, notifier)
        .create_user(create_request(name, email, age))
        .await
        .expect_err("invalid input");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[rstest]
#[case::no_at("ada.example.com")]
#[case::no_dot_after_at("ada@examplecom")]
#[case::too_short("a@b.c")]
#[tokio::test]
async fn create_user_rejects_malformed_email_after_presence_checks(#[case] email: &str) {
    let mut store = MockUserStore::new();
    store.expect_exists_by_email().times(0);
    store.expect_create().times(0);
    let notifier = MockNotifier::new();

    let error = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some(email), Some(30)))
        .await
        .expect_err("malformed email");

    assert_eq!(error.code(), ErrorCode::InvalidEmailFormat);
}

#[tokio::test]
async fn create_user_rejects_duplicate_email_without_writing() {
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(true));
    store.expect_create().times(0);
    let mut notifier = MockNotifier::new();
    notifier.expect_send_welcome().times(0);

    let error = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some("ada@example.com"), Some(30)))
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::DuplicateEmail);
}

#[tokio::test]
async fn create_user_maps_store_level_email_conflict_to_duplicate() {
    // Two concurrent creates can both pass the existence check; the store's
    // unique constraint reports the loser.
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    store
        .expect_create()
        .times(1)
        .return_once(|draft| Err(UserStoreError::email_taken(draft.email)));
    let mut notifier = MockNotifier::new();
    notifier.expect_send_welcome().times(0);

    let error = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some("ada@example.com"), Some(30)))
        .await
        .expect_err("store-level conflict");

    assert_eq!(error.code(), ErrorCode::DuplicateEmail);
}

#[tokio::test]
async fn create_user_succeeds_when_welcome_dispatch_fails() {
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    store.expect_create().times(1).return_once(|draft| {
        Ok(User {
            id: UserId::try_new(3).expect("positive id"),
            name: draft.name,
            email: draft.email,
            age: draft.age,
            status: draft.status,
            created_at: Utc::now(),
        })
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_welcome()
        .times(1)
        .return_once(|_, _| Err(NotifierError::dispatch("smtp unreachable")));

    let created = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some("ada@example.com"), Some(30)))
        .await
        .expect("dispatch failure does not fail the operation");

    assert_eq!(created.id.get(), 3);
}

#[tokio::test]
async fn create_user_accepts_age_zero() {
    let mut store = MockUserStore::new();
    store
        .expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    store
        .expect_create()
        .withf(|draft: &NewUser| draft.age == 0)
        .times(1)
        .return_once(|draft| {
            Ok(User {
                id: UserId::try_new(4).expect("positive id"),
                name: draft.name,
                email: draft.email,
                age: draft.age,
                status: draft.status,
                created_at: Utc::now(),
            })
        });
    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_welcome()
        .times(1)
        .return_once(|_, _| Ok(()));

    let created = service(store, notifier)
        .create_user(create_request(Some("Ada"), Some("ada@example.com"), Some(0)))
        .await
        .expect("age zero accepted at creation");

    assert_eq!(created.age, 0);
}

#[rstest]
#[case::missing(None)]
#[case::zero(Some(0))]
#[case::negative(Some(-5))]
#[tokio::test]
async fn user_by_id_rejects_non_positive_ids_without_store_query(#[case] id: Option<i64>) {
    let mut store = MockUserStore::new();
    store.expect_find_by_id().times(0);

    let error = service(store, MockNotifier::new())
        .user_by_id(id)
        .await
        .expect_err("invalid id");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn user_by_id_reports_missing_users() {
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .withf(|id| id.get() == 9)
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(store, MockNotifier::new())
        .user_by_id(Some(9))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn user_by_email_trims_before_lookup() {
    let user = stored_user(1, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(move |_| Ok(Some(user)));

    let found = service(store, MockNotifier::new())
        .user_by_email("  ada@example.com  ")
        .await
        .expect("lookup succeeds");

    assert_eq!(found.email, "ada@example.com");
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[tokio::test]
async fn user_by_email_rejects_blank_input(#[case] email: &str) {
    let mut store = MockUserStore::new();
    store.expect_find_by_email().times(0);

    let error = service(store, MockNotifier::new())
        .user_by_email(email)
        .await
        .expect_err("blank email");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[tokio::test]
async fn search_rejects_blank_fragment(#[case] fragment: &str) {
    let mut store = MockUserStore::new();
    store.expect_find_by_name_contains().times(0);

    let error = service(store, MockNotifier::new())
        .search_users_by_name(fragment)
        .await
        .expect_err("blank fragment");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn update_applies_trimmed_name_and_positive_age() {
    let existing = stored_user(5, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_update()
        .withf(|user: &User| user.name == "Grace" && user.age == 45)
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let updated = service(store, MockNotifier::new())
        .update_user(UpdateUserRequest {
            id: Some(5),
            name: Some("  Grace  ".to_owned()),
            age: Some(45),
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.age, 45);
}

#[tokio::test]
async fn update_ignores_blank_name_and_non_positive_age() {
    let existing = stored_user(5, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_update()
        .withf(|user: &User| user.name == "Ada" && user.age == 30)
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let updated = service(store, MockNotifier::new())
        .update_user(UpdateUserRequest {
            id: Some(5),
            name: Some("   ".to_owned()),
            age: Some(0),
        })
        .await
        .expect("update succeeds without changes");

    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.age, 30);
}

#[tokio::test]
async fn update_propagates_not_found() {
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    store.expect_update().times(0);

    let error = service(store, MockNotifier::new())
        .update_user(UpdateUserRequest {
            id: Some(99),
            name: Some("Grace".to_owned()),
            age: None,
        })
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn deactivate_persists_inactive_status_and_notifies() {
    let existing = stored_user(2, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_update()
        .withf(|user: &User| user.status == UserStatus::Inactive)
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_deactivation()
        .withf(|email, name| email == "ada@example.com" && name == "Ada")
        .times(1)
        .return_once(|_, _| Ok(()));

    let updated = service(store, notifier)
        .deactivate_user(Some(2))
        .await
        .expect("deactivate succeeds");

    assert_eq!(updated.status, UserStatus::Inactive);
}

#[tokio::test]
async fn deactivate_rejects_already_inactive_users() {
    let existing = stored_user(2, "Ada", "ada@example.com", 30, UserStatus::Inactive);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store.expect_update().times(0);
    let mut notifier = MockNotifier::new();
    notifier.expect_send_deactivation().times(0);

    let error = service(store, notifier)
        .deactivate_user(Some(2))
        .await
        .expect_err("already inactive");

    assert_eq!(error.code(), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn reactivate_restores_active_status_and_notifies() {
    let existing = stored_user(2, "Ada", "ada@example.com", 30, UserStatus::Inactive);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_update()
        .withf(|user: &User| user.status == UserStatus::Active)
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_reactivation()
        .times(1)
        .return_once(|_, _| Ok(()));

    let updated = service(store, notifier)
        .reactivate_user(Some(2))
        .await
        .expect("reactivate succeeds");

    assert_eq!(updated.status, UserStatus::Active);
}

#[rstest]
#[case::active(UserStatus::Active)]
#[case::suspended(UserStatus::Suspended)]
#[tokio::test]
async fn reactivate_rejects_users_that_are_not_inactive(#[case] status: UserStatus) {
    let existing = stored_user(2, "Ada", "ada@example.com", 30, status);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store.expect_update().times(0);
    let mut notifier = MockNotifier::new();
    notifier.expect_send_reactivation().times(0);

    let error = service(store, notifier)
        .reactivate_user(Some(2))
        .await
        .expect_err("not inactive");

    assert_eq!(error.code(), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn deactivate_succeeds_when_dispatch_fails() {
    let existing = stored_user(2, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_update()
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_deactivation()
        .times(1)
        .return_once(|_, _| Err(NotifierError::dispatch("smtp unreachable")));

    let updated = service(store, notifier)
        .deactivate_user(Some(2))
        .await
        .expect("dispatch failure does not fail the operation");

    assert_eq!(updated.status, UserStatus::Inactive);
}

#[tokio::test]
async fn delete_removes_the_resolved_user_without_notification() {
    let existing = stored_user(6, "Ada", "ada@example.com", 30, UserStatus::Active);
    let mut store = MockUserStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    store
        .expect_delete()
        .withf(|user: &User| user.id.get() == 6)
        .times(1)
        .return_once(|_| Ok(()));

    let notifier = MockNotifier::new();

    service(store, notifier)
        .delete_user(Some(6))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_propagates_invalid_input_without_store_calls() {
    let mut store = MockUserStore::new();
    store.expect_find_by_id().times(0);
    store.expect_delete().times(0);

    let error = service(store, MockNotifier::new())
        .delete_user(Some(-1))
        .await
        .expect_err("invalid id");

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn list_adult_users_queries_the_adult_threshold() {
    let mut store = MockUserStore::new();
    store
        .expect_find_by_age_at_least()
        .withf(|age| *age == ADULT_AGE)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let adults = service(store, MockNotifier::new())
        .list_adult_users()
        .await
        .expect("list succeeds");

    assert!(adults.is_empty());
}

#[tokio::test]
async fn count_active_users_passes_through() {
    let mut store = MockUserStore::new();
    store
        .expect_count_by_status()
        .withf(|status| *status == UserStatus::Active)
        .times(1)
        .return_once(|_| Ok(4));

    let count = service(store, MockNotifier::new())
        .count_active_users()
        .await
        .expect("count succeeds");

    assert_eq!(count, 4);
}

#[tokio::test]
async fn store_connection_failures_surface_as_service_unavailable() {
    let mut store = MockUserStore::new();
    store
        .expect_find_by_status()
        .times(1)
        .return_once(|_| Err(UserStoreError::connection("pool unavailable")));

    let error = service(store, MockNotifier::new())
        .list_active_users()
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn store_query_failures_surface_as_internal_errors() {
    let mut store = MockUserStore::new();
    store
        .expect_find_by_name_contains()
        .times(1)
        .return_once(|_| Err(UserStoreError::query("relation missing")));

    let error = service(store, MockNotifier::new())
        .search_users_by_name("Ann")
        .await
        .expect_err("internal error");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
