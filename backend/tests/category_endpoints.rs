//! End-to-end tests for the category endpoints over in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::Value;

use carnet::domain::ports::{CategoryCache, CategoryCacheKey, CategoryCacheScope};
use support::{Browser, World, field, location};

#[actix_web::test]
async fn created_categories_are_listed_for_their_owner() {
    let world = World::new(CategoryCacheScope::Global);
    let alice = world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;

    let response = browser
        .post_form(&app, "/category/new", &[("name", "Family")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/category");

    let list = browser.get_json(&app, "/category").await;
    assert_eq!(field(&list, "name"), ["Family"]);
    assert_eq!(field(&list, "owner"), [alice.id().to_string()]);
}

#[actix_web::test]
async fn two_creates_are_both_listed_and_warm_the_shared_key() {
    let world = World::new(CategoryCacheScope::Global);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;

    for name in ["Work", "Family"] {
        let response = browser.post_form(&app, "/category/new", &[("name", name)]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    assert!(
        !world
            .cache
            .is_hit(&CategoryCacheKey::global())
            .await
            .expect("cache probe"),
        "writes invalidate the cached list"
    );

    let list = browser.get_json(&app, "/category").await;
    assert_eq!(field(&list, "name"), ["Work", "Family"]);
    assert!(
        world
            .cache
            .is_hit(&CategoryCacheKey::global())
            .await
            .expect("cache probe")
    );
}

#[rstest]
#[case(CategoryCacheScope::Global, &["Family"])]
#[case(CategoryCacheScope::PerOwner, &[])]
#[actix_web::test]
async fn cache_scope_decides_what_another_user_sees(
    #[case] scope: CategoryCacheScope,
    #[case] seen_by_bob: &[&str],
) {
    let world = World::new(scope);
    world.member("alice").await;
    world.member("bob").await;
    let app = actix_test::init_service(world.app()).await;

    let mut alice = Browser::default();
    alice.login(&app, "alice").await;
    alice
        .post_form(&app, "/category/new", &[("name", "Family")])
        .await;
    alice.get_json(&app, "/category").await;

    let mut bob = Browser::default();
    bob.login(&app, "bob").await;
    let list = bob.get_json(&app, "/category").await;
    assert_eq!(field(&list, "name"), seen_by_bob);
}

#[actix_web::test]
async fn deleting_twice_fails_route_resolution_the_second_time() {
    let world = World::new(CategoryCacheScope::Global);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;
    browser
        .post_form(&app, "/category/new", &[("name", "Work")])
        .await;

    let list = browser.get_json(&app, "/category").await;
    let id = field(&list, "id").remove(0);
    let token = field(&list, "deleteToken").remove(0);
    let path = format!("/category/delete/{id}");

    let first = browser.delete(&app, &path, Some(&token)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(field(&browser.get_json(&app, "/category").await, "id"), Vec::<String>::new());

    let second = browser.delete(&app, &path, Some(&token)).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn long_lists_issue_tokens_that_still_delete() {
    let world = World::new(CategoryCacheScope::PerOwner);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;
    for n in 0..100 {
        let response = browser
            .post_form(&app, "/category/new", &[("name", format!("Group {n}"))])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let list = browser.get_json(&app, "/category").await;
    let ids = field(&list, "id");
    let tokens = field(&list, "deleteToken");
    assert_eq!(ids.len(), 100);

    let response = browser
        .delete(&app, &format!("/category/delete/{}", ids[42]), Some(&tokens[42]))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let remaining = field(&browser.get_json(&app, "/category").await, "id");
    assert_eq!(remaining.len(), 99);
    assert!(!remaining.contains(&ids[42]));
}

#[actix_web::test]
async fn delete_with_a_wrong_token_keeps_the_category() {
    let world = World::new(CategoryCacheScope::PerOwner);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;
    browser
        .post_form(&app, "/category/new", &[("name", "Work")])
        .await;
    let id = field(&browser.get_json(&app, "/category").await, "id").remove(0);

    let response = browser
        .delete(&app, &format!("/category/delete/{id}"), Some("not-the-token"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        field(&browser.get_json(&app, "/category").await, "id"),
        [id]
    );
}

#[actix_web::test]
async fn invalid_names_answer_with_the_form_view() {
    let world = World::new(CategoryCacheScope::Global);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;

    let response = browser
        .post_form(&app, "/category/new", &[("name", "  ")])
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["form"]["name"], "  ");
    assert!(body["errors"]["name"].is_array());
    assert_eq!(field(&browser.get_json(&app, "/category").await, "id"), Vec::<String>::new());
}

#[actix_web::test]
async fn editing_renames_in_place() {
    let world = World::new(CategoryCacheScope::Global);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;
    browser
        .post_form(&app, "/category/new", &[("name", "Work")])
        .await;
    let id = field(&browser.get_json(&app, "/category").await, "id").remove(0);
    let path = format!("/category/{id}/edit");

    let form = browser.get_json(&app, &path).await;
    assert_eq!(form["form"]["name"], "Work");

    let response = browser.post_form(&app, &path, &[("name", "Office")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let list = browser.get_json(&app, "/category").await;
    assert_eq!(field(&list, "id"), [id]);
    assert_eq!(field(&list, "name"), ["Office"]);
}

#[actix_web::test]
async fn foreign_categories_are_not_found() {
    let world = World::new(CategoryCacheScope::PerOwner);
    world.member("alice").await;
    world.member("bob").await;
    let app = actix_test::init_service(world.app()).await;

    let mut alice = Browser::default();
    alice.login(&app, "alice").await;
    alice
        .post_form(&app, "/category/new", &[("name", "Private")])
        .await;
    let id = field(&alice.get_json(&app, "/category").await, "id").remove(0);

    let mut bob = Browser::default();
    bob.login(&app, "bob").await;
    let response = bob
        .send(
            &app,
            actix_test::TestRequest::get().uri(&format!("/category/{id}/edit")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/category/not-a-uuid/edit")]
#[case("/category/42/edit")]
#[actix_web::test]
async fn non_uuid_ids_are_not_found(#[case] path: &str) {
    let world = World::new(CategoryCacheScope::Global);
    world.member("alice").await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "alice").await;

    let response = browser
        .send(&app, actix_test::TestRequest::get().uri(path))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn anonymous_requests_are_unauthorised() {
    let world = World::new(CategoryCacheScope::Global);
    let app = actix_test::init_service(world.app()).await;

    let response = Browser::default()
        .send(&app, actix_test::TestRequest::get().uri("/category"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("trace-id"));
}

#[actix_web::test]
async fn accounts_without_role_user_are_forbidden() {
    let world = World::new(CategoryCacheScope::Global);
    world.register("viewer", &["ROLE_VIEWER"]).await;
    let app = actix_test::init_service(world.app()).await;
    let mut browser = Browser::default();
    browser.login(&app, "viewer").await;

    for path in ["/category", "/category/new"] {
        let response = browser
            .send(&app, actix_test::TestRequest::get().uri(path))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "GET {path}");
    }
    let response = browser
        .post_form(&app, "/category/new", &[("name", "Work")])
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
