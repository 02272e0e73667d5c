//! End-to-end tests for the storefront page.
//!
//! These tests drive the page the way a visitor would: submit forms, then
//! inspect the result panel, the location and the stored collections.

use std::time::Duration;

use sample_site_core::{Price, ProductId};
use sample_site_integration_tests::TempStorage;
use sample_site_storefront::controllers::fields;
use sample_site_storefront::{FormData, FormId, Page, Site};

fn registration(username: &str) -> FormData {
    FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::PASSWORD, "secret")
        .with(fields::CONFIRM_PASSWORD, "secret")
        .with(fields::EMAIL, format!("{username}@example.com"))
        .with(fields::FULLNAME, "Test User")
}

fn login(username: &str, password: &str) -> FormData {
    FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::PASSWORD, password)
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_register_then_login_redirects_to_landing() {
    let temp = TempStorage::new();
    let mut site = Site::open(Page::full(), temp.config()).expect("open site");

    site.submit(FormId::Register, &mut registration("alice"))
        .expect("register");
    assert!(site.result().expect("feedback").is_success());

    site.submit(FormId::Login, &mut login("alice", "secret"))
        .expect("login");

    let redirect = site.take_pending_navigation().expect("redirect scheduled");
    assert_eq!(redirect.target(), "index.html");

    tokio::time::advance(Duration::from_millis(1499)).await;
    tokio::task::yield_now().await;
    assert_eq!(site.location().current(), None);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(redirect.wait().await);
    assert_eq!(site.location().current().as_deref(), Some("index.html"));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let temp = TempStorage::new();
    let mut site = Site::open(Page::full(), temp.config()).expect("open site");

    site.submit(FormId::Register, &mut registration("alice"))
        .expect("first register");
    let outcome = site
        .submit(FormId::Register, &mut registration("alice"))
        .expect("second register")
        .expect("controller attached");

    let feedback = outcome.feedback.expect("feedback");
    assert!(!feedback.is_success());
    assert_eq!(feedback.text(), "Tên đăng nhập đã tồn tại");
    assert_eq!(site.auth().users().expect("users").len(), 1);
}

#[tokio::test]
async fn test_session_survives_reload() {
    let temp = TempStorage::new();

    {
        let mut site = Site::open(Page::full(), temp.config()).expect("open site");
        site.submit(FormId::Register, &mut registration("carol"))
            .expect("register");
        site.submit(FormId::Login, &mut login("carol", "secret"))
            .expect("login");
        if let Some(redirect) = site.take_pending_navigation() {
            redirect.cancel();
        }
    }

    let mut reloaded = Site::open(Page::new(), temp.config()).expect("reopen site");
    assert!(reloaded.seed_report().is_noop());
    assert_eq!(
        reloaded
            .current_user()
            .expect("current user")
            .map(|u| u.username),
        Some("carol".to_string())
    );

    reloaded.logout().expect("logout");
    assert_eq!(reloaded.current_user().expect("current user"), None);
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_cart_totals_across_reloads() {
    let temp = TempStorage::new();

    {
        let site = Site::open(Page::new(), temp.config()).expect("open site");
        let catalog = site.catalog();
        let cart = site.cart();

        let switch = catalog.product(ProductId::new(1)).expect("read").expect("switch");
        let access_point = catalog.product(ProductId::new(4)).expect("read").expect("ap");

        cart.add_to_cart(switch.clone()).expect("add");
        cart.add_to_cart(switch).expect("add again");
        cart.add_to_cart(access_point).expect("add ap");
    }

    let site = Site::open(Page::new(), temp.config()).expect("reopen site");
    let cart = site.cart();

    let lines = cart.get_cart().expect("cart");
    assert_eq!(lines.len(), 2);
    assert_eq!(cart.get_total_price().expect("total"), Price::from_whole(325));

    cart.remove_from_cart(ProductId::new(1)).expect("remove");
    cart.remove_from_cart(ProductId::new(1)).expect("remove again");
    assert_eq!(cart.get_total_price().expect("total"), Price::from_whole(85));
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_form_and_results() {
    let temp = TempStorage::new();
    let mut site = Site::open(Page::full(), temp.config()).expect("open site");

    let mut form = FormData::new().with(fields::QUERY, "  Router  ");
    site.submit(FormId::Search, &mut form).expect("search");

    assert_eq!(
        site.location().current().as_deref(),
        Some("search_result.html?q=Router")
    );

    let names: Vec<String> = site
        .catalog()
        .search_products("Router")
        .expect("search")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Router Wifi 6".to_string()]);
}
