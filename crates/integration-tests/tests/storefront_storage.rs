//! Integration tests for the file-backed store.

use sample_site_integration_tests::TempStorage;
use sample_site_storefront::SiteError;
use sample_site_storefront::controllers::fields;
use sample_site_storefront::models::Product;
use sample_site_storefront::store::{FileStore, KeyValueStore, MalformedPolicy, StoreError, keys};
use sample_site_storefront::{FormData, FormId, Page, Site, SiteConfig};

fn write_raw(temp: &TempStorage, key: &str, text: &str) {
    let store = FileStore::open(temp.path()).expect("open store");
    store.set_item(key, text).expect("write");
}

#[test]
fn test_storage_file_layout() {
    let temp = TempStorage::new();
    Site::open(Page::new(), temp.config()).expect("open site");

    let text = std::fs::read_to_string(temp.path()).expect("storage file");
    let entries: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).expect("json object");

    for key in [keys::USERS, keys::PRODUCTS, keys::NEWS, keys::CART] {
        let raw = entries
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| panic!("{key} missing"));
        let value: serde_json::Value = serde_json::from_str(raw).expect("value is json text");
        assert!(value.is_array(), "{key} should hold an array");
    }
    assert!(!entries.contains_key(keys::CURRENT_USER));
}

#[test]
fn test_lenient_reseeds_malformed_products() {
    let temp = TempStorage::new();
    write_raw(&temp, keys::PRODUCTS, "{not json");

    let site = Site::open(Page::new(), temp.config()).expect("open site");
    assert!(site.seed_report().written.contains(&keys::PRODUCTS));

    let products: Vec<Product> = site.catalog().products().expect("products");
    assert_eq!(products.len(), 4);
}

#[test]
fn test_lenient_treats_malformed_current_user_as_logged_out() {
    let temp = TempStorage::new();
    write_raw(&temp, keys::CURRENT_USER, "\"just a string\"");

    let site = Site::open(Page::new(), temp.config()).expect("open site");
    assert_eq!(site.current_user().expect("current user"), None);
}

#[test]
fn test_strict_reports_unparseable_collection() {
    let temp = TempStorage::new();
    write_raw(&temp, keys::USERS, "[{\"username\":");

    let config = SiteConfig {
        malformed_policy: MalformedPolicy::Strict,
        ..temp.config()
    };

    let err = Site::open(Page::new(), config).expect_err("strict open should fail");
    assert!(matches!(
        err,
        SiteError::Store(StoreError::Malformed { ref key, .. }) if key == keys::USERS
    ));
}

#[test]
fn test_strict_reports_unreadable_record() {
    let temp = TempStorage::new();
    write_raw(&temp, keys::USERS, "[{\"username\": 7}]");

    let config = SiteConfig {
        malformed_policy: MalformedPolicy::Strict,
        ..temp.config()
    };

    let site = Site::open(Page::new(), config).expect("open site");
    assert!(!site.seed_report().written.contains(&keys::USERS));

    let err = site.auth().users().expect_err("strict read should fail");
    assert!(matches!(err, StoreError::Malformed { ref key, .. } if key == keys::USERS));
}

#[test]
fn test_registration_keeps_users_written_elsewhere() {
    let temp = TempStorage::new();
    write_raw(
        &temp,
        keys::USERS,
        r#"[{"username":"bob","password":"pw1234"}]"#,
    );

    let mut site = Site::open(Page::full(), temp.config()).expect("open site");
    let mut form = FormData::new()
        .with(fields::USERNAME, "alice")
        .with(fields::PASSWORD, "secret")
        .with(fields::CONFIRM_PASSWORD, "secret")
        .with(fields::EMAIL, "alice@example.com")
        .with(fields::FULLNAME, "Alice");
    site.submit(FormId::Register, &mut form).expect("submit");
    drop(site);

    let reloaded = Site::open(Page::new(), temp.config()).expect("reload");
    let names: Vec<String> = reloaded
        .auth()
        .users()
        .expect("users")
        .into_iter()
        .map(|user| user.username)
        .collect();
    assert_eq!(names, ["bob", "alice"]);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let temp = TempStorage::new();
    std::fs::create_dir_all(temp.dir()).expect("mkdir");
    std::fs::write(temp.path(), "not an object").expect("write");

    let err = Site::open(Page::new(), temp.config()).expect_err("corrupt file");
    assert!(matches!(err, SiteError::Store(StoreError::CorruptFile { .. })));
}
