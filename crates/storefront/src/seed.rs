//! First-run data seeding.
//!
//! Writes default content for every collection that is not already present.
//! Runs at page load before anything else reads the store.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use sample_site_core::{NewsId, Price, ProductId};

use crate::models::{CartItem, NewsItem, Product, User};
use crate::store::{Lookup, Storage, StoreError, keys};

/// Which collections a call to [`initialize`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Keys that were written, in seeding order.
    pub written: Vec<&'static str>,
}

impl SeedReport {
    /// Returns `true` if nothing needed seeding.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }
}

/// Seed every missing collection.
///
/// A collection is present when its text parses as JSON and is not `null`,
/// `false`, `0` or `""`. Its records are not checked, so data of another shape
/// is left alone. Idempotent: a second call finds every collection present and
/// writes nothing. Text that does not parse counts as missing under the
/// lenient policy and is replaced with its default.
///
/// # Errors
///
/// Returns `StoreError::Malformed` for unparseable text under the strict
/// policy, or the backend's error if a write fails.
#[instrument(skip_all)]
pub fn initialize(storage: &Storage) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    seed_collection::<User>(storage, keys::USERS, Vec::new, &mut report)?;
    seed_collection(storage, keys::PRODUCTS, default_products, &mut report)?;
    seed_collection(storage, keys::NEWS, default_news, &mut report)?;
    seed_collection::<CartItem>(storage, keys::CART, Vec::new, &mut report)?;

    if !report.is_noop() {
        info!(collections = ?report.written, "Seeded default data");
    }

    Ok(report)
}

fn seed_collection<T: Serialize>(
    storage: &Storage,
    key: &'static str,
    default: impl FnOnce() -> Vec<T>,
    report: &mut SeedReport,
) -> Result<(), StoreError> {
    match storage.get::<Value>(key) {
        Lookup::Found(value) if !is_falsy(&value) => return Ok(()),
        Lookup::Found(_) | Lookup::Absent => {}
        Lookup::Malformed(source) => storage.on_malformed(key, source)?,
    }

    storage.set(key, &default())?;
    report.written.push(key);
    Ok(())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// The seeded product catalog.
#[must_use]
pub fn default_products() -> Vec<Product> {
    let product = |id, name: &str, category: &str, price, description: &str, image: &str| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::from_whole(price),
        description: description.to_string(),
        image: image.to_string(),
    };

    vec![
        product(
            1,
            "Switch 24 Port",
            "switches",
            120,
            "Managed Switch 24 Port Layer 3",
            "product1.jpg",
        ),
        product(
            2,
            "Router Wifi 6",
            "routers",
            180,
            "High-speed Wifi 6 Router",
            "product2.jpg",
        ),
        product(
            3,
            "Firewall Pro",
            "firewalls",
            450,
            "Enterprise Firewall System",
            "product3.jpg",
        ),
        product(
            4,
            "Access Point",
            "access-points",
            85,
            "Wireless Access Point",
            "product4.jpg",
        ),
    ]
}

/// The seeded news articles.
#[must_use]
pub fn default_news() -> Vec<NewsItem> {
    let item = |id, title: &str, category: &str, content: &str, (y, m, d), image: &str| NewsItem {
        id: NewsId::new(id),
        title: title.to_string(),
        category: category.to_string(),
        content: content.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
        image: image.to_string(),
    };

    vec![
        item(
            1,
            "New Router Release",
            "news",
            "Company releases new WiFi 6 router",
            (2025, 1, 15),
            "news1.jpg",
        ),
        item(
            2,
            "Network Security Tips",
            "tips",
            "Best practices for network security",
            (2025, 1, 10),
            "news2.jpg",
        ),
    ]
}
