//! Domain models stored in the site's collections.

pub mod cart;
pub mod catalog;
pub mod user;

pub use cart::CartItem;
pub use catalog::{NewsItem, Product};
pub use user::User;
