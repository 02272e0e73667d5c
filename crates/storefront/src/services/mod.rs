//! Domain operations over the site's storage.
//!
//! Each service borrows a [`Storage`](crate::store::Storage) and performs a
//! single read-modify-write per call.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthService, RegisterOutcome};
pub use cart::CartService;
pub use catalog::CatalogService;
