//! Sample Site Storefront library.
//!
//! Everything behind the demo shop's pages: a key/value store, first-run
//! seeding, account and cart operations, form validation and the controllers
//! bound to the page's forms.
//!
//! # Architecture
//!
//! - [`store`] - Key/value backends and the typed JSON [`Storage`](store::Storage) wrapper
//! - [`seed`] - Default collections written on first load
//! - [`services`] - Registration, login, cart and catalog operations
//! - [`validation`] - Field predicates for the registration form
//! - [`controllers`] - [`Site`](controllers::Site), form controllers, feedback and navigation
//!
//! Services borrow a `Storage` instead of reaching for a global, so every
//! operation can be exercised against an in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;
pub mod validation;

pub use config::SiteConfig;
pub use controllers::{FormData, FormId, Page, Site};
pub use error::SiteError;
pub use store::Storage;
