//! Moodshop Core - catalog, cart and checkout logic.
//!
//! This crate provides everything the storefront knows about products and
//! orders:
//! - parsing a CSV product catalog
//! - filtering and ordering product listings
//! - the stock-bounded shopping cart
//! - checkout validation and order confirmations
//!
//! # Architecture
//!
//! The core crate does no I/O: no file access, no HTTP, no templates. The
//! storefront binary fetches catalog text and feeds it to [`catalog::parse`],
//! then owns a single [`Shop`] that all user actions are dispatched to.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and stock status
//! - [`catalog`] - CSV catalog parsing and placeholder images
//! - [`filter`] - Category and search filtering
//! - [`cart`] - In-memory cart with stock limits
//! - [`checkout`] - Checkout form validation and confirmations
//! - [`notice`] - Transient user-facing messages
//! - [`shop`] - Application state controller

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod filter;
pub mod notice;
pub mod shop;
pub mod types;

pub use cart::Cart;
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CheckoutForm, OrderConfirmation};
pub use error::ValidationError;
pub use filter::FilterSelection;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use shop::{Action, CatalogStatus, Outcome, Shop};
pub use types::*;
