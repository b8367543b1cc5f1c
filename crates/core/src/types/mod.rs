//! Core types for Moodshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::ProductId;
pub use price::{Price, PriceError};
pub use status::StockStatus;
