//! Marigold Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront binary:
//! products as served by the remote catalog API, prices, and the cart
//! with its mutation rules.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async. The storefront crate owns all plumbing; everything
//! that can be unit-tested without a network lives here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   `Product` record
//! - [`cart`] - Cart line items and the add/remove/set-quantity rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartItem, ProductSummary};
pub use types::*;
