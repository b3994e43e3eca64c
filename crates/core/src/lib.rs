//! Frost Bites Core - Shared types library.
//!
//! This crate provides common types used across all Frost Bites components:
//! - `storefront` - The HTTP API (auth, product CRUD)
//! - `client` - Client-side state: auth sync, route gating, cart, catalog
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. The same wire types are serialized by the server
//! and deserialized by the client, so the two cannot drift apart.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and products
//! - [`api`] - Request and response bodies of the HTTP API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
