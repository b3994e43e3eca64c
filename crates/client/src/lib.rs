//! Frost Bites Client - the state behind the shop's pages.
//!
//! Everything here is UI-framework agnostic: components own these structs and
//! call `&mut self` methods from their event handlers, then render from the
//! resulting state.
//!
//! # Modules
//!
//! - [`api`] - HTTP client for the storefront API and the traits it implements
//! - [`session`] - `is_authenticated` / `is_admin` kept in step with `/auth/verify`
//! - [`routing`] - Route table, auth gating and page chrome
//! - [`cart`] - In-memory shopping cart
//! - [`catalog`] - Cached product list with admin mutations
//! - [`notice`] - Toast-style notifications for the UI to drain
//!
//! # Example
//!
//! ```rust,ignore
//! use frostbites_client::{ApiClient, AuthSync, ClientConfig, MemoryTokenStore, Notices};
//!
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//! let mut notices = Notices::default();
//! let mut auth = AuthSync::new(MemoryTokenStore::default());
//!
//! auth.sync(&api, &mut notices).await;
//! let route = frostbites_client::routing::navigate("/admin", auth.flags());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod routing;
pub mod session;
pub mod token;

pub use api::{ApiClient, AuthApi, CatalogApi};
pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use notice::{Notice, NoticeLevel, Notices};
pub use routing::{Chrome, Resolution, Route};
pub use session::{AuthFlags, AuthSync};
pub use token::{MemoryTokenStore, TokenStore};
