//! curator — a terminal admin client for catalog categories.
//!
//! Manages categories (name, image, active flag) against a REST backend:
//! list, search, paginate, create, edit, toggle, delete. The full collection
//! is fetched in one request and the visible page is derived client-side.
//!
//! # Module Structure
//!
//! - `api` - REST client, wire models, and error taxonomy
//! - `store` - the in-memory category collection and its load lifecycle
//! - `view` - pure search/pagination projection of the collection
//! - `thumbnail` - per-row image probe state and placeholder rendering
//! - `app` - central application state and background-task events
//! - `ui` - ratatui event loop, input handling, and rendering
//! - `config` - optional TOML configuration
//! - `theme` - semantic style roles with dark/light variants
//! - `util` - unicode-aware text helpers

pub mod api;
pub mod app;
pub mod config;
pub mod store;
pub mod theme;
pub mod thumbnail;
pub mod ui;
pub mod util;
pub mod view;
