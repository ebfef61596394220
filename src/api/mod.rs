//! REST backend access: wire models, client, and error taxonomy.

mod client;
mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
