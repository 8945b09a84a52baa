//! Minimal client for the gist (hosted snippet) API.

mod client;
mod error;
mod types;

pub use client::GistClient;
pub use error::GistError;
pub use types::*;
