//! REST backend client.

mod client;
mod dto;

pub use client::{RestClient, normalize_base_url};
