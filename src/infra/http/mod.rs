//! HTTP transport for the admin REST backend.

mod client;

pub use client::HttpResourceApi;
