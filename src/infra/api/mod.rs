mod client;

pub use client::{ApiClient, DEFAULT_BASE_URL};
