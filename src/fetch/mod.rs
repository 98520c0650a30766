//! HTTP transport seam.
//!
//! [`HttpClient`] is the point where tests (or decorating wrappers) swap
//! the transport out from under the REST client; [`BasicClient`] is the
//! plain reqwest passthrough used in production.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;
