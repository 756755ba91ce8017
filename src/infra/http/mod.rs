//! HTTP adapter for the remote posts service.

mod client;

pub use client::HttpPostGateway;
