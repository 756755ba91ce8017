//! Application services: session state and the post operations that mutate it.

pub mod error;
pub mod gateway;
pub mod index;
mod lock;
pub mod posts;
pub mod view;
