mod commands;
mod service;
pub mod types;


pub use service::*;
pub use types::{
    DEFAULT_CATALOG_SIZE, FetchSettings, Notice, Operation, PostError, StartOffset,
};
