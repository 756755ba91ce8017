//! postboard: a session client for a remote REST posts service.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
