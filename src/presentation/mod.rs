//! Presentation: text and HTML projections of the session view, and the
//! interactive shell that drives it.

pub mod shell;
pub mod views;
