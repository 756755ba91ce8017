use thiserror::Error;

use crate::{
    application::posts::PostError, config::LoadError, infra::error::InfraError,
    presentation::shell::ShellError,
};

/// Failures that end the process. Post operation errors are only fatal
/// during one-shot commands; an interactive session reports and continues.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl AppError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Infra(_) | AppError::Post(_) | AppError::Shell(_) => 1,
        }
    }
}
