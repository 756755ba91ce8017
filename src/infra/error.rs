use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),
    #[error("failed to write `{}`: {source}", path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn write_document(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteDocument {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failure_names_the_target_path() {
        let err = InfraError::write_document(
            "/missing/posts.html",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert_eq!(
            err.to_string(),
            "failed to write `/missing/posts.html`: no such directory"
        );
    }
}
