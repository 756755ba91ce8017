//! Gateway trait describing the remote posts service.

use std::fmt;

use async_trait::async_trait;
use postboard_api_types::{ListPostsQuery, PostId, PostResource, PostWriteRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    Url(String),
}

impl GatewayError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// The four calls the session makes against the posts service.
///
/// Implementations must treat every non-success status as
/// [`GatewayError::Status`], whatever the payload says.
#[async_trait]
pub trait PostGateway: Send + Sync {
    async fn list_posts(&self, query: ListPostsQuery) -> Result<Vec<PostResource>, GatewayError>;

    async fn create_post(&self, request: &PostWriteRequest) -> Result<PostResource, GatewayError>;

    async fn replace_post(
        &self,
        id: &PostId,
        request: &PostWriteRequest,
    ) -> Result<PostResource, GatewayError>;

    async fn patch_post(
        &self,
        id: &PostId,
        request: &PostWriteRequest,
    ) -> Result<PostResource, GatewayError>;
}
