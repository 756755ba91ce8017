//! Wire types for the remote posts service.
//!
//! The service speaks plain JSON: posts are `{id, title, body}` objects and
//! writes send `{title, body}`. Identifiers are usually integers, but some
//! deployments hand out strings, so [`PostId`] accepts both.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a post, as assigned by the remote service or by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(value) => write!(f, "{value}"),
            PostId::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        PostId::Number(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId::Text(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        PostId::Text(value)
    }
}

/// A post as returned by list, create, replace and patch calls.
///
/// Echo responses may omit fields they did not touch; missing text defaults
/// to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResource {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Body of `POST /posts`, `PUT /posts/{id}` and `PATCH /posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWriteRequest {
    pub title: String,
    pub body: String,
}

/// Window selection for `GET /posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPostsQuery {
    pub start: u32,
    pub limit: u32,
}

impl ListPostsQuery {
    pub fn new(start: u32, limit: u32) -> Self {
        Self { start, limit }
    }

    /// Query pairs in the `_start`/`_limit` convention of the service.
    pub fn to_pairs(self) -> [(&'static str, String); 2] {
        [
            ("_start", self.start.to_string()),
            ("_limit", self.limit.to_string()),
        ]
    }
}
