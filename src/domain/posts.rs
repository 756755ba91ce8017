use std::num::NonZeroU32;

use postboard_api_types::{PostId, PostResource, PostWriteRequest};

use super::error::DomainError;

/// Largest batch the remote service hands out in one list call.
pub const MAX_BATCH: u32 = 100;

/// A post as the session knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: impl Into<PostId>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

impl From<PostResource> for Post {
    fn from(resource: PostResource) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            body: resource.body,
        }
    }
}

/// Number of posts requested by a fetch; always within `1..=MAX_BATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostCount(NonZeroU32);

impl PostCount {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value > MAX_BATCH {
            return Err(DomainError::out_of_range(
                "post count",
                1,
                u64::from(MAX_BATCH),
                u64::from(value),
            ));
        }
        NonZeroU32::new(value).map(Self).ok_or_else(|| {
            DomainError::out_of_range("post count", 1, u64::from(MAX_BATCH), u64::from(value))
        })
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Title and body for a create or replace call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let body = body.into();
        ensure_non_empty(&title, "title")?;
        ensure_non_empty(&body, "body")?;
        Ok(Self { title, body })
    }
}

impl From<PostDraft> for PostWriteRequest {
    fn from(draft: PostDraft) -> Self {
        Self {
            title: draft.title,
            body: draft.body,
        }
    }
}

/// Reject empty text. Whitespace counts as content.
pub fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::missing_field(field));
    }
    Ok(())
}
