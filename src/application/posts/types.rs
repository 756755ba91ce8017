use std::fmt;
use std::num::NonZeroU32;

use postboard_api_types::PostId;
use rand::Rng;
use thiserror::Error;

use crate::{
    application::gateway::GatewayError,
    config::ApiSettings,
    domain::{error::DomainError, posts::MAX_BATCH},
};

/// The four request/response flows a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Replace,
    Patch,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Replace => "replace",
            Operation::Patch => "patch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{operation} rejected: {source}")]
    Validation {
        operation: Operation,
        #[source]
        source: DomainError,
    },
    #[error("position {position} does not match a displayed post")]
    InvalidPosition { position: usize },
    #[error("{operation} request failed: {source}")]
    Gateway {
        operation: Operation,
        #[source]
        source: GatewayError,
    },
}

impl PostError {
    pub fn validation(operation: Operation, source: DomainError) -> Self {
        Self::Validation { operation, source }
    }

    pub fn gateway(operation: Operation, source: GatewayError) -> Self {
        Self::Gateway { operation, source }
    }

    /// Message for the person driving the session.
    pub fn notification(&self) -> &'static str {
        match self {
            PostError::Validation {
                source: DomainError::OutOfRange { .. },
                ..
            } => "Enter a number of posts from 1 to 100!",
            PostError::Validation {
                operation: Operation::Patch,
                ..
            } => "Please fill in the post number and new title!",
            PostError::Validation { .. } => "Please fill in all fields!",
            PostError::InvalidPosition { .. } => "Invalid post number!",
            PostError::Gateway { operation, .. } => match operation {
                Operation::Fetch => "Failed to load posts.",
                Operation::Create => "Failed to create a new post.",
                Operation::Replace | Operation::Patch => "Failed to update the post.",
            },
        }
    }
}

/// Confirmation returned by a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Fetched { count: usize },
    Created { visible_id: usize },
    Updated { position: usize, id: PostId },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Fetched { count } => write!(f, "Loaded {count} posts."),
            Notice::Created { visible_id } => {
                write!(f, "New post #{visible_id} created successfully!")
            }
            Notice::Updated { position, id } => {
                write!(f, "Post #{position} (ID {id}) updated successfully!")
            }
        }
    }
}

/// Size of the catalog the default service exposes.
pub const DEFAULT_CATALOG_SIZE: NonZeroU32 = NonZeroU32::new(MAX_BATCH).unwrap();

/// How a fetch picks the first record of its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartOffset {
    #[default]
    Random,
    Fixed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    /// Number of records the service is known to hold.
    pub catalog_size: NonZeroU32,
    pub start: StartOffset,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            start: StartOffset::Random,
        }
    }
}

impl From<&ApiSettings> for FetchSettings {
    fn from(api: &ApiSettings) -> Self {
        Self {
            catalog_size: api.catalog_size,
            start: api
                .start_offset
                .map_or(StartOffset::Random, StartOffset::Fixed),
        }
    }
}

impl FetchSettings {
    /// Start of the window for a batch of `count` records.
    ///
    /// A random start stays below `catalog_size - count`; when the batch
    /// covers the whole catalog the window starts at zero.
    pub fn pick_start(&self, count: u32) -> u32 {
        match self.start {
            StartOffset::Fixed(start) => start,
            StartOffset::Random => {
                let span = self.catalog_size.get().saturating_sub(count);
                if span == 0 {
                    0
                } else {
                    rand::rng().random_range(0..span)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random(catalog: u32) -> FetchSettings {
        FetchSettings {
            catalog_size: NonZeroU32::new(catalog).expect("non-zero catalog"),
            start: StartOffset::Random,
        }
    }

    #[test]
    fn random_start_keeps_window_inside_catalog() {
        let settings = random(100);
        for count in [1, 5, 50, 99] {
            for _ in 0..64 {
                let start = settings.pick_start(count);
                assert!(start < 100 - count, "start {start} for count {count}");
            }
        }
    }

    #[test]
    fn full_catalog_batch_starts_at_zero() {
        assert_eq!(random(100).pick_start(100), 0);
        assert_eq!(random(10).pick_start(50), 0);
    }

    #[test]
    fn fixed_start_is_used_verbatim() {
        let settings = FetchSettings {
            start: StartOffset::Fixed(17),
            ..FetchSettings::default()
        };
        assert_eq!(settings.pick_start(5), 17);
    }

    #[test]
    fn notifications_follow_error_kind() {
        let invalid = PostError::InvalidPosition { position: 9 };
        assert_eq!(invalid.notification(), "Invalid post number!");

        let count = PostError::validation(
            Operation::Fetch,
            DomainError::out_of_range("post count", 1, 100, 0),
        );
        assert_eq!(count.notification(), "Enter a number of posts from 1 to 100!");

        let title = DomainError::missing_field("title");
        assert_eq!(
            PostError::validation(Operation::Replace, title.clone()).notification(),
            "Please fill in all fields!"
        );
        assert_eq!(
            PostError::validation(Operation::Patch, title).notification(),
            "Please fill in the post number and new title!"
        );

        let failed = PostError::gateway(Operation::Patch, GatewayError::status(500, ""));
        assert_eq!(failed.notification(), "Failed to update the post.");
    }
}
