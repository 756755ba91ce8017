use postboard_api_types::{ListPostsQuery, PostId, PostWriteRequest};
use tracing::{debug, info, warn};

use crate::domain::{
    error::DomainError,
    posts::{Post, PostCount, PostDraft, ensure_non_empty},
};

use super::service::PostService;
use super::types::{Notice, Operation, PostError};

impl PostService {
    /// Load `count` posts from a random window and re-render the whole view.
    pub async fn fetch_batch(&self, count: u32) -> Result<Notice, PostError> {
        let count = PostCount::new(count).map_err(|err| reject(Operation::Fetch, err))?;
        let start = self.fetch.pick_start(count.get());
        let query = ListPostsQuery::new(start, count.get());

        debug!(start, limit = count.get(), "requesting post batch");
        let resources = self
            .gateway
            .list_posts(query)
            .await
            .map_err(|err| fail(Operation::Fetch, PostError::gateway(Operation::Fetch, err)))?;

        let posts: Vec<Post> = resources.into_iter().map(Post::from).collect();
        let fetched = posts.len();
        {
            let mut state = self.lock("fetch_batch");
            state.index.reset_with(&posts);
            state.view.render_all(&posts);
        }

        info!(start, fetched, "post batch rendered");
        Ok(Notice::Fetched { count: fetched })
    }

    /// Create a post and append it under the next display number.
    ///
    /// The display number replaces the identifier the service assigned.
    pub async fn create(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Notice, PostError> {
        let draft = PostDraft::new(title, body).map_err(|err| reject(Operation::Create, err))?;
        let submitted_body = draft.body.clone();
        let request = PostWriteRequest::from(draft);

        debug!(title = %request.title, "creating post");
        let created = self
            .gateway
            .create_post(&request)
            .await
            .map_err(|err| fail(Operation::Create, PostError::gateway(Operation::Create, err)))?;

        let visible_id = {
            let mut state = self.lock("create");
            let visible_id = state.index.len() + 1;
            let post = Post::new(
                PostId::Number(visible_id as u64),
                created.title,
                created.body,
            );
            state.index.append(&post);
            state
                .index
                .set_cached_body(post.id.clone(), submitted_body);
            state.view.append(&post);
            visible_id
        };

        info!(
            service_id = %created.id,
            visible_id,
            "post created; service-assigned id replaced by display number"
        );
        Ok(Notice::Created { visible_id })
    }

    /// Replace title and body of the post shown at `position`.
    pub async fn replace(
        &self,
        position: usize,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Notice, PostError> {
        let draft = PostDraft::new(title, body).map_err(|err| reject(Operation::Replace, err))?;
        let id = self.resolve_position(Operation::Replace, position)?;
        let request = PostWriteRequest::from(draft);

        debug!(position, id = %id, "replacing post");
        let replaced = self
            .gateway
            .replace_post(&id, &request)
            .await
            .map_err(|err| fail(Operation::Replace, PostError::gateway(Operation::Replace, err)))?;

        self.apply_update(Operation::Replace, Post::from(replaced));
        Ok(Notice::Updated { position, id })
    }

    /// Change the title of the post shown at `position`, resubmitting its cached body.
    pub async fn partial_update(
        &self,
        position: usize,
        title: impl Into<String>,
    ) -> Result<Notice, PostError> {
        let title = title.into();
        ensure_non_empty(&title, "title").map_err(|err| reject(Operation::Patch, err))?;
        let id = self.resolve_position(Operation::Patch, position)?;
        let body = self.cached_body(&id);
        let request = PostWriteRequest { title, body };

        debug!(position, id = %id, "patching post title");
        let patched = self
            .gateway
            .patch_post(&id, &request)
            .await
            .map_err(|err| fail(Operation::Patch, PostError::gateway(Operation::Patch, err)))?;

        self.apply_update(Operation::Patch, Post::from(patched));
        Ok(Notice::Updated { position, id })
    }

    fn resolve_position(&self, operation: Operation, position: usize) -> Result<PostId, PostError> {
        self.resolve(position)
            .ok_or_else(|| fail(operation, PostError::InvalidPosition { position }))
    }

    fn apply_update(&self, operation: Operation, post: Post) {
        let mut state = self.lock(operation.as_str());
        let outcome = state.view.upsert(&post);
        state.index.set_cached_body(post.id.clone(), post.body);
        info!(%operation, id = %post.id, ?outcome, "post reconciled");
    }
}

fn reject(operation: Operation, err: DomainError) -> PostError {
    fail(operation, PostError::validation(operation, err))
}

fn fail(operation: Operation, err: PostError) -> PostError {
    match &err {
        PostError::Gateway { source, .. } => {
            warn!(%operation, error = %source, "post request failed");
        }
        _ => debug!(%operation, error = %err, "post operation rejected"),
    }
    err
}
