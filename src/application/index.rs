//! Session-local mapping from display positions to post identifiers.

use std::collections::HashMap;

use postboard_api_types::PostId;

use crate::domain::posts::Post;

/// Ordered identifiers in fetch/create order plus the last-known body of each.
///
/// Position `i` (1-based) maps to `ids[i - 1]`. Partial updates only carry a
/// title, so the body cache is what gets resubmitted alongside it.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    ids: Vec<PostId>,
    bodies: HashMap<PostId, String>,
}

impl RecordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index with `posts` in order and rebuild the body cache from them.
    pub fn reset_with(&mut self, posts: &[Post]) {
        self.ids.clear();
        self.bodies.clear();
        for post in posts {
            self.ids.push(post.id.clone());
            self.bodies.insert(post.id.clone(), post.body.clone());
        }
    }

    pub fn append(&mut self, post: &Post) {
        self.ids.push(post.id.clone());
        self.bodies.insert(post.id.clone(), post.body.clone());
    }

    /// Identifier at the 1-based `position`, or `None` when it is outside `1..=len`.
    pub fn resolve(&self, position: usize) -> Option<&PostId> {
        position
            .checked_sub(1)
            .and_then(|offset| self.ids.get(offset))
    }

    pub fn cached_body(&self, id: &PostId) -> &str {
        self.bodies.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn set_cached_body(&mut self, id: PostId, body: impl Into<String>) {
        self.bodies.insert(id, body.into());
    }

    pub fn ids(&self) -> &[PostId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(ids: &[u64]) -> Vec<Post> {
        ids.iter()
            .map(|id| Post::new(*id, format!("title {id}"), format!("body {id}")))
            .collect()
    }

    #[test]
    fn reset_replaces_previous_batch() {
        let mut index = RecordIndex::new();
        index.reset_with(&batch(&[1, 2, 3]));
        index.reset_with(&batch(&[40, 41]));

        assert_eq!(index.len(), 2);
        assert_eq!(index.ids(), &[PostId::Number(40), PostId::Number(41)]);
        assert_eq!(index.cached_body(&PostId::Number(41)), "body 41");
        assert_eq!(index.cached_body(&PostId::Number(1)), "");
    }

    #[test]
    fn resolve_is_one_based_and_bounded() {
        let mut index = RecordIndex::new();
        index.reset_with(&batch(&[10, 20, 30]));

        assert_eq!(index.resolve(0), None);
        assert_eq!(index.resolve(1), Some(&PostId::Number(10)));
        assert_eq!(index.resolve(3), Some(&PostId::Number(30)));
        assert_eq!(index.resolve(4), None);
        assert_eq!(index.resolve(usize::MAX), None);
    }

    #[test]
    fn append_extends_index_and_cache() {
        let mut index = RecordIndex::new();
        index.reset_with(&batch(&[5]));
        index.append(&Post::new(2_u64, "new", "fresh body"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve(2), Some(&PostId::Number(2)));
        assert_eq!(index.cached_body(&PostId::Number(2)), "fresh body");
    }

    #[test]
    fn cached_body_overwrites_in_place() {
        let mut index = RecordIndex::new();
        index.reset_with(&batch(&[7]));
        index.set_cached_body(PostId::Number(7), "edited");

        assert_eq!(index.cached_body(&PostId::Number(7)), "edited");
        assert_eq!(index.len(), 1);
    }
}
