//! View model the session renders posts into.

use std::collections::HashMap;

use postboard_api_types::PostId;

use crate::domain::posts::Post;

/// One rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostNode {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl From<&Post> for PostNode {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Updated,
    Appended,
}

/// Ordered nodes plus an identifier to slot map used for reconciliation.
///
/// When two nodes share an identifier, the map points at the first one; later
/// upserts for that identifier update it and leave the duplicate alone.
#[derive(Debug, Clone, Default)]
pub struct PostView {
    nodes: Vec<PostNode>,
    slots: HashMap<PostId, usize>,
}

impl PostView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node and render `posts` in order.
    pub fn render_all(&mut self, posts: &[Post]) {
        self.nodes.clear();
        self.slots.clear();
        for post in posts {
            self.append(post);
        }
    }

    pub fn append(&mut self, post: &Post) {
        let slot = self.nodes.len();
        self.nodes.push(PostNode::from(post));
        self.slots.entry(post.id.clone()).or_insert(slot);
    }

    /// Overwrite the node rendered for `post.id`, or append one if none exists.
    pub fn upsert(&mut self, post: &Post) -> Upsert {
        match self.slots.get(&post.id).copied() {
            Some(slot) => {
                let node = &mut self.nodes[slot];
                node.title.clone_from(&post.title);
                node.body.clone_from(&post.body);
                Upsert::Updated
            }
            None => {
                self.append(post);
                Upsert::Appended
            }
        }
    }

    pub fn node(&self, id: &PostId) -> Option<&PostNode> {
        self.slots.get(id).map(|slot| &self.nodes[*slot])
    }

    pub fn nodes(&self) -> &[PostNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
