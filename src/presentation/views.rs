use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;

use askama::{Error as AskamaError, Template};
use thiserror::Error;

use postboard_api_types::PostId;

use crate::application::posts::SessionState;
use crate::application::view::{PostNode, PostView};

const DOCUMENT_TITLE: &str = "Posts";

#[derive(Debug, Error)]
#[error("failed to render template `{template}`")]
pub struct TemplateRenderError {
    pub template: &'static str,
    #[source]
    pub error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(template: &'static str, error: AskamaError) -> Self {
        Self { template, error }
    }
}

#[derive(Template)]
#[template(path = "posts/nodes.html")]
struct PostNodesTemplate<'a> {
    nodes: &'a [PostNode],
}

#[derive(Template)]
#[template(path = "posts/document.html")]
struct PostDocumentTemplate<'a> {
    title: &'a str,
    nodes: &'a [PostNode],
}

/// The view's nodes as an HTML fragment, one `div.post` per node.
pub fn render_html(view: &PostView) -> Result<String, TemplateRenderError> {
    PostNodesTemplate {
        nodes: view.nodes(),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("posts/nodes.html", err))
}

/// A standalone page holding the view inside `#posts-container`.
pub fn render_document(view: &PostView) -> Result<String, TemplateRenderError> {
    PostDocumentTemplate {
        title: DOCUMENT_TITLE,
        nodes: view.nodes(),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("posts/document.html", err))
}

/// Terminal listing.
///
/// Each node is labelled with the display position that resolves to it, so
/// the numbers shown are the ones `replace` and `patch` accept. A node no
/// position reaches (an update echo carrying an unknown id) is labelled `#-`.
pub fn render_text(session: &SessionState) -> String {
    if session.view.is_empty() {
        return "(no posts)\n".to_string();
    }

    let mut positions: HashMap<&PostId, VecDeque<usize>> = HashMap::new();
    for (offset, id) in session.index.ids().iter().enumerate() {
        positions.entry(id).or_default().push_back(offset + 1);
    }

    let mut out = String::new();
    for node in session.view.nodes() {
        let label = positions
            .get_mut(&node.id)
            .and_then(VecDeque::pop_front)
            .map_or_else(|| "-".to_string(), |position| position.to_string());
        let _ = writeln!(out, "#{label} [id {}] {}", node.id, node.title);
        for line in node.body.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}
