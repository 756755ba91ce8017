use std::time::Duration;

use async_trait::async_trait;
use postboard_api_types::{ListPostsQuery, PostId, PostResource, PostWriteRequest};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::gateway::{GatewayError, PostGateway};
use crate::infra::error::InfraError;

const POSTS_PATH: &str = "posts";

/// `PostGateway` backed by the posts REST service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpPostGateway {
    client: Client,
    base: Url,
}

impl HttpPostGateway {
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, InfraError> {
        let base = with_trailing_slash(base);
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(InfraError::HttpClient)?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::Url(err.to_string()))
    }

    /// `posts` or `posts/{id}`, with the id percent-encoded as a single segment.
    fn posts_url(&self, id: Option<&PostId>) -> Result<Url, GatewayError> {
        let mut url = self.url(POSTS_PATH)?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| GatewayError::Url(format!("`{}` cannot be a base", self.base)))?
                .push(&id.to_string());
        }
        Ok(url)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        mut url: Url,
        query: Option<&[(&str, String)]>,
        body: Option<&PostWriteRequest>,
    ) -> Result<T, GatewayError> {
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        debug!(%method, %url, "sending request");
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(GatewayError::transport)?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(GatewayError::transport)?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(GatewayError::status(status.as_u16(), text));
        }
        serde_json::from_slice(&bytes).map_err(GatewayError::decode)
    }
}

#[async_trait]
impl PostGateway for HttpPostGateway {
    async fn list_posts(&self, query: ListPostsQuery) -> Result<Vec<PostResource>, GatewayError> {
        let pairs = query.to_pairs();
        let url = self.posts_url(None)?;
        self.request(Method::GET, url, Some(pairs.as_slice()), None)
            .await
    }

    async fn create_post(&self, request: &PostWriteRequest) -> Result<PostResource, GatewayError> {
        let url = self.posts_url(None)?;
        self.request(Method::POST, url, None, Some(request)).await
    }

    async fn replace_post(
        &self,
        id: &PostId,
        request: &PostWriteRequest,
    ) -> Result<PostResource, GatewayError> {
        let url = self.posts_url(Some(id))?;
        self.request(Method::PUT, url, None, Some(request)).await
    }

    async fn patch_post(
        &self,
        id: &PostId,
        request: &PostWriteRequest,
    ) -> Result<PostResource, GatewayError> {
        let url = self.posts_url(Some(id))?;
        self.request(Method::PATCH, url, None, Some(request)).await
    }
}

/// Keep a path prefix such as `/api` when joining relative resource paths.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
