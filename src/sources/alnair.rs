use crate::config::Config;
use crate::normalize::text::as_text;
use crate::sources::error::{ensure_success, SourceError};
use crate::sources::traits::PropertySource;
use crate::sources::types::{ApiFilterOptions, ApiResponse, StaticQuery, UPSTREAM_MAX_LIMIT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the proxied Alnair project endpoints
pub struct AlnairClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl AlnairClient {
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("alnair-listings/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid upstream base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Upstream base URL cannot carry a path: {}", base_url);
        }

        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_listing(builder: RequestBuilder) -> Result<ApiResponse, SourceError> {
        let response = ensure_success(builder.send().await?).await?;
        let body = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&body)?;

        if !parsed.success {
            return Err(SourceError::Upstream(
                parsed.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(parsed)
    }

    /// JSON body of a detail endpoint, `None` on 404
    async fn read_detail(&self, url: Url) -> Result<Option<Value>, SourceError> {
        let response = self.request(Method::GET, url).send().await?;
        let response = match ensure_success(response).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let body: Value = serde_json::from_str(&response.text().await?)?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

/// Project record out of a detail envelope (`{data: {...}}`) or a bare record.
/// An envelope whose `data` is not an object carries no record.
pub(crate) fn unwrap_record(body: Value) -> Option<Value> {
    let mut map = match body {
        Value::Object(map) => map,
        _ => return None,
    };

    if let Some(data) = map.remove("data") {
        return data.is_object().then_some(data);
    }

    map.remove("success");
    map.remove("message");
    (!map.is_empty()).then_some(Value::Object(map))
}

fn description_of(body: &Value) -> Option<String> {
    ["/description", "/data/description", "/data/project/description"]
        .iter()
        .filter_map(|pointer| body.pointer(pointer))
        .find_map(as_text)
}

#[async_trait]
impl PropertySource for AlnairClient {
    #[tracing::instrument(skip(self, filters))]
    async fn fetch_projects(
        &self,
        filters: &ApiFilterOptions,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError> {
        let url = self.endpoint(&["api", "projects"]);
        let limit = limit.clamp(1, UPSTREAM_MAX_LIMIT);
        debug!(%url, page, limit, "Fetching live projects");

        let builder = self
            .request(Method::POST, url)
            .query(&[("page", page.max(1)), ("limit", limit)])
            .json(filters);
        Self::read_listing(builder).await
    }

    #[tracing::instrument(skip(self, query))]
    async fn fetch_static(
        &self,
        query: &StaticQuery,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError> {
        let url = self.endpoint(&["api", "projects", "static"]);
        debug!(%url, page, limit, "Fetching snapshot projects");

        let builder = self
            .request(Method::GET, url)
            .query(&[("page", page.max(1)), ("limit", limit.max(1))])
            .query(query);
        Self::read_listing(builder).await
    }

    async fn fetch_static_project(&self, id: &str) -> Result<Option<Value>, SourceError> {
        let url = self.endpoint(&["api", "project", "static", id]);
        Ok(self.read_detail(url).await?.and_then(unwrap_record))
    }

    async fn fetch_project_description(&self, slug: &str) -> Result<Option<String>, SourceError> {
        let url = self.endpoint(&["api", "project", "look", slug]);
        Ok(self.read_detail(url).await?.as_ref().and_then(description_of))
    }

    fn source_name(&self) -> &'static str {
        "Alnair"
    }
}
