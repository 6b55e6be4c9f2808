use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    ApiConfig, FlowCanvasError, Result,
    client::{CatalogProvider, WorkflowSink},
    common::{MemCache, Shutdown},
    model::{ConditionList, ConditionRef, EventRef, GatewayRef, NodeDetails, TaskRef, WorkflowDocument, workflow_names},
};

const NODE_DETAILS_PATH: &str = "getNodeDetails";
const CONDITIONS_PATH: &str = "getAllConditions";
const CACHE_CAPACITY: usize = 16;

/// Decoded body of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Json(Value),
    /// 2xx response whose body is not JSON.
    Text(String),
}

/// Map a save response to its outcome. Any 2xx is a success.
pub fn interpret_save_response(
    status: u16,
    body: String,
) -> Result<SaveOutcome> {
    if !(200..300).contains(&status) {
        return Err(FlowCanvasError::Save {
            status,
            message: body,
        });
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => {
            debug!(status, "save response: {}", value);
            Ok(SaveOutcome::Json(value))
        }
        Err(_) => {
            info!(status, "non-JSON save response: {}", body);
            Ok(SaveOutcome::Text(body))
        }
    }
}

/// Backend client for catalogs, stored workflows and saving.
///
/// Catalog responses are cached for `catalog_cache_ttl_secs`. After
/// [`HttpWorkflowClient::close`] every pending and future request fails with
/// [`FlowCanvasError::Cancelled`].
pub struct HttpWorkflowClient {
    client: reqwest::Client,
    config: ApiConfig,
    cache: MemCache<String, Value>,
    shutdown: Arc<Shutdown>,
}

impl HttpWorkflowClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_millis(config.timeout_ms)).build()?;
        let cache = MemCache::new(CACHE_CAPACITY, Duration::from_secs(config.catalog_cache_ttl_secs));

        Ok(Self {
            client,
            config,
            cache,
            shutdown: Arc::new(Shutdown::new()),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Cancel all in-flight requests and refuse new ones.
    pub fn close(&self) {
        if !self.shutdown.is_shutdown() {
            info!("closing workflow client");
        }
        self.shutdown.shutdown();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_shutdown()
    }

    /// Forget cached catalogs so the next read goes to the backend.
    pub fn invalidate_catalogs(&self) {
        self.cache.clear();
    }

    pub async fn node_details(&self) -> Result<NodeDetails> {
        let url = join_url(&self.config.base_url, &[NODE_DETAILS_PATH])?;
        self.cached_json(url).await
    }

    pub async fn conditions(&self) -> Result<Vec<ConditionRef>> {
        let url = join_url(&self.config.base_url, &[CONDITIONS_PATH])?;
        let list: ConditionList = self.cached_json(url).await?;
        Ok(list.conditions)
    }

    pub async fn workflow_names(&self) -> Result<Vec<String>> {
        let url = join_url(&self.config.workflow_api_url, &["all-workflows"])?;
        let body = self.get_json(url).await?;
        Ok(workflow_names(&body))
    }

    pub async fn workflow_json(
        &self,
        name: &str,
    ) -> Result<Value> {
        let url = join_url(&self.config.workflow_api_url, &["json", name])?;
        self.get_json(url).await
    }

    pub async fn save(
        &self,
        document: &WorkflowDocument,
    ) -> Result<SaveOutcome> {
        let url = Url::parse(&self.config.save_url).map_err(|e| FlowCanvasError::Config(format!("invalid save url '{}': {}", self.config.save_url, e)))?;
        debug!(url = %url, workflow = %document.workflow_name, "posting workflow");

        let (status, body) = self
            .cancellable(async {
                let response = self.client.post(url).json(document).send().await?;
                let status = response.status().as_u16();
                Ok((status, response.text().await?))
            })
            .await?;

        interpret_save_response(status, body)
    }

    async fn cached_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T> {
        let key = url.to_string();
        let body = match self.cache.get(&key) {
            Some(body) => {
                debug!(url = %key, "catalog cache hit");
                body
            }
            None => {
                let body = self.get_json(url).await?;
                self.cache.set(key, body.clone());
                body
            }
        };

        Ok(serde_json::from_value(body)?)
    }

    async fn get_json(
        &self,
        url: Url,
    ) -> Result<Value> {
        debug!(url = %url, "GET");
        self.cancellable(async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FlowCanvasError::Http(format!("GET {} failed with status {}", url, status)));
            }
            Ok(response.json::<Value>().await?)
        })
        .await
    }

    /// Race `fut` against the shutdown signal.
    async fn cancellable<T>(
        &self,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        if self.shutdown.is_shutdown() {
            return Err(FlowCanvasError::Cancelled("workflow client is closed".to_string()));
        }

        tokio::select! {
            _ = self.shutdown.wait() => Err(FlowCanvasError::Cancelled("request cancelled".to_string())),
            res = fut => res,
        }
    }
}

#[async_trait]
impl CatalogProvider for HttpWorkflowClient {
    async fn list_workflows(&self) -> Vec<String> {
        self.workflow_names().await.unwrap_or_else(|err| {
            warn!("error fetching workflows: {}", err);
            Vec::new()
        })
    }

    async fn fetch_workflow(
        &self,
        name: &str,
    ) -> Option<Value> {
        match self.workflow_json(name).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(workflow = name, "error fetching workflow json: {}", err);
                None
            }
        }
    }

    async fn list_task_catalog(&self) -> Vec<TaskRef> {
        self.node_details_or_empty().await.tasks
    }

    async fn list_gateway_catalog(&self) -> Vec<GatewayRef> {
        self.node_details_or_empty().await.gateways
    }

    async fn list_event_catalog(&self) -> Vec<EventRef> {
        self.node_details_or_empty().await.events
    }

    async fn list_condition_catalog(&self) -> Vec<ConditionRef> {
        self.conditions().await.unwrap_or_else(|err| {
            warn!("error fetching conditions: {}", err);
            Vec::new()
        })
    }
}

#[async_trait]
impl WorkflowSink for HttpWorkflowClient {
    async fn save_workflow(
        &self,
        document: &WorkflowDocument,
    ) -> Result<SaveOutcome> {
        self.save(document).await
    }
}

impl HttpWorkflowClient {
    async fn node_details_or_empty(&self) -> NodeDetails {
        self.node_details().await.unwrap_or_else(|err| {
            warn!("error fetching node details: {}", err);
            NodeDetails::default()
        })
    }
}

/// Append percent-encoded path segments to `base`.
fn join_url(
    base: &str,
    segments: &[&str],
) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| FlowCanvasError::Config(format!("invalid api url '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FlowCanvasError::Config(format!("api url '{}' cannot be a base", base)))?
        .pop_if_empty()
        .extend(segments);

    if segments.iter().any(|s| s.is_empty()) {
        warn!(url = %url, "empty path segment in api url");
    }
    Ok(url)
}
