// [libs/infra/worker-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR CLIENT (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: NEGOCIACIÓN CON EL ORQUESTADOR EXTERNO DE CARGAS
 *
 * Speaks JSON-over-HTTP to a generic workload resource API. The actual
 * orchestrator is explicitly out of scope (`spec.md` §1); only this
 * client's interface contract matters.
 * =================================================================
 */

use crate::errors::ClientError;
use gridkeep_domain_provisioning::Manifest;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};

const RETRY_DELAYS_MS: [u64; 3] = [1_000, 2_000, 4_000];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSummary {
    pub name: String,
    pub phase: String,
    pub creation_timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub resource_name: String,
    pub accepted: bool,
    /// `true` when the resource already existed and was left untouched
    /// rather than replaced. Namespace and StorageClaim kinds report
    /// `existing` instead of replacing an already-provisioned resource
    /// (`spec.md` §4.4); every other kind is replaced in place.
    pub existing: bool,
}

pub struct OrchestratorClient {
    http: Client,
    base_url: String,
}

impl OrchestratorClient {
    pub fn new(base_url: String, bearer_token: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", bearer_token))
            .expect("invalid bearer token format");
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        Self {
            http: Client::builder()
                .default_headers(headers)
                .user_agent("gridkeep-control-plane/1.0")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build orchestrator http client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates or replaces a single manifest. Namespace and StorageClaim
    /// kinds are create-or-leave-existing (the orchestrator reports
    /// `existing: true` rather than clobbering live state); every other
    /// kind is replaced unconditionally. Idempotent on the orchestrator's
    /// side, so callers may retry `apply` for the same resource freely.
    #[instrument(skip(self, manifest))]
    pub async fn apply(&self, manifest: &Manifest) -> Result<ApplyResponse, ClientError> {
        let url = format!("{}/api/v1/resources", self.base_url);
        self.with_retry(|| async {
            let response = self.http.post(&url).json(manifest).send().await?;
            Self::interpret(response).await
        })
        .await
    }

    /// Deletes a resource by kind, name and namespace. Idempotent: a
    /// resource that is already absent is not an error (`spec.md` §4.4).
    #[instrument(skip(self))]
    pub async fn delete(&self, kind: &str, name: &str, namespace: &str) -> Result<(), ClientError> {
        let url = format!(
            "{}/api/v1/resources/{}/{}?namespace={}",
            self.base_url, kind, name, namespace
        );
        self.with_retry(|| async {
            let response = self.http.delete(&url).send().await?;
            match response.status() {
                StatusCode::NOT_FOUND => Ok(()),
                status if status.is_success() => Ok(()),
                status => Err(Self::classify(status)),
            }
        })
        .await
    }

    /// Scales a workload's replica count in place, without deleting and
    /// recreating it. The stop/start lifecycle operations drive this
    /// directly (0 to stop, 1 to start) rather than round-tripping
    /// through `delete`/`apply` (`spec.md` §4.6).
    #[instrument(skip(self))]
    pub async fn scale(&self, workload_name: &str, namespace: &str, replicas: u32) -> Result<(), ClientError> {
        let url = format!(
            "{}/api/v1/resources/Workload/{}/scale?namespace={}",
            self.base_url, workload_name, namespace
        );
        self.with_retry(|| async {
            let response = self
                .http
                .patch(&url)
                .json(&serde_json::json!({ "replicas": replicas }))
                .send()
                .await?;
            Self::interpret::<serde_json::Value>(response).await.map(|_| ())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_pods_for(&self, workload_name: &str, namespace: &str) -> Result<Vec<PodSummary>, ClientError> {
        let url = format!(
            "{}/api/v1/resources/Workload/{}/pods?namespace={}",
            self.base_url, workload_name, namespace
        );
        self.with_retry(|| async {
            let response = self.http.get(&url).send().await?;
            Self::interpret(response).await
        })
        .await
    }

    /// Polls `list_pods_for` until a pod reaches `Running`, or the deadline
    /// elapses and `ClientError::TimeoutReady` (`spec.md` §7
    /// `TIMEOUT_READY`) is returned.
    #[instrument(skip(self))]
    pub async fn wait_ready(
        &self,
        workload_name: &str,
        namespace: &str,
        deadline: Duration,
    ) -> Result<PodSummary, ClientError> {
        let started = tokio::time::Instant::now();
        loop {
            let pods = self.list_pods_for(workload_name, namespace).await?;
            if let Some(pod) = pods.into_iter().find(|pod| pod.phase == "Running") {
                return Ok(pod);
            }
            if started.elapsed() >= deadline {
                return Err(ClientError::TimeoutReady);
            }
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    }

    /// Finds the newest pod for a workload regardless of phase. Deliberately
    /// does not filter by a separate "running pods" set, resolving the
    /// `refreshInstancePodName` ambiguity named in `spec.md` §9.
    #[instrument(skip(self))]
    pub async fn newest_pod_name(&self, workload_name: &str, namespace: &str) -> Result<Option<String>, ClientError> {
        let pods = self.list_pods_for(workload_name, namespace).await?;
        Ok(pods
            .into_iter()
            .max_by_key(|pod| pod.creation_timestamp)
            .map(|pod| pod.name))
    }

    #[instrument(skip(self))]
    pub async fn stream_logs(&self, namespace: &str, pod_name: &str, tail_lines: u32) -> Result<String, ClientError> {
        let url = format!(
            "{}/api/v1/namespaces/{}/pods/{}/logs?tail={}",
            self.base_url, namespace, pod_name, tail_lines
        );
        self.with_retry(|| async {
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(response.text().await?)
            } else {
                Err(Self::classify(status))
            }
        })
        .await
    }

    async fn interpret<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::classify(status))
        }
    }

    fn classify(status: StatusCode) -> ClientError {
        match status {
            StatusCode::CONFLICT => ClientError::Transient(status.as_u16()),
            status if status.is_server_error() => ClientError::Transient(status.as_u16()),
            status => ClientError::Permanent(status.as_u16()),
        }
    }

    async fn with_retry<F, Fut, T>(&self, mut attempt: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        let mut last_error = None;
        for (retry_index, delay_ms) in std::iter::once(0).chain(RETRY_DELAYS_MS).enumerate() {
            if retry_index > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() => {
                    warn!(attempt = retry_index, "orchestrator call failed transiently: {}", error);
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }
        Err(last_error.expect("retry loop always attempts at least once"))
    }
}

impl std::fmt::Debug for OrchestratorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
