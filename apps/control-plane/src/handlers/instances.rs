// [apps/control-plane/src/handlers/instances.rs]
//! Instance management (`spec.md` §6: `/instances/*`). Mutations are thin
//! wrappers that enqueue a `ProvisionTask`; the handler itself never talks
//! to the orchestrator directly.

use crate::errors::EngineError;
use crate::middleware::CallerIdentity;
use crate::services::provisioner::ProvisionTask;
use crate::state::AppState;
use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::{json, Value};

pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(instance_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let instance = state.instances.find_by_id(&instance_id).await?;
    if !caller.owns_or_admin(&instance.user_id) {
        return Err(EngineError::Forbidden);
    }
    Ok(Json(json!({ "instance": instance })))
}

pub async fn restart(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(instance_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let instance = state.instances.find_by_id(&instance_id).await?;
    if !caller.owns_or_admin(&instance.user_id) {
        return Err(EngineError::Forbidden);
    }
    state.provisioner_tx.send(ProvisionTask::Restart { instance_id: instance.id }).await.ok();
    Ok(Json(json!({ "restarting": true })))
}

pub async fn stop(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(instance_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let instance = state.instances.find_by_id(&instance_id).await?;
    if !caller.owns_or_admin(&instance.user_id) {
        return Err(EngineError::Forbidden);
    }
    state.provisioner_tx.send(ProvisionTask::Stop { instance_id: instance.id }).await.ok();
    Ok(Json(json!({ "stopping": true })))
}

pub async fn start(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(instance_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let instance = state.instances.find_by_id(&instance_id).await?;
    if !caller.owns_or_admin(&instance.user_id) {
        return Err(EngineError::Forbidden);
    }
    let subscription = state.subscriptions.find_by_id(&instance.subscription_id).await?;
    state
        .provisioner_tx
        .send(ProvisionTask::Start { instance_id: instance.id, plan_id: subscription.plan_id })
        .await
        .ok();
    Ok(Json(json!({ "starting": true })))
}

pub async fn logs(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(instance_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let instance = state.instances.find_by_id(&instance_id).await?;
    if !caller.owns_or_admin(&instance.user_id) {
        return Err(EngineError::Forbidden);
    }
    let pod_name = instance.pod_name.ok_or(EngineError::NotFound)?;
    let log_text = state.orchestrator.stream_logs(&instance.namespace, &pod_name, 200).await?;
    Ok(Json(json!({ "logs": log_text })))
}
