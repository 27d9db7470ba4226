// [apps/control-plane/src/services/provisioner.rs]
//! Workload provisioner (C6). A bounded channel decouples the HTTP handler
//! that enqueues a task from the worker pool that actually drives the
//! orchestrator, so a request returns as soon as the task is accepted
//! (`spec.md` §9's replacement for `setImmediate`).

use crate::errors::EngineError;
use crate::state::AppState;
use gridkeep_domain_provisioning::{generate, instance_resource_name, Manifest};
use gridkeep_infra_orchestrator_client::ClientError;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

const PROVISION_READY_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const UPDATE_READY_TIMEOUT: Duration = Duration::from_secs(3 * 60);
const WORKER_POOL_SIZE: usize = 4;
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum ProvisionTask {
    Provision { instance_id: String },
    Update { instance_id: String, plan_id: String },
    Stop { instance_id: String },
    Start { instance_id: String, plan_id: String },
    Restart { instance_id: String },
    Terminate { instance_id: String },
}

/// Builds the bounded channel handed to `AppState` and, separately, to
/// `spawn_pool` once the rest of the state is assembled. Split out so the
/// kernel can construct `AppState` (which needs the sender) before a full
/// `AppState` exists to hand the worker pool.
pub fn channel() -> (mpsc::Sender<ProvisionTask>, mpsc::Receiver<ProvisionTask>) {
    mpsc::channel(CHANNEL_CAPACITY)
}

/// Spawns `WORKER_POOL_SIZE` consumers over a single `mpsc::Receiver`,
/// matching `spec.md` §5's "separate small pool runs provisioning tasks".
pub fn spawn_pool(state: AppState, rx: mpsc::Receiver<ProvisionTask>) {
    let rx = std::sync::Arc::new(tokio::sync::Mutex::new(rx));

    for worker_index in 0..WORKER_POOL_SIZE {
        let state = state.clone();
        let rx = rx.clone();
        tokio::spawn(async move {
            info!(worker_index, "provisioner worker online");
            loop {
                let task = {
                    let mut guard = rx.lock().await;
                    guard.recv().await
                };
                match task {
                    Some(task) => {
                        if let Err(error) = run_task(&state, task.clone()).await {
                            error!(?task, %error, "provisioner task failed");
                        }
                    }
                    None => break,
                }
            }
            warn!(worker_index, "provisioner worker shutting down");
        });
    }
}

#[instrument(skip(state))]
async fn run_task(state: &AppState, task: ProvisionTask) -> Result<(), EngineError> {
    match task {
        ProvisionTask::Provision { instance_id } => provision(state, &instance_id).await,
        ProvisionTask::Update { instance_id, plan_id } => update(state, &instance_id, &plan_id).await,
        ProvisionTask::Stop { instance_id } => stop(state, &instance_id).await,
        ProvisionTask::Start { instance_id, plan_id } => start(state, &instance_id, &plan_id).await,
        ProvisionTask::Restart { instance_id } => restart(state, &instance_id).await,
        ProvisionTask::Terminate { instance_id } => terminate(state, &instance_id).await,
    }
}

fn workload_manifest<'a>(manifests: &'a [Manifest]) -> &'a Manifest {
    manifests
        .iter()
        .find(|m| matches!(m, Manifest::Workload(_)))
        .expect("generate() always includes exactly one Workload manifest")
}

/// Drives a `PENDING` instance to `RUNNING`, applying the six manifests
/// `generate` returns in order. Idempotent: safe to call repeatedly on an
/// instance stuck in `ERROR`, since `apply` is create-or-replace (or
/// create-or-leave-existing for Namespace/StorageClaim) on every kind
/// (`spec.md` §4.5, §4.6).
async fn provision(state: &AppState, instance_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    state.instances.mark_provisioning(instance_id).await?;

    let subscription = state.subscriptions.find_by_id(&instance.subscription_id).await?;
    let plan = state.catalog.find_plan(&subscription.plan_id).await?;
    let service = state.catalog.find_service(&plan.service_id).await?;
    let manifests = generate(&service, &plan, &instance);

    let workload_name = workload_manifest(&manifests).name().to_string();
    let namespace = workload_manifest(&manifests).namespace().to_string();

    let outcome = apply_all(state, &manifests).await;

    match outcome {
        Ok(applied) => {
            let ready = state
                .orchestrator
                .wait_ready(&workload_name, &namespace, PROVISION_READY_TIMEOUT)
                .await;
            match ready {
                Ok(pod) => {
                    state.instances.mark_running(instance_id, &pod.name).await?;
                    info!(instance_id, pod = %pod.name, "instance running");
                    Ok(())
                }
                Err(error) => {
                    warn!(instance_id, %error, "instance did not become ready, tearing down");
                    cleanup(state, &applied).await;
                    state.instances.mark_error(instance_id, &error.to_string()).await?;
                    Err(EngineError::Orchestrator(error))
                }
            }
        }
        Err((applied, error)) => {
            warn!(instance_id, %error, "provisioning failed, tearing down partial state");
            cleanup(state, &applied).await;
            state.instances.mark_error(instance_id, &error.to_string()).await?;
            Err(EngineError::Orchestrator(error))
        }
    }
}

/// Applies manifests in order, stopping at the first failure. Returns the
/// manifests successfully applied so a caller can reverse-order clean up.
async fn apply_all<'a>(state: &AppState, manifests: &'a [Manifest]) -> Result<Vec<&'a Manifest>, (Vec<&'a Manifest>, ClientError)> {
    let mut applied = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        match state.orchestrator.apply(manifest).await {
            Ok(_) => applied.push(manifest),
            Err(error) => return Err((applied, error)),
        }
    }
    Ok(applied)
}

async fn cleanup(state: &AppState, applied: &[&Manifest]) {
    for manifest in applied.iter().rev() {
        let _ = state.orchestrator.delete(manifest.kind(), manifest.name(), manifest.namespace()).await;
    }
}

/// Regenerates the workload manifest for a new plan and re-applies it,
/// then refreshes the pod reference by newest creation timestamp.
async fn update(state: &AppState, instance_id: &str, plan_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    let plan = state.catalog.find_plan(plan_id).await?;
    let service = state.catalog.find_service(&plan.service_id).await?;
    let manifests = generate(&service, &plan, &instance);
    let workload = workload_manifest(&manifests);

    state.orchestrator.apply(workload).await?;
    let pod = state
        .orchestrator
        .wait_ready(workload.name(), workload.namespace(), UPDATE_READY_TIMEOUT)
        .await?;
    state.instances.mark_running(instance_id, &pod.name).await?;
    Ok(())
}

/// Scales the workload to zero replicas rather than deleting it, so the
/// config map, storage claim and ingress survive a stop/start cycle
/// (`spec.md` §4.6).
async fn stop(state: &AppState, instance_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    let workload_name = instance_resource_name(&instance.id);
    state.orchestrator.scale(&workload_name, &instance.namespace, 0).await?;
    state.instances.mark_stopped(instance_id).await?;
    Ok(())
}

/// Scales the workload back to one replica and waits for it to become
/// ready before reporting `RUNNING` again.
async fn start(state: &AppState, instance_id: &str, _plan_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    let workload_name = instance_resource_name(&instance.id);
    state.orchestrator.scale(&workload_name, &instance.namespace, 1).await?;
    let pod = state
        .orchestrator
        .wait_ready(&workload_name, &instance.namespace, UPDATE_READY_TIMEOUT)
        .await?;
    state.instances.mark_running(instance_id, &pod.name).await?;
    Ok(())
}

/// Rolling restart: re-applies the workload manifest with a bumped
/// pod-template annotation so the orchestrator replaces the running pod,
/// then waits for the replacement to become ready.
async fn restart(state: &AppState, instance_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    let subscription = state.subscriptions.find_by_id(&instance.subscription_id).await?;
    let plan = state.catalog.find_plan(&subscription.plan_id).await?;
    let service = state.catalog.find_service(&plan.service_id).await?;
    let manifests = generate(&service, &plan, &instance);
    let mut workload = workload_manifest(&manifests).clone();
    if let Manifest::Workload(ref mut w) = workload {
        if let serde_json::Value::Object(ref mut env) = w.env {
            env.insert("restarted_at".to_string(), serde_json::json!(chrono::Utc::now().to_rfc3339()));
        }
    }

    state.orchestrator.apply(&workload).await?;
    let pod = state
        .orchestrator
        .wait_ready(workload.name(), workload.namespace(), UPDATE_READY_TIMEOUT)
        .await?;
    state.instances.mark_running(instance_id, &pod.name).await?;
    Ok(())
}

/// Deletes ingress, service, workload, storage claim, config map in that
/// order (`spec.md` §4.6). The namespace itself is left behind since other
/// instances for the same user may still live in it.
async fn terminate(state: &AppState, instance_id: &str) -> Result<(), EngineError> {
    let instance = state.instances.find_by_id(instance_id).await?;
    let subscription = state.subscriptions.find_by_id(&instance.subscription_id).await?;
    let plan = state.catalog.find_plan(&subscription.plan_id).await?;
    let service = state.catalog.find_service(&plan.service_id).await?;
    let manifests = generate(&service, &plan, &instance);

    for manifest in manifests.iter().rev().filter(|m| !matches!(m, Manifest::Namespace(_))) {
        let _ = state.orchestrator.delete(manifest.kind(), manifest.name(), manifest.namespace()).await;
    }
    state.instances.mark_terminated(instance_id).await?;
    Ok(())
}
