// [apps/control-plane/src/bootstrap.rs]
//! Startup reconciliation sweep. Instances left `Provisioning` or stale
//! past their last reconciliation window (a crash or restart mid-task)
//! are re-queued through the provisioner rather than left stranded.

use crate::services::provisioner::ProvisionTask;
use crate::state::AppState;
use gridkeep_domain_models::InstanceStatus;
use tracing::{info, instrument, warn};

#[instrument(skip(state))]
pub async fn reconcile(state: &AppState) {
    let stale = match state.instances.needs_reconciliation().await {
        Ok(stale) => stale,
        Err(error) => {
            warn!(%error, "bootstrap: could not load instances needing reconciliation");
            return;
        }
    };

    if stale.is_empty() {
        info!("bootstrap: no stale instances, nothing to reconcile");
        return;
    }

    info!(count = stale.len(), "bootstrap: reconciling stale instances");
    for instance in stale {
        let task = match instance.status {
            InstanceStatus::Provisioning | InstanceStatus::Pending => {
                ProvisionTask::Provision { instance_id: instance.id.clone() }
            }
            InstanceStatus::Running | InstanceStatus::Stopped | InstanceStatus::Error => {
                ProvisionTask::Restart { instance_id: instance.id.clone() }
            }
            InstanceStatus::Terminated | InstanceStatus::Maintenance => {
                state.instances.touch_reconciled(&instance.id).await.ok();
                continue;
            }
        };
        state.provisioner_tx.send(task).await.ok();
        state.instances.touch_reconciled(&instance.id).await.ok();
    }
}
