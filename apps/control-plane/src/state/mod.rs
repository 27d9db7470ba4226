// [apps/control-plane/src/state/mod.rs]
//! Composition root. Every repository, the orchestrator client, and the
//! provisioner task channel are constructed once at boot and shared as
//! `Arc`s behind a single cloneable `AppState`.

use crate::config::RuntimeConfig;
use crate::services::provisioner::ProvisionTask;
use gridkeep_infra_db::repositories::{
    CatalogRepository, CouponRepository, InstanceRepository, SubscriptionRepository,
    UserRepository, WalletRepository,
};
use gridkeep_infra_db::GatewayClient;
use gridkeep_infra_orchestrator_client::OrchestratorClient;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RuntimeConfig>,
    pub db: GatewayClient,
    pub users: Arc<UserRepository>,
    pub wallet: Arc<WalletRepository>,
    pub catalog: Arc<CatalogRepository>,
    pub subscriptions: Arc<SubscriptionRepository>,
    pub instances: Arc<InstanceRepository>,
    pub coupons: Arc<CouponRepository>,
    pub orchestrator: Arc<OrchestratorClient>,
    pub provisioner_tx: mpsc::Sender<ProvisionTask>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, db: GatewayClient, provisioner_tx: mpsc::Sender<ProvisionTask>) -> Self {
        let orchestrator = Arc::new(OrchestratorClient::new(
            config.orchestrator_base_url.clone(),
            config.orchestrator_token.clone().unwrap_or_default(),
        ));

        Self {
            users: Arc::new(UserRepository::new(db.clone())),
            wallet: Arc::new(WalletRepository::new(db.clone())),
            catalog: Arc::new(CatalogRepository::new(db.clone())),
            subscriptions: Arc::new(SubscriptionRepository::new(db.clone())),
            instances: Arc::new(InstanceRepository::new(db.clone())),
            coupons: Arc::new(CouponRepository::new(db.clone())),
            orchestrator,
            db,
            config: Arc::new(config),
            provisioner_tx,
        }
    }
}
