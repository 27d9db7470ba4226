// [apps/control-plane/src/kernel.rs]
//! Composition root for the running process: connects to storage, wires
//! `AppState`, spawns the background daemons, and serves the HTTP router.

use crate::bootstrap;
use crate::config::RuntimeConfig;
use crate::routes::build_router;
use crate::services::{billing_scheduler, provisioner};
use crate::state::AppState;
use gridkeep_infra_db::GatewayClient;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info, instrument};

pub struct ControlPlaneKernel {
    listening_port: u16,
    state: AppState,
}

impl ControlPlaneKernel {
    #[instrument(skip(config))]
    pub async fn ignite(config: RuntimeConfig) -> Self {
        let db = GatewayClient::connect(&config.database_url, config.database_token.clone())
            .await
            .expect("FATAL: could not establish database connection");

        let listening_port = config.listening_port;
        let (provisioner_tx, provisioner_rx) = provisioner::channel();
        let state = AppState::new(config, db, provisioner_tx);

        provisioner::spawn_pool(state.clone(), provisioner_rx);

        Self { listening_port, state }
    }

    pub async fn launch(self) {
        let state = self.state;

        bootstrap::reconcile(&state).await;
        billing_scheduler::spawn(state.clone());

        let router = build_router(state);
        let bind_address = SocketAddr::new(IpAddr::from([0, 0, 0, 0]), self.listening_port);

        info!(%bind_address, "control plane listening");
        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .expect("FATAL: could not bind listening port");

        if let Err(error) = axum::serve(listener, router).await {
            error!(%error, "server loop terminated");
            std::process::exit(1);
        }
    }
}
