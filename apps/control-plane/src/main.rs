// [apps/control-plane/src/main.rs]
use dotenvy::dotenv;
use gridkeep_control_plane::prelude::*;
use gridkeep_shared_beacon::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("gridkeep-control-plane");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let config = RuntimeConfig::from_env();
        info!(port = config.listening_port, zone = %config.zone, "igniting control plane");

        let kernel = ControlPlaneKernel::ignite(config).await;
        kernel.launch().await;
    });

    Ok(())
}
