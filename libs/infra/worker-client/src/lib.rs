// [libs/infra/worker-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR CLIENT LIBRARY BARREL
 * CLASIFICACIÓN: INFRASTRUCTURE LIB (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN PÚBLICA DEL ADAPTADOR DE RED
 * =================================================================
 */

pub mod client;
pub mod errors;

pub use client::{ApplyResponse, OrchestratorClient, PodSummary};
pub use errors::ClientError;
